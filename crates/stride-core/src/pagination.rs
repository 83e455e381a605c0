//! # Pagination
//!
//! Fixed-size page math shared by the catalog filter engine and keyword
//! search.
//!
//! ## Rules
//! - Page size is a constant chosen at construction, never user input
//! - `total_pages = ceil(matching_count / page_size)`
//! - A requested page below 1 or past the last page yields an EMPTY item
//!   list while still reporting total/current page - it is never an error

use serde::{Deserialize, Serialize};

// =============================================================================
// Page Result
// =============================================================================

/// A bounded slice of a larger ordered result set plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// Items belonging to `current_page`, in result-set order.
    pub items: Vec<T>,
    /// Total number of pages for the full match set.
    pub total_pages: i64,
    /// The page that was requested (echoed back even when out of range).
    pub current_page: i64,
}

impl<T> PageResult<T> {
    /// Creates a page result.
    pub fn new(items: Vec<T>, total_pages: i64, current_page: i64) -> Self {
        PageResult {
            items,
            total_pages,
            current_page,
        }
    }

    /// Creates an empty page (out-of-range request or zero matches).
    pub fn empty(total_pages: i64, current_page: i64) -> Self {
        PageResult {
            items: Vec::new(),
            total_pages,
            current_page,
        }
    }
}

// =============================================================================
// Page Window
// =============================================================================

/// The SQL window for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Computes `ceil(total / page_size)` pages for a match count.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        (total + page_size - 1) / page_size
    }
}

/// Resolves the fetch window for `page` over `total` matches.
///
/// Returns `(total_pages, Some(window))` when the page is in range, and
/// `(total_pages, None)` when it is not - the caller skips the item query
/// and returns an empty page.
pub fn page_window(total: i64, page: i64, page_size: i64) -> (i64, Option<PageWindow>) {
    let pages = total_pages(total, page_size);

    if page < 1 || page > pages {
        return (pages, None);
    }

    (
        pages,
        Some(PageWindow {
            offset: (page - 1) * page_size,
            limit: page_size,
        }),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 12), 0);
        assert_eq!(total_pages(1, 12), 1);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(45, 12), 4);
    }

    #[test]
    fn test_page_window_in_range() {
        let (pages, window) = page_window(45, 2, 12);
        assert_eq!(pages, 4);
        assert_eq!(window, Some(PageWindow { offset: 12, limit: 12 }));
    }

    #[test]
    fn test_page_zero_is_empty_not_error() {
        let (pages, window) = page_window(45, 0, 12);
        assert_eq!(pages, 4);
        assert_eq!(window, None);
    }

    #[test]
    fn test_page_past_end_is_empty_not_error() {
        let (pages, window) = page_window(45, 5, 12);
        assert_eq!(pages, 4);
        assert_eq!(window, None);
    }

    #[test]
    fn test_zero_matches() {
        let (pages, window) = page_window(0, 1, 12);
        assert_eq!(pages, 0);
        assert_eq!(window, None);
    }
}
