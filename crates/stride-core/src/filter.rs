//! # Catalog Filter
//!
//! Multi-criteria filter request for the catalog: normalization of price
//! bounds and the pure matching predicate.
//!
//! ## Filtering Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A product matches a FilterRequest iff                                  │
//! │                                                                         │
//! │    (brand set empty      OR product.brand    ∈ brand set)              │
//! │  AND (category set empty OR product.category ∈ category set)          │
//! │  AND (size set empty     OR ≥1 requested size is in stock)            │
//! │  AND (min ≤ price ≤ max)                                              │
//! │                                                                         │
//! │  OR within a field, AND across fields.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::Product;

// =============================================================================
// Filter Request
// =============================================================================

fn default_page() -> i64 {
    1
}

/// An incoming catalog filter request.
///
/// Empty sets mean "no restriction on this field". Prices are optional;
/// see [`FilterRequest::normalize`] for the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub brand_ids: Vec<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<i64>,
    #[serde(default)]
    pub min_price: Option<i64>,
    #[serde(default)]
    pub max_price: Option<i64>,
    #[serde(default = "default_page")]
    pub page: i64,
}

impl Default for FilterRequest {
    fn default() -> Self {
        FilterRequest {
            brand_ids: Vec::new(),
            category_ids: Vec::new(),
            sizes: Vec::new(),
            min_price: None,
            max_price: None,
            page: 1,
        }
    }
}

impl FilterRequest {
    /// Resolves price defaults and rejects negative bounds.
    ///
    /// ## Rules
    /// - Missing minimum ⇒ 0
    /// - Missing maximum ⇒ `i64::MAX` (effectively unbounded)
    /// - A negative minimum or maximum is a validation error, rejected
    ///   before any query runs
    pub fn normalize(&self) -> Result<CatalogFilter, ValidationError> {
        let min_price = match self.min_price {
            None => 0,
            Some(min) if min < 0 => {
                return Err(ValidationError::MustBeNonNegative { field: "price" })
            }
            Some(min) => min,
        };

        let max_price = match self.max_price {
            None => i64::MAX,
            Some(max) if max < 0 => {
                return Err(ValidationError::MustBeNonNegative { field: "price" })
            }
            Some(max) => max,
        };

        Ok(CatalogFilter {
            brand_ids: self.brand_ids.clone(),
            category_ids: self.category_ids.clone(),
            sizes: self.sizes.clone(),
            min_price,
            max_price,
            page: self.page,
        })
    }
}

// =============================================================================
// Normalized Filter
// =============================================================================

/// A [`FilterRequest`] with price bounds resolved. This is what the query
/// layer consumes.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    pub brand_ids: Vec<String>,
    pub category_ids: Vec<String>,
    pub sizes: Vec<i64>,
    pub min_price: i64,
    pub max_price: i64,
    pub page: i64,
}

impl CatalogFilter {
    /// The pure matching predicate.
    ///
    /// `available_sizes` is the product's currently purchasable sizes (as
    /// produced by the availability resolver). The SQL filter query mirrors
    /// this predicate; tests assert both agree.
    pub fn matches(&self, product: &Product, available_sizes: &[i64]) -> bool {
        if !self.brand_ids.is_empty() && !self.brand_ids.contains(&product.brand_id) {
            return false;
        }

        if !self.category_ids.is_empty() && !self.category_ids.contains(&product.category_id) {
            return false;
        }

        if !self.sizes.is_empty() && !self.sizes.iter().any(|s| available_sizes.contains(s)) {
            return false;
        }

        product.price_cents >= self.min_price && product.price_cents <= self.max_price
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(brand: &str, category: &str, price: i64) -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Runner 2".to_string(),
            brand_id: brand.to_string(),
            category_id: category.to_string(),
            price_cents: price,
            view_count: 0,
            sold_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_normalize_defaults() {
        let filter = FilterRequest::default().normalize().unwrap();
        assert_eq!(filter.min_price, 0);
        assert_eq!(filter.max_price, i64::MAX);
        assert_eq!(filter.page, 1);
    }

    #[test]
    fn test_normalize_rejects_negative_prices() {
        let request = FilterRequest {
            min_price: Some(-1),
            ..FilterRequest::default()
        };
        let err = request.normalize().unwrap_err();
        assert_eq!(err.to_string(), "price must be non-negative");

        let request = FilterRequest {
            max_price: Some(-100),
            ..FilterRequest::default()
        };
        assert!(request.normalize().is_err());
    }

    #[test]
    fn test_empty_sets_match_everything() {
        let filter = FilterRequest::default().normalize().unwrap();
        assert!(filter.matches(&product("b-1", "c-1", 9999), &[]));
    }

    #[test]
    fn test_brand_and_category_are_anded() {
        let request = FilterRequest {
            brand_ids: vec!["b-1".to_string()],
            category_ids: vec!["c-2".to_string()],
            ..FilterRequest::default()
        };
        let filter = request.normalize().unwrap();

        // Brand matches but category doesn't
        assert!(!filter.matches(&product("b-1", "c-1", 9999), &[]));
        // Both match
        assert!(filter.matches(&product("b-1", "c-2", 9999), &[]));
    }

    #[test]
    fn test_sizes_are_ored_within_the_field() {
        let request = FilterRequest {
            sizes: vec![40, 41],
            ..FilterRequest::default()
        };
        let filter = request.normalize().unwrap();
        let p = product("b-1", "c-1", 9999);

        // One of the requested sizes is in stock
        assert!(filter.matches(&p, &[38, 41]));
        // None of the requested sizes is in stock
        assert!(!filter.matches(&p, &[38, 39]));
        // Nothing in stock at all
        assert!(!filter.matches(&p, &[]));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let request = FilterRequest {
            min_price: Some(5000),
            max_price: Some(10000),
            ..FilterRequest::default()
        };
        let filter = request.normalize().unwrap();

        assert!(filter.matches(&product("b-1", "c-1", 5000), &[]));
        assert!(filter.matches(&product("b-1", "c-1", 10000), &[]));
        assert!(!filter.matches(&product("b-1", "c-1", 4999), &[]));
        assert!(!filter.matches(&product("b-1", "c-1", 10001), &[]));
    }
}
