//! # Error Types
//!
//! Domain-specific error types for stride-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stride-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule failures, tagged with ErrorKind  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stride-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  storefront-api errors (in app)                                        │
//! │  └── ApiError         - What HTTP clients see (status + JSON)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, size, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every error maps to exactly one [`ErrorKind`] via [`CoreError::kind`],
//!    so callers branch on the kind and display the message

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Machine-readable error taxonomy.
///
/// Callers match on the kind for programmatic handling; the `Display`
/// output of the error itself is the human-readable reason string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced entity (product, order) does not exist.
    NotFound,
    /// Malformed or out-of-range input; the client can retry with a fix.
    Validation,
    /// The atomic inventory guard rejected a commit (concurrent exhaustion).
    Conflict,
    /// The underlying store was unreachable or timed out.
    Transient,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// Each variant carries enough context to produce a user-facing message.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced entity cannot be found.
    ///
    /// ## When This Occurs
    /// - Product id doesn't exist in the catalog
    /// - Order id doesn't exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The requested shoe size is not currently purchasable.
    ///
    /// ## When This Occurs
    /// - Size has zero remaining stock
    /// - Size was never stocked for this product
    #[error("size {size} is not available for product {product_id}")]
    SizeUnavailable { product_id: String, size: i64 },

    /// Insufficient stock to fulfil an order line.
    ///
    /// ## When This Occurs
    /// - Requested quantity exceeds the remaining count for that size
    #[error("insufficient stock for product {product_id} size {size}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        size: i64,
        available: i64,
        requested: i64,
    },

    /// The supplied promotion code cannot be applied.
    ///
    /// One uniform rejection covers empty, unknown, inactive, and expired
    /// codes, so callers cannot probe which codes exist but are dormant.
    #[error("invalid promotion code")]
    InvalidPromotion,

    /// The atomic inventory decrement found less stock than the order
    /// needs at commit time. The store is left unchanged.
    #[error("stock for product {product_id} size {size} was exhausted while committing the order")]
    StockConflict { product_id: String, size: i64 },

    /// The store was unreachable or did not answer within its timeout.
    #[error("store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the taxonomy kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::SizeUnavailable { .. }
            | CoreError::InsufficientStock { .. }
            | CoreError::InvalidPromotion
            | CoreError::Validation(_) => ErrorKind::Validation,
            CoreError::StockConflict { .. } => ErrorKind::Conflict,
            CoreError::StoreUnavailable { .. } => ErrorKind::Transient,
        }
    }

    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Value must not be negative.
    #[error("{field} must be non-negative")]
    MustBeNonNegative { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Collection has too many elements.
    #[error("{field} must have at most {max} entries")]
    TooMany { field: &'static str, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: "p-1".to_string(),
            size: 40,
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for product p-1 size 40: available 3, requested 5"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            CoreError::not_found("Product", "p-1").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(CoreError::InvalidPromotion.kind(), ErrorKind::Validation);
        assert_eq!(
            CoreError::StockConflict {
                product_id: "p-1".to_string(),
                size: 40
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            CoreError::StoreUnavailable {
                reason: "timeout".to_string()
            }
            .kind(),
            ErrorKind::Transient
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required { field: "items" };
        let core_err: CoreError = validation_err.into();
        assert_eq!(core_err.kind(), ErrorKind::Validation);
        assert_eq!(core_err.to_string(), "items is required");
    }
}
