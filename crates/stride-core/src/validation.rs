//! # Validation Module
//!
//! Input validation for order requests, sizes, and quantities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum extraction)                               │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  └── Size range, quantities, line counts                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE / foreign key constraints                       │
//! │  └── quantity >= 0 CHECK plus the conditional decrement guard          │
//! │                                                                         │
//! │  The step-1/2 checks give fast feedback; the database guard is         │
//! │  the authoritative one under concurrency.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{CreateOrderRequest, SizeRange};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (99)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates that a requested shoe size falls inside the stocked range.
pub fn validate_size(size: i64, range: &SizeRange) -> ValidationResult<()> {
    if !range.contains(size) {
        return Err(ValidationError::OutOfRange {
            field: "size",
            min: range.min,
            max: range.max,
        });
    }

    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Structurally validates an order request before any store access.
///
/// ## Rules
/// - At least one line
/// - At most MAX_ORDER_LINES lines
/// - Every line has a non-empty product id, an in-range size, and a
///   valid quantity
pub fn validate_order_request(
    request: &CreateOrderRequest,
    size_range: &SizeRange,
) -> ValidationResult<()> {
    if request.items.is_empty() {
        return Err(ValidationError::Required { field: "items" });
    }

    if request.items.len() > MAX_ORDER_LINES {
        return Err(ValidationError::TooMany {
            field: "items",
            max: MAX_ORDER_LINES,
        });
    }

    for line in &request.items {
        if line.product_id.trim().is_empty() {
            return Err(ValidationError::Required { field: "product_id" });
        }
        validate_size(line.size, size_range)?;
        validate_quantity(line.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderLine;

    fn line(product_id: &str, size: i64, quantity: i64) -> OrderLine {
        OrderLine {
            product_id: product_id.to_string(),
            size,
            quantity,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(100).is_err());
    }

    #[test]
    fn test_validate_size() {
        let range = SizeRange::default();
        assert!(validate_size(35, &range).is_ok());
        assert!(validate_size(42, &range).is_ok());
        assert!(validate_size(34, &range).is_err());
        assert!(validate_size(43, &range).is_err());
    }

    #[test]
    fn test_order_request_needs_items() {
        let request = CreateOrderRequest {
            items: vec![],
            promotion_code: None,
        };
        let err = validate_order_request(&request, &SizeRange::default()).unwrap_err();
        assert_eq!(err.to_string(), "items is required");
    }

    #[test]
    fn test_order_request_rejects_bad_lines() {
        let range = SizeRange::default();

        let request = CreateOrderRequest {
            items: vec![line("", 40, 1)],
            promotion_code: None,
        };
        assert!(validate_order_request(&request, &range).is_err());

        let request = CreateOrderRequest {
            items: vec![line("p-1", 50, 1)],
            promotion_code: None,
        };
        assert!(validate_order_request(&request, &range).is_err());

        let request = CreateOrderRequest {
            items: vec![line("p-1", 40, 0)],
            promotion_code: None,
        };
        assert!(validate_order_request(&request, &range).is_err());
    }

    #[test]
    fn test_order_request_accepts_valid_lines() {
        let request = CreateOrderRequest {
            items: vec![line("p-1", 40, 2), line("p-2", 36, 1)],
            promotion_code: Some("WELCOME".to_string()),
        };
        assert!(validate_order_request(&request, &SizeRange::default()).is_ok());
    }
}
