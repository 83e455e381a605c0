//! # Service Layer
//!
//! One service per storefront concern, composing stride-core rules over
//! the stride-db repositories:
//!
//! - [`availability::AvailabilityService`] - purchasable sizes per product
//! - [`catalog::CatalogService`] - filter engine, keyword search, listing rails
//! - [`promotion::PromotionService`] - promotion code validation
//! - [`order::OrderService`] - order orchestration (the only write path)
//!
//! Services receive everything they depend on at construction: the
//! repositories, the page size, the size range, and - for the order
//! path - the already-resolved buyer identity as a plain argument.

pub mod availability;
pub mod catalog;
pub mod order;
pub mod promotion;

use stride_core::CoreError;
use stride_db::DbError;

/// Maps database failures onto the core error taxonomy.
///
/// ## Mapping
/// ```text
/// DbError::NotFound        → CoreError::NotFound      (kind NotFound)
/// DbError::StockExhausted  → CoreError::StockConflict (kind Conflict)
/// anything else            → CoreError::StoreUnavailable (kind Transient)
/// ```
/// Residual store failures (timeouts, constraint trips, broken pool) are
/// not the caller's fault, so they all surface as transient.
pub(crate) fn store_error(err: DbError) -> CoreError {
    match err {
        DbError::NotFound { entity, id } => CoreError::NotFound { entity, id },
        DbError::StockExhausted { product_id, size } => {
            CoreError::StockConflict { product_id, size }
        }
        other => CoreError::StoreUnavailable {
            reason: other.to_string(),
        },
    }
}
