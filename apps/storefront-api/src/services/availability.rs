//! # Availability Service
//!
//! Resolves which sizes of a product are currently purchasable.
//!
//! The returned sequence is also the validation set for a requested size:
//! a size is acceptable for ordering iff it appears here.

use stride_core::types::SizeRange;
use stride_core::{CoreError, CoreResult};
use stride_db::{CatalogRepository, InventoryRepository};

use super::store_error;

/// Resolves per-product size availability.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    catalog: CatalogRepository,
    inventory: InventoryRepository,
    size_range: SizeRange,
}

impl AvailabilityService {
    /// Creates the service with its stocked size range.
    pub fn new(
        catalog: CatalogRepository,
        inventory: InventoryRepository,
        size_range: SizeRange,
    ) -> Self {
        AvailabilityService {
            catalog,
            inventory,
            size_range,
        }
    }

    /// Returns the ascending sizes with stock remaining.
    ///
    /// ## Contract
    /// - Only sizes inside the stocked range appear
    /// - A size with zero remaining units never appears
    /// - Empty result = the product is currently unpurchasable
    /// - Unknown product id fails with NotFound
    pub async fn available_sizes(&self, product_id: &str) -> CoreResult<Vec<i64>> {
        self.catalog
            .get_product(product_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| CoreError::not_found("product", product_id))?;

        self.inventory
            .available_sizes(product_id, &self.size_range)
            .await
            .map_err(store_error)
    }

    /// The stocked size range this resolver was constructed with.
    pub fn size_range(&self) -> &SizeRange {
        &self.size_range
    }
}
