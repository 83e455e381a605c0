//! Shared application state.
//!
//! One service per storefront concern, all cheaply cloneable (each holds
//! pool-backed repositories). Built once at startup from the loaded
//! configuration and handed to the router.

use stride_db::Database;

use crate::config::ApiConfig;
use crate::services::availability::AvailabilityService;
use crate::services::catalog::CatalogService;
use crate::services::order::OrderService;
use crate::services::promotion::PromotionService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub availability: AvailabilityService,
    pub promotions: PromotionService,
    pub orders: OrderService,
}

impl AppState {
    /// Wires the services to the database with the configured catalog
    /// rules (page size, stocked size range).
    pub fn new(db: &Database, config: &ApiConfig) -> Self {
        let size_range = config.size_range();
        let promotions = PromotionService::new(db.promotions());

        AppState {
            catalog: CatalogService::new(
                db.catalog(),
                db.inventory(),
                config.page_size,
                size_range,
            ),
            availability: AvailabilityService::new(db.catalog(), db.inventory(), size_range),
            orders: OrderService::new(
                db.catalog(),
                db.inventory(),
                db.orders(),
                promotions.clone(),
                size_range,
            ),
            promotions,
        }
    }
}
