//! # stride-db: Database Layer for the Stride Storefront
//!
//! This crate provides database access for the storefront.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Stride Storefront Data Flow                         │
//! │                                                                         │
//! │  HTTP handler (filter products, create order, ...)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     stride-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (catalog.rs,  │    │  (embedded)  │  │   │
//! │  │   │               │    │  order.rs...) │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CatalogRepo   │    │ 001_init.sql │  │   │
//! │  │   │ WAL mode      │    │ OrderRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (stride.db)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (catalog, inventory, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stride_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("data/stride.db")).await?;
//! let sizes = db.inventory().available_sizes(&product_id, &range).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::order::OrderRepository;
pub use repository::promotion::PromotionRepository;

// =============================================================================
// Test Support
// =============================================================================

/// Shared fixtures for the in-module repository tests.
#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, Utc};

    use crate::pool::{Database, DbConfig};
    use crate::repository::catalog::{generate_id, new_product};
    use crate::repository::order::{generate_order_id, generate_order_item_id};
    use stride_core::{Brand, Category, DiscountType, Order, OrderItem, Promotion};

    /// Ids of the seeded fixture rows.
    pub struct SeedFixture {
        pub brand_id: String,
        pub category_id: String,
        pub runner_id: String,
        pub court_id: String,
    }

    /// Creates an in-memory database with a small two-product catalog:
    ///
    /// * "Runner 2"      $89.00, sizes 40 → 3, 41 → 0, 42 → 2
    /// * "Court Classic" $129.00, size  38 → 5
    pub async fn seed_catalog() -> (Database, SeedFixture) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let brand = Brand {
            id: generate_id(),
            name: "Velocity".to_string(),
        };
        db.catalog().insert_brand(&brand).await.unwrap();

        let category = Category {
            id: generate_id(),
            name: "Running".to_string(),
        };
        db.catalog().insert_category(&category).await.unwrap();

        let runner = new_product("Runner 2", &brand.id, &category.id, 8900);
        db.catalog().insert_product(&runner).await.unwrap();
        db.inventory().set_stock(&runner.id, 40, 3).await.unwrap();
        db.inventory().set_stock(&runner.id, 41, 0).await.unwrap();
        db.inventory().set_stock(&runner.id, 42, 2).await.unwrap();

        let court = new_product("Court Classic", &brand.id, &category.id, 12900);
        db.catalog().insert_product(&court).await.unwrap();
        db.inventory().set_stock(&court.id, 38, 5).await.unwrap();

        let fixture = SeedFixture {
            brand_id: brand.id,
            category_id: category.id,
            runner_id: runner.id,
            court_id: court.id,
        };
        (db, fixture)
    }

    /// Inserts a promotion valid from yesterday to thirty days out.
    pub async fn seed_promotion(
        db: &Database,
        code: &str,
        discount_type: DiscountType,
        discount_value: i64,
        max_discount_cents: Option<i64>,
        active: bool,
    ) -> Promotion {
        let now = Utc::now();
        let promotion = Promotion {
            id: generate_id(),
            code: code.to_string(),
            discount_type,
            discount_value,
            max_discount_cents,
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(30),
            active,
        };
        db.promotions().insert(&promotion).await.unwrap();
        promotion
    }

    /// Builds a single-line order with its item, totals precomputed.
    pub fn order_for(
        product_id: &str,
        name: &str,
        size: i64,
        quantity: i64,
        unit_price_cents: i64,
        user_id: &str,
    ) -> (Order, Vec<OrderItem>) {
        let order_id = generate_order_id();
        let line_total = unit_price_cents * quantity;

        let order = Order {
            id: order_id.clone(),
            user_id: user_id.to_string(),
            subtotal_cents: line_total,
            discount_cents: 0,
            total_cents: line_total,
            promotion_code: None,
            created_at: Utc::now(),
        };

        let item = OrderItem {
            id: generate_order_item_id(),
            order_id,
            product_id: product_id.to_string(),
            name_snapshot: name.to_string(),
            size,
            quantity,
            unit_price_cents,
            line_total_cents: line_total,
        };

        (order, vec![item])
    }
}
