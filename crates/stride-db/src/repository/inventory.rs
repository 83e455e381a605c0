//! # Inventory Repository
//!
//! Per-size stock reads and administration.
//!
//! ## Availability Contract
//! A size is available iff its remaining quantity is > 0. Reads here are
//! the optimistic side; the authoritative guard under concurrency is the
//! conditional decrement inside the order transaction (see
//! `OrderRepository::create`).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stride_core::types::SizeRange;

/// Repository for per-size inventory operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Returns the ascending list of sizes with stock remaining.
    ///
    /// Only sizes inside `range` are reported; an empty list means the
    /// product is currently unpurchasable. Existence of the product id is
    /// NOT checked here - callers resolve the product first.
    pub async fn available_sizes(
        &self,
        product_id: &str,
        range: &SizeRange,
    ) -> DbResult<Vec<i64>> {
        let sizes: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT size FROM product_sizes
            WHERE product_id = ?1
              AND quantity > 0
              AND size BETWEEN ?2 AND ?3
            ORDER BY size
            "#,
        )
        .bind(product_id)
        .bind(range.min)
        .bind(range.max)
        .fetch_all(&self.pool)
        .await?;

        Ok(sizes)
    }

    /// Returns the remaining quantity for one (product, size) pair.
    ///
    /// `None` means the pair was never stocked.
    pub async fn remaining(&self, product_id: &str, size: i64) -> DbResult<Option<i64>> {
        let quantity: Option<i64> = sqlx::query_scalar(
            "SELECT quantity FROM product_sizes WHERE product_id = ?1 AND size = ?2",
        )
        .bind(product_id)
        .bind(size)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quantity)
    }

    /// Sets the absolute stock level for one (product, size) pair.
    ///
    /// Restocking/administration path - order fulfilment never calls this,
    /// it goes through the conditional decrement instead.
    pub async fn set_stock(&self, product_id: &str, size: i64, quantity: i64) -> DbResult<()> {
        debug!(product_id = %product_id, size, quantity, "Setting stock level");

        sqlx::query(
            r#"
            INSERT INTO product_sizes (product_id, size, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (product_id, size) DO UPDATE SET quantity = excluded.quantity
            "#,
        )
        .bind(product_id)
        .bind(size)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seed_catalog;

    #[tokio::test]
    async fn test_available_sizes_ordered_and_in_range() {
        let (db, fixture) = seed_catalog().await;

        // Runner is stocked at 40 and 42; size 41 exists with quantity 0
        let sizes = db
            .inventory()
            .available_sizes(&fixture.runner_id, &SizeRange::default())
            .await
            .unwrap();
        assert_eq!(sizes, vec![40, 42]);
    }

    #[tokio::test]
    async fn test_zero_quantity_size_never_appears() {
        let (db, fixture) = seed_catalog().await;

        let sizes = db
            .inventory()
            .available_sizes(&fixture.runner_id, &SizeRange::default())
            .await
            .unwrap();
        assert!(!sizes.contains(&41));
    }

    #[tokio::test]
    async fn test_sizes_outside_range_are_filtered() {
        let (db, fixture) = seed_catalog().await;

        // Narrow the range below 42: only 40 remains visible
        let narrow = SizeRange::new(35, 41);
        let sizes = db
            .inventory()
            .available_sizes(&fixture.runner_id, &narrow)
            .await
            .unwrap();
        assert_eq!(sizes, vec![40]);
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let (db, fixture) = seed_catalog().await;

        let first = db
            .inventory()
            .available_sizes(&fixture.runner_id, &SizeRange::default())
            .await
            .unwrap();
        let second = db
            .inventory()
            .available_sizes(&fixture.runner_id, &SizeRange::default())
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_remaining() {
        let (db, fixture) = seed_catalog().await;

        assert_eq!(
            db.inventory().remaining(&fixture.runner_id, 40).await.unwrap(),
            Some(3)
        );
        assert_eq!(
            db.inventory().remaining(&fixture.runner_id, 41).await.unwrap(),
            Some(0)
        );
        assert_eq!(
            db.inventory().remaining(&fixture.runner_id, 39).await.unwrap(),
            None
        );
    }
}
