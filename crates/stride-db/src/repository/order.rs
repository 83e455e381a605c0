//! # Order Repository
//!
//! Database operations for orders and order items.
//!
//! ## The Atomic Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Commit Transaction                             │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    for each line:                                                       │
//! │      UPDATE product_sizes                                               │
//! │      SET quantity = quantity - :qty                                     │
//! │      WHERE product_id = :p AND size = :s AND quantity >= :qty           │
//! │           │                                                             │
//! │           ├── 0 rows affected ──► ROLLBACK, StockExhausted              │
//! │           │   (another order drained the size first)                    │
//! │           ▼                                                             │
//! │      UPDATE products SET sold_count = sold_count + :qty                 │
//! │    INSERT order row                                                     │
//! │    INSERT order_items rows                                              │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Either every effect lands or none does. A partially decremented,      │
//! │  unpersisted order is never a visible state.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stride_core::{Order, OrderItem};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Commits an order atomically.
    ///
    /// Decrements each line's (product, size) stock with a conditional
    /// update that refuses to go negative, bumps the products' sold
    /// counters, and inserts the order with its items - all in one
    /// transaction.
    ///
    /// ## Errors
    /// * `DbError::StockExhausted` - a line's remaining stock was smaller
    ///   than its quantity at commit time; the transaction is rolled back
    ///   and the store is unchanged
    pub async fn create(&self, order: &Order, items: &[OrderItem]) -> DbResult<()> {
        debug!(id = %order.id, user_id = %order.user_id, lines = items.len(), "Committing order");

        let mut tx = self.pool.begin().await?;

        for item in items {
            // The authoritative inventory guard: the decrement only
            // matches while enough stock remains
            let result = sqlx::query(
                r#"
                UPDATE product_sizes
                SET quantity = quantity - ?1
                WHERE product_id = ?2 AND size = ?3 AND quantity >= ?1
                "#,
            )
            .bind(item.quantity)
            .bind(&item.product_id)
            .bind(item.size)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Dropping the transaction rolls back earlier decrements
                return Err(DbError::StockExhausted {
                    product_id: item.product_id.clone(),
                    size: item.size,
                });
            }

            sqlx::query("UPDATE products SET sold_count = sold_count + ?1 WHERE id = ?2")
                .bind(item.quantity)
                .bind(&item.product_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, user_id, subtotal_cents, discount_cents, total_cents,
                promotion_code, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(order.subtotal_cents)
        .bind(order.discount_cents)
        .bind(order.total_cents)
        .bind(&order.promotion_code)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, name_snapshot,
                    size, quantity, unit_price_cents, line_total_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.name_snapshot)
            .bind(item.size)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.line_total_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(id = %order.id, total_cents = order.total_cents, "Order committed");
        Ok(())
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, subtotal_cents, discount_cents, total_cents,
                   promotion_code, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all items for an order, in insertion order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, name_snapshot,
                   size, quantity, unit_price_cents, line_total_cents
            FROM order_items
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

/// Generates a new order id.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a new order item id.
pub fn generate_order_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{order_for, seed_catalog};

    #[tokio::test]
    async fn test_create_order_decrements_stock_and_persists() {
        let (db, fixture) = seed_catalog().await;

        let (order, items) = order_for(&fixture.runner_id, "Runner 2", 40, 2, 8900, "user-1");
        db.orders().create(&order, &items).await.unwrap();

        // 3 units seeded at size 40, 2 ordered
        assert_eq!(
            db.inventory().remaining(&fixture.runner_id, 40).await.unwrap(),
            Some(1)
        );

        let stored = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.user_id, "user-1");
        assert_eq!(stored.total_cents, 17800);

        let stored_items = db.orders().get_items(&order.id).await.unwrap();
        assert_eq!(stored_items.len(), 1);
        assert_eq!(stored_items[0].unit_price_cents, 8900);

        // sold_count bumped inside the same transaction
        let product = db
            .catalog()
            .get_product(&fixture.runner_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.sold_count, 2);
    }

    #[tokio::test]
    async fn test_insufficient_stock_rolls_back_everything() {
        let (db, fixture) = seed_catalog().await;

        // Two lines: the first is satisfiable, the second is not
        let (order, mut items) = order_for(&fixture.runner_id, "Runner 2", 40, 2, 8900, "user-1");
        let (_, more) = order_for(&fixture.runner_id, "Runner 2", 41, 1, 8900, "user-1");
        let mut second = more.into_iter().next().unwrap();
        second.order_id = order.id.clone();
        items.push(second);

        let err = db.orders().create(&order, &items).await.unwrap_err();
        assert!(matches!(err, DbError::StockExhausted { size: 41, .. }));

        // The first line's decrement was rolled back
        assert_eq!(
            db.inventory().remaining(&fixture.runner_id, 40).await.unwrap(),
            Some(3)
        );
        assert!(db.orders().get_by_id(&order.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_orders_for_last_unit_exactly_one_wins() {
        let (db, fixture) = seed_catalog().await;

        // Leave exactly one unit of size 42
        db.inventory().set_stock(&fixture.runner_id, 42, 1).await.unwrap();

        let (order_a, items_a) = order_for(&fixture.runner_id, "Runner 2", 42, 1, 8900, "user-a");
        let (order_b, items_b) = order_for(&fixture.runner_id, "Runner 2", 42, 1, 8900, "user-b");

        let orders = db.orders();
        let (result_a, result_b) = tokio::join!(
            orders.create(&order_a, &items_a),
            orders.create(&order_b, &items_b),
        );

        // Exactly one commit wins; the loser hits the conditional
        // decrement and rolls back
        let successes = [&result_a, &result_b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        let loser = if result_a.is_ok() { result_b } else { result_a };
        assert!(matches!(loser.unwrap_err(), DbError::StockExhausted { .. }));

        // Never negative: the last unit is gone, full stop
        assert_eq!(
            db.inventory().remaining(&fixture.runner_id, 42).await.unwrap(),
            Some(0)
        );
    }
}
