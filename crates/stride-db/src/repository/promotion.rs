//! # Promotion Repository
//!
//! Promotion lookup by redemption code.
//!
//! Validity (active flag, time window) is business logic and lives in
//! `stride_core::Promotion::is_valid_at` - this repository only fetches.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stride_core::Promotion;

/// Repository for promotion database operations.
#[derive(Debug, Clone)]
pub struct PromotionRepository {
    pool: SqlitePool,
}

const PROMOTION_COLUMNS: &str = "id, code, discount_type, discount_value, \
                                 max_discount_cents, starts_at, ends_at, active";

impl PromotionRepository {
    /// Creates a new PromotionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PromotionRepository { pool }
    }

    /// Gets a promotion by its code.
    ///
    /// Codes are case-sensitive: SQLite compares TEXT with binary
    /// collation by default, so 'Summer10' and 'SUMMER10' are distinct.
    ///
    /// ## Returns
    /// * `Ok(Some(Promotion))` - Code exists (validity NOT checked here)
    /// * `Ok(None)` - Unknown code
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Promotion>> {
        debug!(code = %code, "Looking up promotion");

        let promotion = sqlx::query_as::<_, Promotion>(&format!(
            "SELECT {PROMOTION_COLUMNS} FROM promotions WHERE code = ?1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(promotion)
    }

    /// Inserts a promotion.
    pub async fn insert(&self, promotion: &Promotion) -> DbResult<()> {
        debug!(code = %promotion.code, "Inserting promotion");

        sqlx::query(
            r#"
            INSERT INTO promotions (
                id, code, discount_type, discount_value,
                max_discount_cents, starts_at, ends_at, active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&promotion.id)
        .bind(&promotion.code)
        .bind(promotion.discount_type)
        .bind(promotion.discount_value)
        .bind(promotion.max_discount_cents)
        .bind(promotion.starts_at)
        .bind(promotion.ends_at)
        .bind(promotion.active)
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
    use crate::test_support::{seed_catalog, seed_promotion};
    use stride_core::DiscountType;

    #[tokio::test]
    async fn test_get_by_code_roundtrip() {
        let (db, _) = seed_catalog().await;
        seed_promotion(&db, "SUMMER10", DiscountType::Percentage, 10, Some(2000), true).await;

        let promo = db.promotions().get_by_code("SUMMER10").await.unwrap().unwrap();
        assert_eq!(promo.code, "SUMMER10");
        assert_eq!(promo.discount_type, DiscountType::Percentage);
        assert_eq!(promo.discount_value, 10);
        assert_eq!(promo.max_discount_cents, Some(2000));
        assert!(promo.active);
    }

    #[tokio::test]
    async fn test_codes_are_case_sensitive() {
        let (db, _) = seed_catalog().await;
        seed_promotion(&db, "Summer10", DiscountType::Percentage, 10, None, true).await;

        assert!(db.promotions().get_by_code("Summer10").await.unwrap().is_some());
        assert!(db.promotions().get_by_code("SUMMER10").await.unwrap().is_none());
        assert!(db.promotions().get_by_code("summer10").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_code_is_rejected() {
        let (db, _) = seed_catalog().await;
        seed_promotion(&db, "ONCE", DiscountType::FixedAmount, 500, None, true).await;

        let promo = db.promotions().get_by_code("ONCE").await.unwrap().unwrap();
        let err = db.promotions().insert(&promo).await.unwrap_err();
        assert!(matches!(err, crate::error::DbError::UniqueViolation { .. }));
    }
}
