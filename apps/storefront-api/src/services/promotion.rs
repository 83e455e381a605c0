//! # Promotion Service
//!
//! Validates promotion codes and quotes their discount shape.
//!
//! ## One Rejection Path
//! Empty, unknown, inactive, and expired codes all fail with the same
//! invalid-code error. A lookup miss is deliberately NOT distinguishable
//! from a dormant code, so valid-but-inactive codes cannot be enumerated.

use chrono::Utc;
use serde::Serialize;
use stride_core::{CoreError, CoreResult, DiscountType, Promotion};
use stride_db::PromotionRepository;
use tracing::debug;

use super::store_error;

/// The discount shape returned to clients checking a code.
#[derive(Debug, Clone, Serialize)]
pub struct PromotionQuote {
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub max_discount_cents: Option<i64>,
}

impl From<&Promotion> for PromotionQuote {
    fn from(promotion: &Promotion) -> Self {
        PromotionQuote {
            discount_type: promotion.discount_type,
            discount_value: promotion.discount_value,
            max_discount_cents: promotion.max_discount_cents,
        }
    }
}

/// Validates promotion codes.
#[derive(Debug, Clone)]
pub struct PromotionService {
    promotions: PromotionRepository,
}

impl PromotionService {
    /// Creates the service.
    pub fn new(promotions: PromotionRepository) -> Self {
        PromotionService { promotions }
    }

    /// Resolves a code to an applicable promotion.
    ///
    /// Used by both the check endpoint and the order orchestrator so the
    /// two paths share exactly one rejection taxonomy.
    pub async fn resolve(&self, code: &str) -> CoreResult<Promotion> {
        if code.trim().is_empty() {
            return Err(CoreError::InvalidPromotion);
        }

        let promotion = self
            .promotions
            .get_by_code(code)
            .await
            .map_err(store_error)?
            .ok_or(CoreError::InvalidPromotion)?;

        if !promotion.is_valid_at(Utc::now()) {
            debug!(code = %code, "Promotion exists but is not applicable");
            return Err(CoreError::InvalidPromotion);
        }

        Ok(promotion)
    }

    /// Validates a code and quotes its discount shape.
    pub async fn check(&self, code: &str) -> CoreResult<PromotionQuote> {
        let promotion = self.resolve(code).await?;
        Ok(PromotionQuote::from(&promotion))
    }
}
