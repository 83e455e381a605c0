//! # Domain Types
//!
//! Core domain types used throughout the Stride storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Promotion    │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  code (unique)  │   │  id (UUID)      │       │
//! │  │  brand_id (FK)  │   │  discount_type  │   │  user_id        │       │
//! │  │  category_id    │   │  discount_value │   │  total_cents    │       │
//! │  │  price_cents    │   │  window+active  │   │  items[]        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SizeStock     │   │  Brand/Category │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  (product,size) │   │  id + name      │   │  price snapshot │       │
//! │  │  quantity ≥ 0   │   │  many-to-one    │   │  size, quantity │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity id is a UUID v4 string - immutable, generated at insert time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Size Range
// =============================================================================

/// The inclusive range of stocked shoe sizes.
///
/// Held by the components that need it (availability resolver, filter
/// engine, order validation) instead of living as a free global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: i64,
    pub max: i64,
}

impl SizeRange {
    /// Creates a size range. `min` and `max` are inclusive bounds.
    pub const fn new(min: i64, max: i64) -> Self {
        SizeRange { min, max }
    }

    /// Checks whether a size falls inside the range.
    #[inline]
    pub const fn contains(&self, size: i64) -> bool {
        size >= self.min && size <= self.max
    }
}

/// EU shoe sizes 35-42, the storefront's stocked assortment.
impl Default for SizeRange {
    fn default() -> Self {
        SizeRange::new(35, 42)
    }
}

// =============================================================================
// Brand / Category
// =============================================================================

/// A shoe brand. Referenced by products, never owned by them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Brand {
    pub id: String,
    pub name: String,
}

/// A product category (sneakers, running, ...). Referenced by products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Immutable after creation except `view_count` and `sold_count`, which
/// only ever increment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in listings and search.
    pub name: String,

    /// Brand this product belongs to.
    pub brand_id: String,

    /// Category this product belongs to.
    pub category_id: String,

    /// Base price in cents (smallest currency unit).
    pub price_cents: i64,

    /// How many times the product detail page was viewed.
    pub view_count: i64,

    /// Total units sold across all orders.
    pub sold_count: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A condensed product row for listings and page results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
}

// =============================================================================
// Size Inventory
// =============================================================================

/// Remaining units for one (product, size) pair.
///
/// Invariant: `quantity` never goes negative. A size is available iff
/// `quantity > 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SizeStock {
    pub product_id: String,
    pub size: i64,
    pub quantity: i64,
}

// =============================================================================
// Promotion
// =============================================================================

/// The shape of a promotion's discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the subtotal (50 = 50% off),
    /// capped at `max_discount_cents`.
    Percentage,
    /// `discount_value` is an absolute amount in cents, never more than
    /// the subtotal itself.
    FixedAmount,
}

/// A promotion redeemable by code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Promotion {
    pub id: String,

    /// Redemption code. Unique and case-sensitive.
    pub code: String,

    pub discount_type: DiscountType,

    /// Percent points for [`DiscountType::Percentage`], cents for
    /// [`DiscountType::FixedAmount`].
    pub discount_value: i64,

    /// Cap on the computed discount, in cents. `None` = uncapped.
    /// Only consulted for percentage promotions.
    pub max_discount_cents: Option<i64>,

    /// Start of the validity window (inclusive).
    pub starts_at: DateTime<Utc>,

    /// End of the validity window (inclusive).
    pub ends_at: DateTime<Utc>,

    /// Kill switch; an inactive promotion never applies.
    pub active: bool,
}

impl Promotion {
    /// Checks whether the promotion can be applied at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.active && now >= self.starts_at && now <= self.ends_at
    }

    /// Computes the discount this promotion grants on `subtotal`.
    ///
    /// ## Rules
    /// - Percentage: `subtotal × value / 100`, capped at `max_discount_cents`
    /// - Fixed amount: `min(value, subtotal)` - a discount never exceeds
    ///   what it discounts
    pub fn discount_on(&self, subtotal: Money) -> Money {
        match self.discount_type {
            DiscountType::Percentage => {
                let raw = subtotal.percentage(self.discount_value);
                match self.max_discount_cents {
                    Some(cap) => raw.min(Money::from_cents(cap)),
                    None => raw,
                }
            }
            DiscountType::FixedAmount => Money::from_cents(self.discount_value).min(subtotal),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A committed order.
///
/// Created exactly once per successful orchestration call and never
/// mutated afterwards; fulfilment is someone else's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    /// The promotion code that was applied, if any.
    pub promotion_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A line item in an order.
///
/// Uses the snapshot pattern: name and unit price are copied at order
/// time so later catalog edits never alter historical orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Product name at order time (frozen).
    pub name_snapshot: String,
    /// Chosen shoe size.
    pub size: i64,
    /// Units ordered.
    pub quantity: i64,
    /// Unit price in cents at order time (frozen).
    pub unit_price_cents: i64,
    /// `unit_price × quantity`.
    pub line_total_cents: i64,
}

// =============================================================================
// Order Request Types
// =============================================================================

/// One (product, size, quantity) line of an incoming order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub size: i64,
    pub quantity: i64,
}

/// An incoming order request. The buyer identity is NOT part of the
/// request body; it arrives separately from the (out-of-scope) auth layer
/// and is passed into the orchestrator explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub promotion_code: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn promo(discount_type: DiscountType, value: i64, cap: Option<i64>) -> Promotion {
        Promotion {
            id: "promo-1".to_string(),
            code: "WELCOME".to_string(),
            discount_type,
            discount_value: value,
            max_discount_cents: cap,
            starts_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap(),
            active: true,
        }
    }

    #[test]
    fn test_size_range_contains() {
        let range = SizeRange::default();
        assert_eq!(range.min, 35);
        assert_eq!(range.max, 42);
        assert!(range.contains(35));
        assert!(range.contains(42));
        assert!(!range.contains(34));
        assert!(!range.contains(43));
    }

    #[test]
    fn test_percentage_discount_capped() {
        // 50% of $100.00 is $50.00, but the cap limits it to $20.00
        let promo = promo(DiscountType::Percentage, 50, Some(2000));
        let discount = promo.discount_on(Money::from_cents(10000));
        assert_eq!(discount.cents(), 2000);
    }

    #[test]
    fn test_percentage_discount_below_cap() {
        // 10% of $100.00 is $10.00, under the $20.00 cap
        let promo = promo(DiscountType::Percentage, 10, Some(2000));
        let discount = promo.discount_on(Money::from_cents(10000));
        assert_eq!(discount.cents(), 1000);
    }

    #[test]
    fn test_percentage_discount_uncapped() {
        let promo = promo(DiscountType::Percentage, 50, None);
        let discount = promo.discount_on(Money::from_cents(10000));
        assert_eq!(discount.cents(), 5000);
    }

    #[test]
    fn test_fixed_discount_never_exceeds_subtotal() {
        let promo = promo(DiscountType::FixedAmount, 5000, None);
        // Subtotal smaller than the fixed amount: clamp to subtotal
        assert_eq!(promo.discount_on(Money::from_cents(3000)).cents(), 3000);
        // Subtotal larger: full fixed amount applies
        assert_eq!(promo.discount_on(Money::from_cents(8000)).cents(), 5000);
    }

    #[test]
    fn test_promotion_window() {
        let promo = promo(DiscountType::Percentage, 10, None);

        let inside = Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap();
        assert!(promo.is_valid_at(inside));

        let before = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert!(!promo.is_valid_at(before));

        let after = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
        assert!(!promo.is_valid_at(after));
    }

    #[test]
    fn test_inactive_promotion_is_never_valid() {
        let mut promo = promo(DiscountType::Percentage, 10, None);
        promo.active = false;
        let inside = Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap();
        assert!(!promo.is_valid_at(inside));
    }
}
