//! # Order Service
//!
//! The order orchestrator - the storefront's only write path.
//!
//! ## Orchestration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_order(user_id, request)                       │
//! │                                                                         │
//! │  1. VALIDATE REQUEST SHAPE                                             │
//! │     └── line count, sizes in range, quantities positive                │
//! │                                                                         │
//! │  2. PER LINE (optimistic pre-filter, fast feedback)                    │
//! │     ├── resolve product            → NotFound                          │
//! │     ├── size ∈ available set?      → SizeUnavailable                   │
//! │     ├── quantity ≤ remaining?      → InsufficientStock                 │
//! │     └── snapshot name + unit price                                     │
//! │                                                                         │
//! │  3. PROMOTION (optional)                                               │
//! │     └── invalid code fails the WHOLE order - no partial discount       │
//! │                                                                         │
//! │  4. ATOMIC COMMIT (authoritative guard)                                │
//! │     └── conditional decrements + inserts in one transaction;           │
//! │         concurrent exhaustion → Conflict, store unchanged              │
//! │                                                                         │
//! │  5. Return the new order id                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use stride_core::types::SizeRange;
use stride_core::validation::validate_order_request;
use stride_core::{CoreError, CoreResult, CreateOrderRequest, Money, Order, OrderItem};
use stride_db::repository::order::{generate_order_id, generate_order_item_id};
use stride_db::{CatalogRepository, InventoryRepository, OrderRepository};
use tracing::{debug, info};

use super::promotion::PromotionService;
use super::store_error;

/// Orchestrates order creation.
#[derive(Debug, Clone)]
pub struct OrderService {
    catalog: CatalogRepository,
    inventory: InventoryRepository,
    orders: OrderRepository,
    promotions: PromotionService,
    size_range: SizeRange,
}

impl OrderService {
    /// Creates the service.
    pub fn new(
        catalog: CatalogRepository,
        inventory: InventoryRepository,
        orders: OrderRepository,
        promotions: PromotionService,
        size_range: SizeRange,
    ) -> Self {
        OrderService {
            catalog,
            inventory,
            orders,
            promotions,
            size_range,
        }
    }

    /// Creates an order for an already-authenticated buyer.
    ///
    /// `user_id` arrives as an explicit argument from the auth layer;
    /// this service never reaches into ambient state to discover the
    /// caller.
    ///
    /// ## Returns
    /// The id of the newly persisted order.
    pub async fn create_order(
        &self,
        user_id: &str,
        request: &CreateOrderRequest,
    ) -> CoreResult<String> {
        validate_order_request(request, &self.size_range)?;

        let order_id = generate_order_id();
        let mut items = Vec::with_capacity(request.items.len());
        let mut subtotal = Money::zero();

        for line in &request.items {
            let product = self
                .catalog
                .get_product(&line.product_id)
                .await
                .map_err(store_error)?
                .ok_or_else(|| CoreError::not_found("product", &line.product_id))?;

            // Optimistic availability check for fast rejection; the
            // conditional decrement at commit time is what actually
            // guards the stock
            let available = self
                .inventory
                .available_sizes(&line.product_id, &self.size_range)
                .await
                .map_err(store_error)?;
            if !available.contains(&line.size) {
                return Err(CoreError::SizeUnavailable {
                    product_id: line.product_id.clone(),
                    size: line.size,
                });
            }

            let remaining = self
                .inventory
                .remaining(&line.product_id, line.size)
                .await
                .map_err(store_error)?
                .unwrap_or(0);
            if line.quantity > remaining {
                return Err(CoreError::InsufficientStock {
                    product_id: line.product_id.clone(),
                    size: line.size,
                    available: remaining,
                    requested: line.quantity,
                });
            }

            // Snapshot name and unit price so later catalog edits never
            // alter this order
            let unit_price = product.price();
            let line_total = unit_price.multiply_quantity(line.quantity);
            subtotal += line_total;

            items.push(OrderItem {
                id: generate_order_item_id(),
                order_id: order_id.clone(),
                product_id: line.product_id.clone(),
                name_snapshot: product.name.clone(),
                size: line.size,
                quantity: line.quantity,
                unit_price_cents: unit_price.cents(),
                line_total_cents: line_total.cents(),
            });
        }

        // A supplied-but-invalid code fails the whole order; there is no
        // best-effort discount
        let (discount, applied_code) = match &request.promotion_code {
            Some(code) => {
                let promotion = self.promotions.resolve(code).await?;
                let discount = promotion.discount_on(subtotal);
                debug!(code = %promotion.code, discount = %discount, "Promotion applied");
                (discount, Some(promotion.code))
            }
            None => (Money::zero(), None),
        };

        let total = subtotal.saturating_sub_discount(discount);
        let order = Order {
            id: order_id.clone(),
            user_id: user_id.to_string(),
            subtotal_cents: subtotal.cents(),
            discount_cents: discount.cents(),
            total_cents: total.cents(),
            promotion_code: applied_code,
            created_at: Utc::now(),
        };

        self.orders
            .create(&order, &items)
            .await
            .map_err(store_error)?;

        info!(
            order_id = %order_id,
            user_id = %user_id,
            lines = items.len(),
            total = %total,
            "Order created"
        );

        Ok(order_id)
    }

    /// Fetches an order with its items.
    pub async fn get_order(&self, order_id: &str) -> CoreResult<(Order, Vec<OrderItem>)> {
        let order = self
            .orders
            .get_by_id(order_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| CoreError::not_found("order", order_id))?;

        let items = self
            .orders
            .get_items(order_id)
            .await
            .map_err(store_error)?;

        Ok((order, items))
    }
}
