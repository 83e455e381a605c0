//! # Route Table
//!
//! The explicit, data-described route table of the storefront, built and
//! registered once at startup. Handlers are thin: extract, call the
//! service, serialize.
//!
//! ## Routes
//! ```text
//! GET  /health                      liveness probe
//! GET  /api/products                best sellers
//! GET  /api/products/new            newest products
//! GET  /api/products/popular        most viewed products
//! POST /api/products/filter         multi-criteria filter → page
//! GET  /api/products/search         keyword search → page + found flag
//! GET  /api/products/{id}           product detail (counts the view)
//! GET  /api/products/{id}/sizes     purchasable sizes
//! GET  /api/brands                  brand listing
//! GET  /api/categories              category listing
//! GET  /api/promotions/check        promotion code check
//! POST /api/orders                  create order (X-User-Id required)
//! GET  /api/orders/{id}             order with items
//! ```

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use stride_core::pagination::PageResult;
use stride_core::{Brand, Category, CreateOrderRequest, FilterRequest, Order, OrderItem, ProductSummary};

use crate::error::ApiResult;
use crate::identity::UserId;
use crate::services::catalog::ProductDetail;
use crate::services::promotion::PromotionQuote;
use crate::state::AppState;

/// Builds the storefront router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/products", get(best_sellers))
        .route("/api/products/new", get(newest))
        .route("/api/products/popular", get(most_viewed))
        .route("/api/products/filter", post(filter_products))
        .route("/api/products/search", get(search_products))
        .route("/api/products/{id}", get(product_detail))
        .route("/api/products/{id}/sizes", get(available_sizes))
        .route("/api/brands", get(brands))
        .route("/api/categories", get(categories))
        .route("/api/promotions/check", get(check_promotion))
        .route("/api/orders", post(create_order))
        .route("/api/orders/{id}", get(get_order))
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

async fn health() -> &'static str {
    "ok"
}

// =============================================================================
// Catalog Read Paths
// =============================================================================

async fn best_sellers(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductSummary>>> {
    Ok(Json(state.catalog.best_sellers().await?))
}

async fn newest(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductSummary>>> {
    Ok(Json(state.catalog.newest().await?))
}

async fn most_viewed(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductSummary>>> {
    Ok(Json(state.catalog.most_viewed().await?))
}

async fn filter_products(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> ApiResult<Json<PageResult<ProductSummary>>> {
    Ok(Json(state.catalog.filter(&request).await?))
}

/// Query parameters for keyword search. Both are optional: an absent
/// keyword matches everything, an absent page means page 1.
#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default)]
    page: Option<i64>,
}

/// A page of search results plus the found flag (derived from item-list
/// emptiness - zero matches is not an error).
#[derive(Debug, Serialize)]
struct SearchResponse {
    #[serde(flatten)]
    page: PageResult<ProductSummary>,
    found: bool,
}

async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    let keyword = params.keyword.unwrap_or_default();
    let page = state
        .catalog
        .search(&keyword, params.page.unwrap_or(1))
        .await?;

    Ok(Json(SearchResponse {
        found: !page.items.is_empty(),
        page,
    }))
}

async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductDetail>> {
    Ok(Json(state.catalog.product_detail(&id).await?))
}

async fn available_sizes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<i64>>> {
    Ok(Json(state.availability.available_sizes(&id).await?))
}

async fn brands(State(state): State<AppState>) -> ApiResult<Json<Vec<Brand>>> {
    Ok(Json(state.catalog.brands().await?))
}

async fn categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.categories().await?))
}

// =============================================================================
// Promotions
// =============================================================================

#[derive(Debug, Deserialize)]
struct CheckPromotionParams {
    #[serde(default)]
    code: Option<String>,
}

async fn check_promotion(
    State(state): State<AppState>,
    Query(params): Query<CheckPromotionParams>,
) -> ApiResult<Json<PromotionQuote>> {
    // A missing code takes the same invalid-code path as an empty one
    let code = params.code.unwrap_or_default();
    Ok(Json(state.promotions.check(&code).await?))
}

// =============================================================================
// Orders
// =============================================================================

/// Response body for order creation: the new order id.
#[derive(Debug, Serialize)]
struct CreateOrderResponse {
    order_id: String,
}

async fn create_order(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(request): Json<CreateOrderRequest>,
) -> ApiResult<Json<CreateOrderResponse>> {
    let order_id = state.orders.create_order(&user_id, &request).await?;
    Ok(Json(CreateOrderResponse { order_id }))
}

#[derive(Debug, Serialize)]
struct OrderResponse {
    #[serde(flatten)]
    order: Order,
    items: Vec<OrderItem>,
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OrderResponse>> {
    let (order, items) = state.orders.get_order(&id).await?;
    Ok(Json(OrderResponse { order, items }))
}
