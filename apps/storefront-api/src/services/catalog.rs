//! # Catalog Service
//!
//! The catalog read paths: multi-criteria filtering, keyword search, the
//! home-page listing rails, and the product detail view.

use serde::Serialize;
use stride_core::pagination::PageResult;
use stride_core::types::SizeRange;
use stride_core::{Brand, Category, CoreError, CoreResult, FilterRequest, Product, ProductSummary};
use stride_db::{CatalogRepository, InventoryRepository};
use tracing::debug;

use super::store_error;

/// Number of products on each home-page rail (newest, best sellers,
/// most viewed) and in the related-products strip.
const RAIL_LIMIT: i64 = 5;

/// A product detail view: the product plus everything the product page
/// needs to decide whether (and in which size) it can be bought.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    /// Ascending purchasable sizes; empty means sold out everywhere.
    pub available_sizes: Vec<i64>,
    /// Derived from `available_sizes` emptiness.
    pub can_buy: bool,
    /// Products from the same category, best sellers first.
    pub related: Vec<ProductSummary>,
}

/// The catalog filter engine and read paths.
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog: CatalogRepository,
    inventory: InventoryRepository,
    page_size: i64,
    size_range: SizeRange,
}

impl CatalogService {
    /// Creates the service with its fixed page size and size range.
    pub fn new(
        catalog: CatalogRepository,
        inventory: InventoryRepository,
        page_size: i64,
        size_range: SizeRange,
    ) -> Self {
        CatalogService {
            catalog,
            inventory,
            page_size,
            size_range,
        }
    }

    /// Applies a multi-criteria filter and returns one page.
    ///
    /// Price defaults are resolved (missing min → 0, missing max →
    /// unbounded) and negative bounds rejected before any query runs.
    pub async fn filter(&self, request: &FilterRequest) -> CoreResult<PageResult<ProductSummary>> {
        let filter = request.normalize()?;

        self.catalog
            .filter(&filter, self.page_size)
            .await
            .map_err(store_error)
    }

    /// Case-insensitive substring search over product names.
    ///
    /// Zero matches is a normal empty page; callers derive the `found`
    /// flag from item emptiness.
    pub async fn search(
        &self,
        keyword: &str,
        page: i64,
    ) -> CoreResult<PageResult<ProductSummary>> {
        self.catalog
            .search(keyword, page, self.page_size)
            .await
            .map_err(store_error)
    }

    /// Top products by units sold.
    pub async fn best_sellers(&self) -> CoreResult<Vec<ProductSummary>> {
        self.catalog.best_sellers(RAIL_LIMIT).await.map_err(store_error)
    }

    /// Most recently added products.
    pub async fn newest(&self) -> CoreResult<Vec<ProductSummary>> {
        self.catalog.newest(RAIL_LIMIT).await.map_err(store_error)
    }

    /// Top products by detail-page views.
    pub async fn most_viewed(&self) -> CoreResult<Vec<ProductSummary>> {
        self.catalog.most_viewed(RAIL_LIMIT).await.map_err(store_error)
    }

    /// Assembles the product detail view and counts the visit.
    ///
    /// The view increment is a fire-on-read delta update; repeated views
    /// only ever push the counter up.
    pub async fn product_detail(&self, product_id: &str) -> CoreResult<ProductDetail> {
        let product = self
            .catalog
            .get_product(product_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| CoreError::not_found("product", product_id))?;

        self.catalog
            .increment_view_count(product_id)
            .await
            .map_err(store_error)?;

        let available_sizes = self
            .inventory
            .available_sizes(product_id, &self.size_range)
            .await
            .map_err(store_error)?;

        let related = self
            .catalog
            .related_products(product_id, RAIL_LIMIT)
            .await
            .map_err(store_error)?;

        debug!(product_id = %product_id, sizes = available_sizes.len(), "Assembled product detail");

        Ok(ProductDetail {
            can_buy: !available_sizes.is_empty(),
            product,
            available_sizes,
            related,
        })
    }

    /// All brands for the filter UI.
    pub async fn brands(&self) -> CoreResult<Vec<Brand>> {
        self.catalog.list_brands().await.map_err(store_error)
    }

    /// All categories for the filter UI.
    pub async fn categories(&self) -> CoreResult<Vec<Category>> {
        self.catalog.list_categories().await.map_err(store_error)
    }
}
