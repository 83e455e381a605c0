//! # Catalog Repository
//!
//! Database operations for products, brands, and categories.
//!
//! ## Key Operations
//! - Multi-criteria filter query (brand/category/size/price + pagination)
//! - Case-insensitive keyword search
//! - Listing rails (newest, best-selling, most-viewed)
//! - Monotonic counter increments (views, units sold)
//!
//! ## Filter Query Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SELECT ... FROM products p                                             │
//! │  WHERE p.price_cents BETWEEN :min AND :max                              │
//! │    AND p.brand_id    IN (...)          ← only if the set is non-empty  │
//! │    AND p.category_id IN (...)          ← only if the set is non-empty  │
//! │    AND EXISTS (SELECT 1 FROM product_sizes ps                           │
//! │                WHERE ps.product_id = p.id                               │
//! │                  AND ps.quantity > 0                                    │
//! │                  AND ps.size IN (...))  ← only if the set is non-empty  │
//! │  ORDER BY p.created_at DESC, p.id                                       │
//! │  LIMIT :page_size OFFSET :offset                                        │
//! │                                                                         │
//! │  This mirrors stride_core::filter::CatalogFilter::matches exactly.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stride_core::filter::CatalogFilter;
use stride_core::pagination::{page_window, PageResult};
use stride_core::{Brand, Category, Product, ProductSummary};

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

const SUMMARY_COLUMNS: &str = "p.id, p.name, p.price_cents";

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_product(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, brand_id, category_id, price_cents,
                   view_count, sold_count, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Runs the multi-criteria catalog filter and returns one page.
    ///
    /// The filter must already be normalized (price defaults resolved,
    /// negative bounds rejected) - see `FilterRequest::normalize`.
    pub async fn filter(
        &self,
        filter: &CatalogFilter,
        page_size: i64,
    ) -> DbResult<PageResult<ProductSummary>> {
        debug!(
            brands = filter.brand_ids.len(),
            categories = filter.category_ids.len(),
            sizes = filter.sizes.len(),
            page = filter.page,
            "Filtering products"
        );

        let mut count_query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM products p");
        push_filter_conditions(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let (total_pages, window) = page_window(total, filter.page, page_size);
        let Some(window) = window else {
            return Ok(PageResult::empty(total_pages, filter.page));
        };

        let mut item_query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {SUMMARY_COLUMNS} FROM products p"));
        push_filter_conditions(&mut item_query, filter);
        item_query.push(" ORDER BY p.created_at DESC, p.id LIMIT ");
        item_query.push_bind(window.limit);
        item_query.push(" OFFSET ");
        item_query.push_bind(window.offset);

        let items = item_query
            .build_query_as::<ProductSummary>()
            .fetch_all(&self.pool)
            .await?;

        debug!(total, returned = items.len(), "Filter returned products");
        Ok(PageResult::new(items, total_pages, filter.page))
    }

    /// Searches products whose name contains the keyword, ignoring ASCII
    /// case (SQLite's default LIKE semantics).
    ///
    /// An empty keyword matches every product. Zero matches is a normal
    /// empty page, never an error.
    pub async fn search(
        &self,
        keyword: &str,
        page: i64,
        page_size: i64,
    ) -> DbResult<PageResult<ProductSummary>> {
        let pattern = format!("%{}%", escape_like(keyword.trim()));

        debug!(keyword = %keyword, page, "Searching products");

        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM products WHERE name LIKE ?1 ESCAPE '\'"#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let (total_pages, window) = page_window(total, page, page_size);
        let Some(window) = window else {
            return Ok(PageResult::empty(total_pages, page));
        };

        let items = sqlx::query_as::<_, ProductSummary>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS} FROM products p
            WHERE p.name LIKE ?1 ESCAPE '\'
            ORDER BY p.created_at DESC, p.id
            LIMIT ?2 OFFSET ?3
            "#
        ))
        .bind(&pattern)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(PageResult::new(items, total_pages, page))
    }

    /// Lists the top `limit` products by units sold.
    pub async fn best_sellers(&self, limit: i64) -> DbResult<Vec<ProductSummary>> {
        self.rail("p.sold_count DESC, p.id", limit).await
    }

    /// Lists the `limit` most recently added products.
    pub async fn newest(&self, limit: i64) -> DbResult<Vec<ProductSummary>> {
        self.rail("p.created_at DESC, p.id", limit).await
    }

    /// Lists the top `limit` products by detail-page views.
    pub async fn most_viewed(&self, limit: i64) -> DbResult<Vec<ProductSummary>> {
        self.rail("p.view_count DESC, p.id", limit).await
    }

    /// Shared query for the listing rails. `order_by` is one of the three
    /// fixed clauses above, never user input.
    async fn rail(&self, order_by: &str, limit: i64) -> DbResult<Vec<ProductSummary>> {
        let items = sqlx::query_as::<_, ProductSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM products p ORDER BY {order_by} LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists products from the same category, excluding the product itself.
    pub async fn related_products(
        &self,
        product_id: &str,
        limit: i64,
    ) -> DbResult<Vec<ProductSummary>> {
        let items = sqlx::query_as::<_, ProductSummary>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS} FROM products p
            WHERE p.category_id = (SELECT category_id FROM products WHERE id = ?1)
              AND p.id != ?1
            ORDER BY p.sold_count DESC, p.id
            LIMIT ?2
            "#
        ))
        .bind(product_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists all brands, ordered by name.
    pub async fn list_brands(&self) -> DbResult<Vec<Brand>> {
        let brands = sqlx::query_as::<_, Brand>("SELECT id, name FROM brands ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(brands)
    }

    /// Lists all categories, ordered by name.
    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    // =========================================================================
    // Counter Increments
    // =========================================================================

    /// Increments a product's view counter.
    ///
    /// Delta update, not read-modify-write: concurrent detail views never
    /// lose increments.
    pub async fn increment_view_count(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE products SET view_count = view_count + 1 WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", id));
        }

        Ok(())
    }

    // =========================================================================
    // Writes (catalog administration / seeding)
    // =========================================================================

    /// Inserts a brand.
    pub async fn insert_brand(&self, brand: &Brand) -> DbResult<()> {
        sqlx::query("INSERT INTO brands (id, name) VALUES (?1, ?2)")
            .bind(&brand.id)
            .bind(&brand.name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Inserts a category.
    pub async fn insert_category(&self, category: &Category) -> DbResult<()> {
        sqlx::query("INSERT INTO categories (id, name) VALUES (?1, ?2)")
            .bind(&category.id)
            .bind(&category.name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Inserts a product.
    pub async fn insert_product(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, brand_id, category_id, price_cents,
                view_count, sold_count, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.brand_id)
        .bind(&product.category_id)
        .bind(product.price_cents)
        .bind(product.view_count)
        .bind(product.sold_count)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Appends the WHERE clause matching `CatalogFilter::matches`.
///
/// Every condition is appended with bound parameters; set conditions are
/// skipped entirely when the set is empty (empty = no restriction).
fn push_filter_conditions(query: &mut QueryBuilder<Sqlite>, filter: &CatalogFilter) {
    query.push(" WHERE p.price_cents >= ").push_bind(filter.min_price);
    query.push(" AND p.price_cents <= ").push_bind(filter.max_price);

    if !filter.brand_ids.is_empty() {
        query.push(" AND p.brand_id IN (");
        let mut ids = query.separated(", ");
        for id in &filter.brand_ids {
            ids.push_bind(id.clone());
        }
        ids.push_unseparated(")");
    }

    if !filter.category_ids.is_empty() {
        query.push(" AND p.category_id IN (");
        let mut ids = query.separated(", ");
        for id in &filter.category_ids {
            ids.push_bind(id.clone());
        }
        ids.push_unseparated(")");
    }

    if !filter.sizes.is_empty() {
        query.push(
            " AND EXISTS (SELECT 1 FROM product_sizes ps \
             WHERE ps.product_id = p.id AND ps.quantity > 0 AND ps.size IN (",
        );
        let mut sizes = query.separated(", ");
        for size in &filter.sizes {
            sizes.push_bind(*size);
        }
        sizes.push_unseparated("))");
    }
}

/// Escapes LIKE wildcards in user-supplied keywords.
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Helper to generate a new catalog entity id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to build a product with fresh id and timestamps.
pub fn new_product(name: &str, brand_id: &str, category_id: &str, price_cents: i64) -> Product {
    Product {
        id: generate_id(),
        name: name.to_string(),
        brand_id: brand_id.to_string(),
        category_id: category_id.to_string(),
        price_cents,
        view_count: 0,
        sold_count: 0,
        created_at: Utc::now(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seed_catalog;
    use stride_core::FilterRequest;

    #[tokio::test]
    async fn test_filter_by_available_size() {
        let (db, fixture) = seed_catalog().await;

        // Only "Runner 2" has size 40 in stock
        let request = FilterRequest {
            sizes: vec![40],
            ..FilterRequest::default()
        };
        let filter = request.normalize().unwrap();
        let page = db.catalog().filter(&filter, 12).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, fixture.runner_id);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
    }

    #[tokio::test]
    async fn test_filter_results_satisfy_all_predicates() {
        let (db, fixture) = seed_catalog().await;

        let request = FilterRequest {
            brand_ids: vec![fixture.brand_id.clone()],
            min_price: Some(0),
            max_price: Some(9000),
            ..FilterRequest::default()
        };
        let filter = request.normalize().unwrap();
        let page = db.catalog().filter(&filter, 12).await.unwrap();

        assert!(!page.items.is_empty());
        for summary in &page.items {
            let product = db.catalog().get_product(&summary.id).await.unwrap().unwrap();
            let sizes = db
                .inventory()
                .available_sizes(&summary.id, &stride_core::SizeRange::default())
                .await
                .unwrap();
            assert!(filter.matches(&product, &sizes));
        }
    }

    #[tokio::test]
    async fn test_filter_page_out_of_range_is_empty_not_error() {
        let (db, _) = seed_catalog().await;

        let request = FilterRequest {
            page: 0,
            ..FilterRequest::default()
        };
        let page = db
            .catalog()
            .filter(&request.normalize().unwrap(), 12)
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 0);

        let request = FilterRequest {
            page: 99,
            ..FilterRequest::default()
        };
        let page = db
            .catalog()
            .filter(&request.normalize().unwrap(), 12)
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 99);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let (db, fixture) = seed_catalog().await;

        let page = db.catalog().search("runner", 1, 12).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, fixture.runner_id);

        // No match is an empty page, not an error
        let page = db.catalog().search("sandal", 1, 12).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_search_empty_keyword_matches_all() {
        let (db, _) = seed_catalog().await;

        let page = db.catalog().search("", 1, 12).await.unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn test_search_escapes_like_wildcards() {
        let (db, _) = seed_catalog().await;

        // A literal '%' must not act as a match-everything wildcard
        let page = db.catalog().search("%", 1, 12).await.unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_increment_view_count() {
        let (db, fixture) = seed_catalog().await;

        db.catalog().increment_view_count(&fixture.runner_id).await.unwrap();
        db.catalog().increment_view_count(&fixture.runner_id).await.unwrap();

        let product = db
            .catalog()
            .get_product(&fixture.runner_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.view_count, 2);

        let err = db.catalog().increment_view_count("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_related_products_share_category() {
        let (db, fixture) = seed_catalog().await;

        let related = db
            .catalog()
            .related_products(&fixture.runner_id, 5)
            .await
            .unwrap();
        // The fixture's second product is in the same category
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, fixture.court_id);
    }
}
