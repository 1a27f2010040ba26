//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Filtered, sorted, paged listings for the storefront and admin tables
//! - Substring search over name and description
//! - CRUD for the admin dashboard
//!
//! ## Tags Column
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Tag Filtering Works                              │
//! │                                                                         │
//! │  products.tags holds a JSON array:  '["fruit","seasonal"]'             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  json_each(products.tags) unnests it into rows                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EXISTS (SELECT 1 FROM json_each(products.tags)                        │
//! │          WHERE value = 'fruit' COLLATE NOCASE)                         │
//! │                                                                         │
//! │  A tag has no identity of its own, so there is no tags table to join.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use freshmart_core::types::{CreateProduct, Product, ProductFilter, SortBy, SortOrder, UpdateProduct};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let page = repo.list(&ProductFilter::default()).await?;
/// let hit = repo.get("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and returns it with generated ID and timestamps.
    pub async fn create(&self, input: CreateProduct) -> StoreResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            price_cents: input.price_cents,
            image_url: input.image_url,
            tags: input.tags,
            is_hot: input.is_hot,
            is_seasonal: input.is_seasonal,
            seasonal_end_date: input.seasonal_end_date,
            created_at: now,
            updated_at: now,
        };

        let tags_json = serde_json::to_string(&product.tags)
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO products
                (id, name, description, price_cents, image_url, tags,
                 is_hot, is_seasonal, seasonal_end_date, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.image_url)
        .bind(&tags_json)
        .bind(product.is_hot)
        .bind(product.is_seasonal)
        .bind(product.seasonal_end_date)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        debug!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        let row = sqlx::query("SELECT * FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_product).transpose()
    }

    /// Lists products matching a filter, sorted and paged.
    pub async fn list(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let mut builder = QueryBuilder::new("SELECT * FROM products WHERE 1=1");
        push_filter_clauses(&mut builder, filter);

        let (column, direction) = sort_terms(filter);
        builder.push(format!(" ORDER BY {} {}", column, direction));

        // LIMIT -1 is SQLite for "no limit"; OFFSET needs a LIMIT clause.
        builder.push(" LIMIT ");
        builder.push_bind(filter.limit.map(i64::from).unwrap_or(-1));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(filter.offset.unwrap_or(0)));

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(row_to_product).collect()
    }

    /// Counts products matching a filter (ignoring paging).
    ///
    /// Used together with [`list`](Self::list) to compute pagination state.
    pub async fn count(&self, filter: &ProductFilter) -> StoreResult<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products WHERE 1=1");
        push_filter_clauses(&mut builder, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count as u64)
    }

    /// Searches products by substring match on name and description.
    ///
    /// Matching is case-insensitive. `%` and `_` in the query are treated
    /// literally, not as wildcards.
    pub async fn search(&self, query: &str, limit: u32) -> StoreResult<Vec<Product>> {
        debug!(query = %query, limit = %limit, "Searching products");

        let pattern = format!("%{}%", escape_like(query));

        let rows = sqlx::query(
            r#"
            SELECT * FROM products
            WHERE name LIKE ?1 ESCAPE '\' OR description LIKE ?1 ESCAPE '\'
            ORDER BY name
            LIMIT ?2
            "#,
        )
        .bind(&pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Search returned products");
        rows.into_iter().map(row_to_product).collect()
    }

    /// Applies a partial update and returns the updated product.
    ///
    /// Unset fields keep their stored values. `updated_at` always advances.
    ///
    /// ## Errors
    /// `StoreError::NotFound` when no product has this ID.
    pub async fn update(&self, id: &str, patch: UpdateProduct) -> StoreResult<Product> {
        let mut product = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price_cents) = patch.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(image_url) = patch.image_url {
            product.image_url = image_url;
        }
        if let Some(tags) = patch.tags {
            product.tags = tags;
        }
        if let Some(is_hot) = patch.is_hot {
            product.is_hot = is_hot;
        }
        if let Some(is_seasonal) = patch.is_seasonal {
            product.is_seasonal = is_seasonal;
        }
        if let Some(seasonal_end_date) = patch.seasonal_end_date {
            product.seasonal_end_date = seasonal_end_date;
        }
        product.updated_at = Utc::now();

        let tags_json = serde_json::to_string(&product.tags)
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?2, description = ?3, price_cents = ?4, image_url = ?5,
                tags = ?6, is_hot = ?7, is_seasonal = ?8, seasonal_end_date = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.image_url)
        .bind(&tags_json)
        .bind(product.is_hot)
        .bind(product.is_seasonal)
        .bind(product.seasonal_end_date)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", id));
        }

        debug!(id = %product.id, "Product updated");
        Ok(product)
    }

    /// Deletes a product by ID.
    ///
    /// ## Errors
    /// `StoreError::NotFound` when no product has this ID.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", id));
        }

        debug!(id = %id, "Product deleted");
        Ok(())
    }

    /// Counts products flagged as hot. Used by the admin stats endpoint.
    pub async fn count_hot(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_hot = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

// =============================================================================
// Query Construction Helpers
// =============================================================================

/// Appends the filter's WHERE clauses to a builder.
///
/// Shared between `list` and `count` so both always agree on which rows
/// are in the result set.
fn push_filter_clauses(builder: &mut QueryBuilder<'_, sqlx::Sqlite>, filter: &ProductFilter) {
    if let Some(tag) = &filter.tag {
        builder.push(
            " AND EXISTS (SELECT 1 FROM json_each(products.tags) WHERE value = ",
        );
        builder.push_bind(tag.clone());
        builder.push(" COLLATE NOCASE)");
    }

    if let Some(is_hot) = filter.is_hot {
        builder.push(" AND is_hot = ");
        builder.push_bind(is_hot);
    }

    if let Some(is_seasonal) = filter.is_seasonal {
        builder.push(" AND is_seasonal = ");
        builder.push_bind(is_seasonal);
    }
}

/// Resolves the filter's sort selection to SQL terms.
///
/// Column and direction come from a fixed enum, never from user text, so
/// interpolating them into the statement is safe.
fn sort_terms(filter: &ProductFilter) -> (&'static str, &'static str) {
    let column = match filter.sort_by {
        SortBy::CreatedAt => "created_at",
        SortBy::Price => "price_cents",
    };
    let direction = match filter.sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    (column, direction)
}

/// Escapes LIKE wildcards in user-entered search text.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Maps a database row to a Product, decoding the JSON tags column.
fn row_to_product(row: SqliteRow) -> StoreResult<Product> {
    let id: String = row.try_get("id")?;

    let tags_json: String = row.try_get("tags")?;
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| StoreError::corrupt("Product", &id, format!("bad tags JSON: {e}")))?;

    Ok(Product {
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price_cents: row.try_get("price_cents")?,
        image_url: row.try_get("image_url")?,
        tags,
        is_hot: row.try_get("is_hot")?,
        is_seasonal: row.try_get("is_seasonal")?,
        seasonal_end_date: row.try_get::<Option<DateTime<Utc>>, _>("seasonal_end_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        id,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};

    fn sample(name: &str, price_cents: i64, tags: &[&str]) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price_cents,
            image_url: format!("/blobs/products/{name}.jpg"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_hot: false,
            is_seasonal: false,
            seasonal_end_date: None,
        }
    }

    async fn test_store() -> Store {
        Store::connect(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let store = test_store().await;
        let repo = store.products();

        let created = repo.create(sample("Basmati Rice", 1299, &["grains"])).await.unwrap();
        let fetched = repo.get(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.tags, vec!["grains"]);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = test_store().await;
        assert!(store.products().get("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_tag_case_insensitive() {
        let store = test_store().await;
        let repo = store.products();

        repo.create(sample("Mango", 350, &["Fruit"])).await.unwrap();
        repo.create(sample("Rice", 1299, &["grains"])).await.unwrap();

        let filter = ProductFilter {
            tag: Some("fruit".to_string()),
            ..ProductFilter::default()
        };
        let hits = repo.list(&filter).await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Mango");
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_sorts_by_price() {
        let store = test_store().await;
        let repo = store.products();

        repo.create(sample("Rice", 1299, &["grains"])).await.unwrap();
        repo.create(sample("Mango", 350, &["fruit"])).await.unwrap();

        let filter = ProductFilter {
            sort_by: SortBy::Price,
            sort_order: SortOrder::Asc,
            ..ProductFilter::default()
        };
        let hits = repo.list(&filter).await.unwrap();

        assert_eq!(hits[0].name, "Mango");
        assert_eq!(hits[1].name, "Rice");
    }

    #[tokio::test]
    async fn test_list_paging() {
        let store = test_store().await;
        let repo = store.products();

        for i in 0..5 {
            repo.create(sample(&format!("Item {i}"), 100 + i, &["misc"]))
                .await
                .unwrap();
        }

        let filter = ProductFilter {
            sort_by: SortBy::Price,
            sort_order: SortOrder::Asc,
            limit: Some(2),
            offset: Some(2),
            ..ProductFilter::default()
        };
        let page = repo.list(&filter).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "Item 2");
        assert_eq!(repo.count(&filter).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_search_matches_name_and_description() {
        let store = test_store().await;
        let repo = store.products();

        repo.create(sample("Basmati Rice", 1299, &["grains"])).await.unwrap();
        repo.create(sample("Mango", 350, &["fruit"])).await.unwrap();

        let hits = repo.search("rice", 20).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Basmati Rice");

        // "description" appears in every sample description
        let hits = repo.search("description", 20).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let store = test_store().await;
        let repo = store.products();

        repo.create(sample("Mango", 350, &["fruit"])).await.unwrap();

        assert!(repo.search("%", 20).await.unwrap().is_empty());
        assert!(repo.search("_ango", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_patches_only_set_fields() {
        let store = test_store().await;
        let repo = store.products();

        let created = repo.create(sample("Mango", 350, &["fruit"])).await.unwrap();

        let patch = UpdateProduct {
            price_cents: Some(425),
            is_hot: Some(true),
            ..UpdateProduct::default()
        };
        let updated = repo.update(&created.id, patch).await.unwrap();

        assert_eq!(updated.price_cents, 425);
        assert!(updated.is_hot);
        assert_eq!(updated.name, "Mango");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_can_clear_seasonal_end_date() {
        let store = test_store().await;
        let repo = store.products();

        let mut input = sample("Peach", 500, &["fruit"]);
        input.is_seasonal = true;
        input.seasonal_end_date = Some(Utc::now());
        let created = repo.create(input).await.unwrap();

        let patch = UpdateProduct {
            seasonal_end_date: Some(None),
            ..UpdateProduct::default()
        };
        let updated = repo.update(&created.id, patch).await.unwrap();

        assert_eq!(updated.seasonal_end_date, None);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = test_store().await;

        let err = store
            .products()
            .update("no-such-id", UpdateProduct::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_product() {
        let store = test_store().await;
        let repo = store.products();

        let created = repo.create(sample("Mango", 350, &["fruit"])).await.unwrap();
        repo.delete(&created.id).await.unwrap();

        assert!(repo.get(&created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&created.id).await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_count_hot() {
        let store = test_store().await;
        let repo = store.products();

        let mut input = sample("Mango", 350, &["fruit"]);
        input.is_hot = true;
        repo.create(input).await.unwrap();
        repo.create(sample("Rice", 1299, &["grains"])).await.unwrap();

        assert_eq!(repo.count_hot().await.unwrap(), 1);
    }
}
