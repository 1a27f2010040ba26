//! Public product endpoints: listing, detail, search.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use freshmart_core::pagination::Pagination;
use freshmart_core::types::{Product, ProductFilter, SortBy, SortOrder};
use freshmart_core::validation::validate_search_query;
use freshmart_core::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_SEARCH_QUERY_LEN};

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// 1-based page number. Out-of-range values clamp.
    pub page: Option<u64>,
    /// Items per page, capped at [`MAX_PAGE_SIZE`].
    pub page_size: Option<u32>,
    pub tag: Option<String>,
    pub hot: Option<bool>,
    pub seasonal: Option<bool>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

/// One page of products plus the math to render the pager.
#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub pagination: Pagination,
}

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ProductPage>> {
    let page_size = params
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let mut filter = ProductFilter {
        tag: params.tag,
        is_hot: params.hot,
        is_seasonal: params.seasonal,
        sort_by: params.sort_by.unwrap_or_default(),
        sort_order: params.sort_order.unwrap_or_default(),
        limit: None,
        offset: None,
    };

    let total = state.store.products().count(&filter).await?;
    let pagination = Pagination::new(total, page_size as u64, params.page.unwrap_or(1));

    filter.limit = Some(page_size);
    filter.offset = Some(pagination.offset() as u32);

    let items = state.store.products().list(&filter).await?;
    debug!(total, page = pagination.current_page, "Listed products");

    Ok(Json(ProductPage { items, pagination }))
}

/// GET /api/products/{id}
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let product = state
        .store
        .products()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product".to_string()))?;

    Ok(Json(product))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub items: Vec<Product>,
}

/// GET /api/search?q=
///
/// Queries shorter than the minimum length return an empty result set
/// rather than an error; the search box clears as you delete characters.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResults>> {
    let query = validate_search_query(&params.q)
        .map_err(|e| ApiError::field("q", e.to_string()))?;

    if query.chars().count() < MIN_SEARCH_QUERY_LEN {
        return Ok(Json(SearchResults {
            query,
            items: Vec::new(),
        }));
    }

    let limit = params.limit.unwrap_or(MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let items = state.store.products().search(&query, limit).await?;

    Ok(Json(SearchResults { query, items }))
}
