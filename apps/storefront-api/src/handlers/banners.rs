//! Public banner endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;
use freshmart_core::types::Banner;

#[derive(Debug, Serialize)]
pub struct BannerList {
    pub items: Vec<Banner>,
}

/// GET /api/banners
///
/// Returns every banner, newest first. The collection is capped at five
/// by the admin API, so there is no paging.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<BannerList>> {
    let items = state.store.banners().list().await?;
    Ok(Json(BannerList { items }))
}
