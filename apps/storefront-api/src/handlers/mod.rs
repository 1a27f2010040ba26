//! HTTP request handlers.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront API Routes                           │
//! │                                                                         │
//! │  Public (no auth)                                                       │
//! │    GET  /api/health                    liveness + database check        │
//! │    GET  /api/products                  paged, filtered listing          │
//! │    GET  /api/products/{id}             one product                      │
//! │    GET  /api/search?q=                 substring search                 │
//! │    GET  /api/banners                   homepage banners                 │
//! │    GET  /blobs/{kind}/{file}           uploaded image bytes             │
//! │                                                                         │
//! │  Auth                                                                   │
//! │    POST /api/auth/sign-in              email/password → session token   │
//! │    POST /api/auth/sign-out             clear session cookie             │
//! │    GET  /api/auth/me                   profile behind the session       │
//! │                                                                         │
//! │  Admin (AdminSession required)                                          │
//! │    POST   /api/admin/products          create                           │
//! │    PUT    /api/admin/products/{id}     partial update                   │
//! │    DELETE /api/admin/products/{id}     delete record + image            │
//! │    POST   /api/admin/banners           create (cap: 5)                  │
//! │    PUT    /api/admin/banners/{id}      partial update                   │
//! │    DELETE /api/admin/banners/{id}      delete record + image            │
//! │    POST   /api/admin/uploads/{kind}/{id}   raw image bytes → url        │
//! │    GET    /api/admin/stats             dashboard counters               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod auth;
pub mod banners;
pub mod blobs;
pub mod products;

use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public storefront
        .route("/api/health", get(health))
        .route("/api/products", get(products::list))
        .route("/api/products/{id}", get(products::get_one))
        .route("/api/search", get(products::search))
        .route("/api/banners", get(banners::list))
        .route("/blobs/{kind}/{file}", get(blobs::serve))
        // Auth
        .route("/api/auth/sign-in", post(auth::sign_in))
        .route("/api/auth/sign-out", post(auth::sign_out))
        .route("/api/auth/me", get(auth::me))
        // Admin
        .route("/api/admin/products", post(admin::create_product))
        .route(
            "/api/admin/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route("/api/admin/banners", post(admin::create_banner))
        .route(
            "/api/admin/banners/{id}",
            put(admin::update_banner).delete(admin::delete_banner),
        )
        .route("/api/admin/uploads/{kind}/{id}", post(admin::upload_image))
        .route("/api/admin/stats", get(admin::stats))
        .with_state(state)
}

/// Liveness endpoint: reports whether the database answers.
async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = state.store.health_check().await;
    Json(json!({
        "status": if database { "ok" } else { "degraded" },
        "database": database,
    }))
}
