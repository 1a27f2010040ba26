//! Admin endpoints: product/banner CRUD, image uploads, dashboard stats.
//!
//! Create endpoints validate the submitted form with the same
//! [`FormState`] rules the dashboard runs client-side, so a request that
//! bypasses the UI fails with the identical field errors. Update endpoints
//! accept partial payloads and validate only the fields present.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::auth::AdminSession;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use freshmart_core::error::{CoreError, ValidationError};
use freshmart_core::form::{FieldRule, FormState, FormValues};
use freshmart_core::money::Money;
use freshmart_core::types::{
    Analytics, Banner, CreateBanner, CreateProduct, Product, ProductFilter, UpdateBanner,
    UpdateProduct,
};
use freshmart_core::validation::{
    validate_banner_title, validate_description, validate_image_size, validate_internal_link,
    validate_product_name, validate_tags,
};
use freshmart_core::{MAX_BANNERS, MAX_BANNER_IMAGE_BYTES, MAX_PRODUCT_IMAGE_BYTES};
use freshmart_store::BlobKind;

// =============================================================================
// Form Parsing
// =============================================================================

fn require_object(body: Value) -> Result<FormValues, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::BadRequest("Expected a JSON object".to_string())),
    }
}

/// Price field check shared by the product form and product patches.
///
/// The dashboard submits price as entered, a decimal string like "12.99";
/// zero and negative amounts never pass.
fn parse_positive_price(value: &Value) -> Option<Money> {
    let money = Money::parse(value.as_str()?).ok()?;
    money.is_positive().then_some(money)
}

/// The product form, rules matching the dashboard's product dialog.
fn product_form(values: FormValues) -> FormState {
    FormState::new(values)
        .rule("name", FieldRule::required("Name is required"))
        .rule("description", FieldRule::required("Description is required"))
        .rule(
            "price",
            FieldRule::new("Price must be greater than zero", |v| {
                parse_positive_price(v).is_some()
            }),
        )
        .rule("image_url", FieldRule::required("Image is required"))
        .rule(
            "tags",
            FieldRule::new("Add at least one tag", |v| {
                v.as_array().is_some_and(|tags| {
                    !tags.is_empty()
                        && tags
                            .iter()
                            .all(|t| t.as_str().is_some_and(|s| !s.trim().is_empty()))
                })
            }),
        )
}

/// The banner form, rules matching the dashboard's banner dialog.
fn banner_form(values: FormValues) -> FormState {
    FormState::new(values)
        .rule("title", FieldRule::required("Title is required"))
        .rule("description", FieldRule::required("Description is required"))
        .rule("image_url", FieldRule::required("Image is required"))
        .rule(
            "link",
            FieldRule::new("Link must be an internal path like /products", |v| {
                v.as_str().is_some_and(|s| validate_internal_link(s).is_ok())
            }),
        )
}

fn str_field(values: &FormValues, field: &str) -> String {
    values
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn tags_field(values: &FormValues) -> Vec<String> {
    values
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(|t| t.trim().to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn date_field(values: &FormValues, field: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
    match values.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|_| ApiError::field(field, "Must be an RFC 3339 timestamp")),
    }
}

fn bool_field(values: &FormValues, field: &str) -> bool {
    values.get(field).and_then(Value::as_bool).unwrap_or(false)
}

/// Runs the detailed validators (length caps, per-tag rules) the coarse
/// form rules don't cover, accumulating per-field messages.
fn collect(errors: &mut BTreeMap<String, String>, field: &str, result: Result<(), ValidationError>) {
    if let Err(e) = result {
        errors.entry(field.to_string()).or_insert_with(|| e.to_string());
    }
}

fn parse_create_product(body: Value) -> Result<CreateProduct, ApiError> {
    let values = require_object(body)?;

    let mut form = product_form(values);
    if !form.validate_all() {
        return Err(ApiError::Validation(form.errors().clone()));
    }
    let values = form.values();

    let name = str_field(values, "name");
    let description = str_field(values, "description");
    let tags = tags_field(values);

    let mut errors = BTreeMap::new();
    collect(&mut errors, "name", validate_product_name(&name));
    collect(&mut errors, "description", validate_description(&description));
    collect(&mut errors, "tags", validate_tags(&tags));
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // The form rule already proved the price parses and is positive
    let price = values
        .get("price")
        .and_then(parse_positive_price)
        .ok_or_else(|| ApiError::field("price", "Price must be greater than zero"))?;

    Ok(CreateProduct {
        name,
        description,
        price_cents: price.cents(),
        image_url: str_field(values, "image_url"),
        tags,
        is_hot: bool_field(values, "is_hot"),
        is_seasonal: bool_field(values, "is_seasonal"),
        seasonal_end_date: date_field(values, "seasonal_end_date")?,
    })
}

fn parse_update_product(body: Value) -> Result<UpdateProduct, ApiError> {
    let values = require_object(body)?;
    let mut errors = BTreeMap::new();
    let mut patch = UpdateProduct::default();

    if values.contains_key("name") {
        let name = str_field(&values, "name");
        collect(&mut errors, "name", validate_product_name(&name));
        patch.name = Some(name);
    }
    if values.contains_key("description") {
        let description = str_field(&values, "description");
        collect(&mut errors, "description", validate_description(&description));
        patch.description = Some(description);
    }
    if let Some(value) = values.get("price") {
        match parse_positive_price(value) {
            Some(price) => patch.price_cents = Some(price.cents()),
            None => {
                errors.insert(
                    "price".to_string(),
                    "Price must be greater than zero".to_string(),
                );
            }
        }
    }
    if values.contains_key("image_url") {
        let image_url = str_field(&values, "image_url");
        if image_url.is_empty() {
            errors.insert("image_url".to_string(), "Image is required".to_string());
        }
        patch.image_url = Some(image_url);
    }
    if values.contains_key("tags") {
        let tags = tags_field(&values);
        collect(&mut errors, "tags", validate_tags(&tags));
        patch.tags = Some(tags);
    }
    if let Some(value) = values.get("is_hot") {
        patch.is_hot = value.as_bool();
    }
    if let Some(value) = values.get("is_seasonal") {
        patch.is_seasonal = value.as_bool();
    }
    if values.contains_key("seasonal_end_date") {
        patch.seasonal_end_date = Some(date_field(&values, "seasonal_end_date")?);
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok(patch)
}

fn parse_create_banner(body: Value) -> Result<CreateBanner, ApiError> {
    let values = require_object(body)?;

    let mut form = banner_form(values);
    if !form.validate_all() {
        return Err(ApiError::Validation(form.errors().clone()));
    }
    let values = form.values();

    let title = str_field(values, "title");
    let description = str_field(values, "description");

    let mut errors = BTreeMap::new();
    collect(&mut errors, "title", validate_banner_title(&title));
    collect(&mut errors, "description", validate_description(&description));
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    Ok(CreateBanner {
        title,
        description,
        image_url: str_field(values, "image_url"),
        link: str_field(values, "link"),
    })
}

fn parse_update_banner(body: Value) -> Result<UpdateBanner, ApiError> {
    let values = require_object(body)?;
    let mut errors = BTreeMap::new();
    let mut patch = UpdateBanner::default();

    if values.contains_key("title") {
        let title = str_field(&values, "title");
        collect(&mut errors, "title", validate_banner_title(&title));
        patch.title = Some(title);
    }
    if values.contains_key("description") {
        let description = str_field(&values, "description");
        collect(&mut errors, "description", validate_description(&description));
        patch.description = Some(description);
    }
    if values.contains_key("image_url") {
        let image_url = str_field(&values, "image_url");
        if image_url.is_empty() {
            errors.insert("image_url".to_string(), "Image is required".to_string());
        }
        patch.image_url = Some(image_url);
    }
    if values.contains_key("link") {
        let link = str_field(&values, "link");
        collect(&mut errors, "link", validate_internal_link(&link));
        patch.link = Some(link);
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok(patch)
}

// =============================================================================
// Product Handlers
// =============================================================================

/// POST /api/admin/products
pub async fn create_product(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let input = parse_create_product(body)?;
    let product = state.store.products().create(input).await?;

    info!(product_id = %product.id, admin = %session.email, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/admin/products/{id}
///
/// A changed image URL does not remove the old blob; re-uploads for the
/// same product overwrite in place, so orphans only arise when the
/// extension changes.
pub async fn update_product(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Product>> {
    let patch = parse_update_product(body)?;
    let product = state.store.products().update(&id, patch).await?;

    info!(product_id = %product.id, admin = %session.email, "Product updated");
    Ok(Json(product))
}

/// DELETE /api/admin/products/{id}
///
/// Removes the record first, then best-effort removes the image blob. A
/// failed blob delete leaves an orphan file, never a dangling record.
pub async fn delete_product(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let product = state
        .store
        .products()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product".to_string()))?;

    state.store.products().delete(&id).await?;

    if let Err(e) = state.blobs.delete_url(&product.image_url).await {
        warn!(product_id = %id, error = %e, "Product image not removed");
    }

    info!(product_id = %id, admin = %session.email, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Banner Handlers
// =============================================================================

/// POST /api/admin/banners
///
/// Enforces the five-banner cap. Checked here at the API boundary, not in
/// the database; two admins racing past the count can exceed it.
pub async fn create_banner(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Banner>)> {
    let input = parse_create_banner(body)?;

    let count = state.store.banners().count().await?;
    if count as usize >= MAX_BANNERS {
        return Err(CoreError::BannerLimitReached { max: MAX_BANNERS }.into());
    }

    let banner = state.store.banners().create(input).await?;

    info!(banner_id = %banner.id, admin = %session.email, "Banner created");
    Ok((StatusCode::CREATED, Json(banner)))
}

/// PUT /api/admin/banners/{id}
pub async fn update_banner(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Banner>> {
    let patch = parse_update_banner(body)?;
    let banner = state.store.banners().update(&id, patch).await?;

    info!(banner_id = %banner.id, admin = %session.email, "Banner updated");
    Ok(Json(banner))
}

/// DELETE /api/admin/banners/{id}
pub async fn delete_banner(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let banner = state
        .store
        .banners()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Banner".to_string()))?;

    state.store.banners().delete(&id).await?;

    if let Err(e) = state.blobs.delete_url(&banner.image_url).await {
        warn!(banner_id = %id, error = %e, "Banner image not removed");
    }

    info!(banner_id = %id, admin = %session.email, "Banner deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Uploads
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// File extension without the dot. Defaults to "jpg".
    pub ext: Option<String>,
}

/// POST /api/admin/uploads/{kind}/{id}
///
/// Accepts raw image bytes and stores them keyed by the owning record's
/// ID. Products cap at 5 MB, banners at 10 MB.
pub async fn upload_image(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path((kind, id)): Path<(String, String)>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let kind = BlobKind::parse(&kind)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown upload kind '{kind}'")))?;

    let limit_bytes = match kind {
        BlobKind::Product => MAX_PRODUCT_IMAGE_BYTES,
        BlobKind::Banner => MAX_BANNER_IMAGE_BYTES,
    };
    validate_image_size(body.len(), limit_bytes).map_err(|e| match e {
        ValidationError::TooLarge { .. } => ApiError::PayloadTooLarge { limit_bytes },
        other => ApiError::field("image", other.to_string()),
    })?;

    let ext = params.ext.as_deref().unwrap_or("jpg");
    let url = state
        .blobs
        .put(kind, &id, ext, &body)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    info!(%url, size = body.len(), admin = %session.email, "Image uploaded");
    Ok(Json(serde_json::json!({ "url": url })))
}

// =============================================================================
// Stats
// =============================================================================

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    AdminSession(_session): AdminSession,
) -> ApiResult<Json<Analytics>> {
    let products = state.store.products();

    let total_products = products.count(&ProductFilter::default()).await? as i64;
    let hot_products = products.count_hot().await? as i64;
    let total_banners = state.store.banners().count().await? as i64;

    Ok(Json(Analytics {
        total_products,
        total_banners,
        hot_products,
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_body() -> Value {
        json!({
            "name": "Mango",
            "description": "Sweet ripe mangoes",
            "price": "3.50",
            "image_url": "/blobs/products/x.jpg",
            "tags": ["fruit"],
            "is_hot": true
        })
    }

    #[test]
    fn test_parse_create_product_happy_path() {
        let input = parse_create_product(product_body()).unwrap();
        assert_eq!(input.name, "Mango");
        assert_eq!(input.price_cents, 350);
        assert_eq!(input.tags, vec!["fruit"]);
        assert!(input.is_hot);
        assert!(!input.is_seasonal);
        assert_eq!(input.seasonal_end_date, None);
    }

    #[test]
    fn test_parse_create_product_collects_field_errors() {
        let body = json!({
            "name": "",
            "description": "ok",
            "price": "0",
            "image_url": "/blobs/products/x.jpg",
            "tags": []
        });

        let err = parse_create_product(body).unwrap_err();
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.get("name").map(String::as_str), Some("Name is required"));
        assert_eq!(
            fields.get("price").map(String::as_str),
            Some("Price must be greater than zero")
        );
        assert_eq!(fields.get("tags").map(String::as_str), Some("Add at least one tag"));
        // Valid fields carry no error
        assert!(!fields.contains_key("description"));
    }

    #[test]
    fn test_parse_update_product_only_patches_present_fields() {
        let patch = parse_update_product(json!({ "price": "4.25" })).unwrap();
        assert_eq!(patch.price_cents, Some(425));
        assert_eq!(patch.name, None);
        assert_eq!(patch.seasonal_end_date, None);
    }

    #[test]
    fn test_parse_update_product_rejects_bad_price() {
        let err = parse_update_product(json!({ "price": "-1" })).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_parse_update_product_clears_seasonal_date() {
        let patch = parse_update_product(json!({ "seasonal_end_date": null })).unwrap();
        assert_eq!(patch.seasonal_end_date, Some(None));
    }

    #[test]
    fn test_parse_create_banner_rejects_external_link() {
        let body = json!({
            "title": "Summer Sale",
            "description": "Fresh fruit deals",
            "image_url": "/blobs/banners/x.jpg",
            "link": "https://elsewhere.example"
        });

        let err = parse_create_banner(body).unwrap_err();
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("link"));
    }

    #[test]
    fn test_parse_create_banner_happy_path() {
        let body = json!({
            "title": "Summer Sale",
            "description": "Fresh fruit deals",
            "image_url": "/blobs/banners/x.jpg",
            "link": "/products"
        });

        let input = parse_create_banner(body).unwrap();
        assert_eq!(input.link, "/products");
    }
}
