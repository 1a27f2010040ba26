//! API error types and HTTP mapping.
//!
//! Every handler returns `ApiResult<T>`; the `IntoResponse` impl turns
//! failures into a consistent JSON error body:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error → Status Mapping                              │
//! │                                                                         │
//! │  Validation { fields }   → 422  {"error": ..., "fields": {...}}        │
//! │  Unauthorized            → 401                                          │
//! │  Forbidden               → 403                                          │
//! │  NotFound                → 404                                          │
//! │  Conflict (banner cap,   → 409                                          │
//! │    duplicate email)                                                     │
//! │  PayloadTooLarge         → 413                                          │
//! │  Internal / store faults → 500  (details logged, not leaked)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;

use freshmart_core::error::CoreError;
use freshmart_store::StoreError;

/// API-level errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more fields failed validation. Keys are field names.
    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),

    /// Missing or invalid credentials / session token.
    #[error("{0}")]
    Unauthorized(String),

    /// Valid session but insufficient role.
    #[error("{0}")]
    Forbidden(String),

    /// Record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Request conflicts with current state (banner cap, duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// Upload exceeds the size cap for its kind.
    #[error("Payload too large: limit is {limit_bytes} bytes")]
    PayloadTooLarge { limit_bytes: usize },

    /// Malformed request outside field validation (bad ID, bad query).
    #[error("{0}")]
    BadRequest(String),

    /// Anything the client cannot fix.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Single-field validation failure.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        ApiError::Validation(fields)
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details go to the log, never to the client
        if let ApiError::Internal(detail) = &self {
            error!(%detail, "Internal error");
        }

        let body = match &self {
            ApiError::Validation(fields) => json!({
                "error": self.to_string(),
                "fields": fields,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, .. } => ApiError::NotFound(entity),
            StoreError::UniqueViolation { field, .. } => {
                ApiError::Conflict(format!("Duplicate value for {field}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BannerLimitReached { max } => {
                ApiError::Conflict(format!("Banner limit reached: at most {max} banners"))
            }
            CoreError::Validation(v) => ApiError::BadRequest(v.to_string()),
        }
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: ApiError = StoreError::not_found("Product", "x").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_banner_cap_maps_to_409() {
        let err: ApiError = CoreError::BannerLimitReached { max: 5 }.into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_field_helper_builds_validation() {
        let err = ApiError::field("name", "Name is required");
        let ApiError::Validation(fields) = &err else {
            panic!("expected validation");
        };
        assert_eq!(fields.get("name").map(String::as_str), Some("Name is required"));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
