//! Serves stored image blobs.
//!
//! The upload endpoint returns URLs under `/blobs/`; this handler is the
//! other half of that contract. The blob store re-validates the path, so a
//! request for anything outside its root is a 404, never a file read.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use freshmart_store::{StoreError, BLOB_URL_PREFIX};

/// GET /blobs/{kind}/{file}
pub async fn serve(
    State(state): State<AppState>,
    Path((kind, file)): Path<(String, String)>,
) -> ApiResult<(HeaderMap, Vec<u8>)> {
    let url = format!("{BLOB_URL_PREFIX}/{kind}/{file}");
    let bytes = state.blobs.read_url(&url).await.map_err(|e| match e {
        StoreError::NotFound { .. } | StoreError::ForeignBlobUrl(_) => {
            ApiError::NotFound("Image".to_string())
        }
        other => other.into(),
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type(&file)),
    );
    Ok((headers, bytes))
}

/// Content type from the stored file's extension. Uploads restrict the
/// extension alphabet but not the set of extensions, hence the fallback.
fn content_type(file: &str) -> &'static str {
    match file.rsplit_once('.').map(|(_, ext)| ext) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type("a.jpg"), "image/jpeg");
        assert_eq!(content_type("a.jpeg"), "image/jpeg");
        assert_eq!(content_type("a.png"), "image/png");
        assert_eq!(content_type("a.webp"), "image/webp");
        assert_eq!(content_type("noext"), "application/octet-stream");
    }
}
