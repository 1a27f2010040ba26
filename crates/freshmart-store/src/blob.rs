//! # Blob Storage
//!
//! Filesystem-backed storage for product and banner images.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Blob Storage Layout                                │
//! │                                                                         │
//! │  <root>/                          (BlobStore::new root dir)            │
//! │  ├── products/                                                          │
//! │  │   ├── 7f3a...e1.jpg   ← one file per product, keyed by record ID    │
//! │  │   └── 91cc...04.png                                                  │
//! │  └── banners/                                                           │
//! │      └── 2be0...7a.webp                                                 │
//! │                                                                         │
//! │  Public URL:  /blobs/products/7f3a...e1.jpg                            │
//! │  Disk path:   <root>/products/7f3a...e1.jpg                            │
//! │                                                                         │
//! │  Re-uploading for the same record overwrites in place, so a record     │
//! │  never accumulates more than one image per extension.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deletion takes the stored URL, not a path: the store owns the mapping
//! both ways and rejects URLs it did not mint.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// URL prefix under which the API serves stored blobs.
pub const BLOB_URL_PREFIX: &str = "/blobs";

/// Which collection an image belongs to. Determines its subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    Product,
    Banner,
}

impl BlobKind {
    /// Subdirectory name under the blob root.
    pub fn dir(&self) -> &'static str {
        match self {
            BlobKind::Product => "products",
            BlobKind::Banner => "banners",
        }
    }

    /// Parses the subdirectory name back to a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "products" => Some(BlobKind::Product),
            "banners" => Some(BlobKind::Banner),
            _ => None,
        }
    }
}

/// Filesystem blob store.
///
/// Cloning is cheap; the store is just a root path.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Creates a store rooted at `root`. The directory tree is created
    /// lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        BlobStore { root: root.into() }
    }

    /// The root directory blobs are stored under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes an image and returns its public URL.
    ///
    /// The file is keyed by the owning record's ID, so a second upload for
    /// the same record and extension overwrites the first.
    ///
    /// ## Arguments
    /// * `kind` - Which collection the image belongs to
    /// * `id` - Owning record's ID (a UUID)
    /// * `ext` - File extension without the dot ("jpg", "png", "webp")
    /// * `bytes` - Image content
    pub async fn put(
        &self,
        kind: BlobKind,
        id: &str,
        ext: &str,
        bytes: &[u8],
    ) -> StoreResult<String> {
        validate_component(id)?;
        validate_component(ext)?;

        let dir = self.root.join(kind.dir());
        tokio::fs::create_dir_all(&dir).await?;

        let filename = format!("{id}.{}", ext.to_lowercase());
        let path = dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        info!(path = %path.display(), size = bytes.len(), "Blob stored");
        Ok(format!("{BLOB_URL_PREFIX}/{}/{filename}", kind.dir()))
    }

    /// Deletes the blob behind a previously returned URL.
    ///
    /// ## Errors
    /// * `StoreError::ForeignBlobUrl` - URL was not minted by this store
    /// * `StoreError::NotFound` - file already gone
    pub async fn delete_url(&self, url: &str) -> StoreResult<()> {
        let path = self.resolve_url(url)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Blob deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::not_found("Blob", url))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the blob behind a previously returned URL.
    ///
    /// ## Errors
    /// * `StoreError::ForeignBlobUrl` - URL was not minted by this store
    /// * `StoreError::NotFound` - no file at that URL
    pub async fn read_url(&self, url: &str) -> StoreResult<Vec<u8>> {
        let path = self.resolve_url(url)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::not_found("Blob", url))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a URL points into this store.
    pub fn owns_url(&self, url: &str) -> bool {
        self.resolve_url(url).is_ok()
    }

    /// Maps a public URL back to a disk path, rejecting anything that is
    /// not exactly `/blobs/<kind>/<file>` with safe components.
    fn resolve_url(&self, url: &str) -> StoreResult<PathBuf> {
        let foreign = || StoreError::ForeignBlobUrl(url.to_string());

        let rest = url
            .strip_prefix(BLOB_URL_PREFIX)
            .and_then(|r| r.strip_prefix('/'))
            .ok_or_else(foreign)?;

        let (dir, file) = rest.split_once('/').ok_or_else(foreign)?;
        BlobKind::parse(dir).ok_or_else(foreign)?;

        if file.is_empty() || file.contains('/') || !is_safe_component(file) {
            return Err(foreign());
        }

        Ok(self.root.join(dir).join(file))
    }
}

/// Allows only characters that cannot change path meaning.
fn is_safe_component(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
        && !s.contains("..")
}

fn validate_component(s: &str) -> StoreResult<()> {
    if is_safe_component(s) && !s.contains('.') {
        Ok(())
    } else {
        Err(StoreError::Blob(format!("unsafe path component: '{s}'")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_blobs() -> (tempfile::TempDir, BlobStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_put_returns_public_url() {
        let (_dir, store) = test_blobs();

        let url = store
            .put(BlobKind::Product, "abc-123", "jpg", b"fake image")
            .await
            .unwrap();

        assert_eq!(url, "/blobs/products/abc-123.jpg");
        let on_disk = store.root().join("products/abc-123.jpg");
        assert_eq!(std::fs::read(on_disk).unwrap(), b"fake image");
    }

    #[tokio::test]
    async fn test_put_overwrites_same_record() {
        let (_dir, store) = test_blobs();

        store
            .put(BlobKind::Banner, "b1", "png", b"first")
            .await
            .unwrap();
        let url = store
            .put(BlobKind::Banner, "b1", "png", b"second")
            .await
            .unwrap();

        assert_eq!(url, "/blobs/banners/b1.png");
        let on_disk = store.root().join("banners/b1.png");
        assert_eq!(std::fs::read(on_disk).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_read_url_returns_stored_bytes() {
        let (_dir, store) = test_blobs();

        let url = store
            .put(BlobKind::Product, "abc-123", "jpg", b"fake image")
            .await
            .unwrap();

        assert_eq!(store.read_url(&url).await.unwrap(), b"fake image");
        assert!(matches!(
            store.read_url("/blobs/products/missing.jpg").await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_url_roundtrip() {
        let (_dir, store) = test_blobs();

        let url = store
            .put(BlobKind::Product, "abc-123", "jpg", b"fake image")
            .await
            .unwrap();
        store.delete_url(&url).await.unwrap();

        assert!(matches!(
            store.delete_url(&url).await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_foreign_urls_rejected() {
        let (_dir, store) = test_blobs();

        for url in [
            "https://example.com/image.jpg",
            "/other/products/a.jpg",
            "/blobs/unknown/a.jpg",
            "/blobs/products/../../etc/passwd",
            "/blobs/products/",
        ] {
            assert!(
                matches!(
                    store.delete_url(url).await.unwrap_err(),
                    StoreError::ForeignBlobUrl(_)
                ),
                "expected rejection for {url}"
            );
            assert!(!store.owns_url(url));
        }
    }

    #[tokio::test]
    async fn test_unsafe_components_rejected() {
        let (_dir, store) = test_blobs();

        let err = store
            .put(BlobKind::Product, "../escape", "jpg", b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Blob(_)));

        let err = store
            .put(BlobKind::Product, "ok-id", "j/pg", b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Blob(_)));
    }
}
