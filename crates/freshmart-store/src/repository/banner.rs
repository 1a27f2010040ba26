//! # Banner Repository
//!
//! Database operations for homepage promo banners.
//!
//! Banners are a small collection (the admin API caps it at five), so
//! every listing returns the full set, newest first. The cap itself is
//! policy and lives at the API boundary, not here.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use freshmart_core::types::{Banner, CreateBanner, UpdateBanner};

/// Repository for banner database operations.
#[derive(Debug, Clone)]
pub struct BannerRepository {
    pool: SqlitePool,
}

impl BannerRepository {
    /// Creates a new BannerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BannerRepository { pool }
    }

    /// Inserts a new banner and returns it with generated ID and timestamp.
    pub async fn create(&self, input: CreateBanner) -> StoreResult<Banner> {
        let banner = Banner {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            image_url: input.image_url,
            link: input.link,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO banners (id, title, description, image_url, link, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&banner.id)
        .bind(&banner.title)
        .bind(&banner.description)
        .bind(&banner.image_url)
        .bind(&banner.link)
        .bind(banner.created_at)
        .execute(&self.pool)
        .await?;

        debug!(id = %banner.id, title = %banner.title, "Banner created");
        Ok(banner)
    }

    /// Gets a banner by its ID.
    pub async fn get(&self, id: &str) -> StoreResult<Option<Banner>> {
        let row = sqlx::query("SELECT * FROM banners WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_banner).transpose()
    }

    /// Lists all banners, newest first.
    pub async fn list(&self) -> StoreResult<Vec<Banner>> {
        let rows = sqlx::query("SELECT * FROM banners ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(row_to_banner).collect()
    }

    /// Counts stored banners.
    pub async fn count(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM banners")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    /// Applies a partial update and returns the updated banner.
    ///
    /// ## Errors
    /// `StoreError::NotFound` when no banner has this ID.
    pub async fn update(&self, id: &str, patch: UpdateBanner) -> StoreResult<Banner> {
        let mut banner = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Banner", id))?;

        if let Some(title) = patch.title {
            banner.title = title;
        }
        if let Some(description) = patch.description {
            banner.description = description;
        }
        if let Some(image_url) = patch.image_url {
            banner.image_url = image_url;
        }
        if let Some(link) = patch.link {
            banner.link = link;
        }

        let result = sqlx::query(
            r#"
            UPDATE banners
            SET title = ?2, description = ?3, image_url = ?4, link = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&banner.id)
        .bind(&banner.title)
        .bind(&banner.description)
        .bind(&banner.image_url)
        .bind(&banner.link)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Banner", id));
        }

        debug!(id = %banner.id, "Banner updated");
        Ok(banner)
    }

    /// Deletes a banner by ID.
    ///
    /// ## Errors
    /// `StoreError::NotFound` when no banner has this ID.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM banners WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Banner", id));
        }

        debug!(id = %id, "Banner deleted");
        Ok(())
    }
}

/// Maps a database row to a Banner.
fn row_to_banner(row: SqliteRow) -> StoreResult<Banner> {
    Ok(Banner {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        link: row.try_get("link")?,
        created_at: row.try_get("created_at")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};

    fn sample(title: &str) -> CreateBanner {
        CreateBanner {
            title: title.to_string(),
            description: format!("{title} promo"),
            image_url: format!("/blobs/banners/{title}.jpg"),
            link: "/products".to_string(),
        }
    }

    async fn test_store() -> Store {
        Store::connect(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_list_roundtrip() {
        let store = test_store().await;
        let repo = store.banners();

        let created = repo.create(sample("Summer Sale")).await.unwrap();
        let listed = repo.list().await.unwrap();

        assert_eq!(listed, vec![created]);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_patches_link() {
        let store = test_store().await;
        let repo = store.banners();

        let created = repo.create(sample("Summer Sale")).await.unwrap();

        let patch = UpdateBanner {
            link: Some("/products/mango".to_string()),
            ..UpdateBanner::default()
        };
        let updated = repo.update(&created.id, patch).await.unwrap();

        assert_eq!(updated.link, "/products/mango");
        assert_eq!(updated.title, "Summer Sale");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = test_store().await;

        let err = store.banners().delete("no-such-id").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = test_store().await;
        assert!(store.banners().get("no-such-id").await.unwrap().is_none());
    }
}
