//! # User Repository
//!
//! Database operations for admin accounts.
//!
//! Accounts are created out of band (by the seed binary or an operator);
//! the API only ever reads them to verify a sign-in. Lookups are by email,
//! normalized to lowercase.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use freshmart_core::types::{AdminUser, UserRole};

/// Repository for admin account operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new account.
    ///
    /// The caller supplies an already-computed argon2 hash; plaintext
    /// passwords never reach this layer.
    ///
    /// ## Errors
    /// `StoreError::UniqueViolation` when the email is already registered.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> StoreResult<AdminUser> {
        let user = AdminUser {
            id: Uuid::new_v4().to_string(),
            email: email.trim().to_lowercase(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        debug!(id = %user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// Finds an account by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<AdminUser>> {
        let normalized = email.trim().to_lowercase();

        let row = sqlx::query("SELECT * FROM users WHERE email = ?1")
            .bind(&normalized)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_user).transpose()
    }

    /// Gets an account by ID. Used to resolve a session back to a profile.
    pub async fn get(&self, id: &str) -> StoreResult<Option<AdminUser>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_user).transpose()
    }
}

/// Maps a database row to an AdminUser, rejecting unknown role strings.
fn row_to_user(row: SqliteRow) -> StoreResult<AdminUser> {
    let id: String = row.try_get("id")?;

    let role_str: String = row.try_get("role")?;
    let role = UserRole::parse(&role_str)
        .ok_or_else(|| StoreError::corrupt("User", &id, format!("unknown role '{role_str}'")))?;

    Ok(AdminUser {
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role,
        created_at: row.try_get("created_at")?,
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

    async fn test_store() -> Store {
        Store::connect(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let store = test_store().await;
        let repo = store.users();

        let created = repo
            .create("Admin@Freshmart.example", "$argon2id$fake", UserRole::Admin)
            .await
            .unwrap();

        // Stored lowercased, found case-insensitively
        assert_eq!(created.email, "admin@freshmart.example");
        let found = repo
            .find_by_email("ADMIN@freshmart.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = test_store().await;
        let repo = store.users();

        repo.create("admin@freshmart.example", "$argon2id$fake", UserRole::Admin)
            .await
            .unwrap();
        let err = repo
            .create("admin@freshmart.example", "$argon2id$other", UserRole::Admin)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = test_store().await;
        let repo = store.users();

        let created = repo
            .create("admin@freshmart.example", "$argon2id$fake", UserRole::Admin)
            .await
            .unwrap();

        let fetched = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, created.email);
        assert!(repo.get("no-such-id").await.unwrap().is_none());
    }
}
