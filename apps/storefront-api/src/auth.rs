//! JWT session handling.
//!
//! Sign-in verifies an argon2 password hash and issues a signed session
//! token. Protected handlers take an [`AdminSession`] extractor argument;
//! the extractor pulls the token from the `Authorization: Bearer` header
//! or the session cookie and rejects anything but a valid admin session.
//!
//! There is deliberately no ambient "current user" anywhere: identity is
//! resolved per request from the token it carried, so concurrent requests
//! can never observe each other's sign-in state.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cookie::{self, SESSION_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;
use freshmart_core::types::UserRole;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Account email
    pub email: String,

    /// Account role ("admin" or "user")
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT session token manager.
#[derive(Clone)]
pub struct JwtManager {
    secret: String,
    session_lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: String, session_lifetime_secs: i64) -> Self {
        JwtManager {
            secret,
            session_lifetime_secs,
        }
    }

    /// The configured session lifetime in seconds.
    pub fn session_lifetime_secs(&self) -> i64 {
        self.session_lifetime_secs
    }

    /// Generate a session token for a signed-in account.
    pub fn generate_session_token(
        &self,
        user_id: &str,
        email: &str,
        role: UserRole,
    ) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.session_lifetime_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("Failed to generate token: {e}")))
    }

    /// Validate and decode a session token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| ApiError::Unauthorized(format!("Invalid session token: {e}")))?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Verify a password against a stored argon2 hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))?;

    Ok(hash.to_string())
}

// =============================================================================
// Session Extractors
// =============================================================================

/// The authenticated session behind a request, any role.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

/// An authenticated session with the admin role. Handlers under
/// `/api/admin` take this as an argument; extraction failing is the 401/403.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

fn token_from_parts(parts: &Parts) -> Option<String> {
    // Bearer header wins; the cookie is the browser fallback
    if let Some(header) = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = extract_bearer_token(header) {
            return Some(token.to_string());
        }
    }

    parts
        .headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|header| cookie::get(header, SESSION_COOKIE))
}

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts)
            .ok_or_else(|| ApiError::Unauthorized("Missing session token".to_string()))?;

        let claims = state.jwt.validate_token(&token)?;

        let role = UserRole::parse(&claims.role)
            .ok_or_else(|| ApiError::Unauthorized("Unknown role in token".to_string()))?;

        Ok(Session {
            user_id: claims.sub,
            email: claims.email,
            role,
        })
    }
}

/// `Option<Session>` extraction: an absent or invalid session becomes
/// `None` instead of a rejection. Used by sign-out, which succeeds either
/// way.
impl OptionalFromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(
            <Session as FromRequestParts<AppState>>::from_request_parts(parts, state)
                .await
                .ok(),
        )
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session =
            <Session as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;

        if session.role != UserRole::Admin {
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }

        Ok(AdminSession(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret".to_string(), 3600);

        let token = manager
            .generate_session_token("user-001", "admin@freshmart.example", UserRole::Admin)
            .unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "user-001");
        assert_eq!(claims.email, "admin@freshmart.example");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = JwtManager::new("test-secret".to_string(), 3600);
        let other = JwtManager::new("other-secret".to_string(), 3600);

        let token = manager
            .generate_session_token("user-001", "admin@freshmart.example", UserRole::Admin)
            .unwrap();

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = JwtManager::new("test-secret".to_string(), -3600);

        let token = manager
            .generate_session_token("user-001", "admin@freshmart.example", UserRole::Admin)
            .unwrap();

        assert!(manager.validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
        assert!(!verify_password("hunter2", "not-a-hash"));
    }
}
