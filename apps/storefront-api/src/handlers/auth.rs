//! Sign-in, sign-out, and session introspection.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::{self, Session};
use crate::cookie;
use crate::error::{ApiError, ApiResult};
use crate::events::AuthEvent;
use crate::state::AppState;
use freshmart_core::types::UserProfile;
use freshmart_core::validation::validate_email;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: UserProfile,
}

/// POST /api/auth/sign-in
///
/// Verifies credentials and establishes a session both ways: the token in
/// the response body (for API clients) and a session cookie (for the
/// browser dashboard).
///
/// Wrong email and wrong password produce the same response; the API never
/// confirms whether an address has an account.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<(HeaderMap, Json<SignInResponse>)> {
    validate_email(&req.email).map_err(|e| ApiError::field("email", e.to_string()))?;
    if req.password.is_empty() {
        return Err(ApiError::field("password", "Password is required"));
    }

    let rejected = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .store
        .users()
        .find_by_email(&req.email)
        .await?
        .ok_or_else(rejected)?;

    if !auth::verify_password(&req.password, &user.password_hash) {
        warn!(email = %user.email, "Failed sign-in attempt");
        return Err(rejected());
    }

    let token = state
        .jwt
        .generate_session_token(&user.id, &user.email, user.role)?;

    let profile = user.profile();
    state
        .auth_events
        .publish(AuthEvent::SignedIn(profile.clone()));
    info!(user_id = %profile.id, "User signed in");

    let mut headers = HeaderMap::new();
    let cookie = cookie::session_cookie(
        &token,
        state.jwt.session_lifetime_secs(),
        state.config.secure_cookies,
    );
    headers.insert(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| ApiError::Internal("Invalid cookie header".to_string()))?,
    );

    Ok((headers, Json(SignInResponse { token, user: profile })))
}

/// POST /api/auth/sign-out
///
/// Clears the session cookie. Succeeds whether or not a valid session was
/// presented; signing out twice is not an error.
pub async fn sign_out(
    State(state): State<AppState>,
    session: Option<Session>,
) -> ApiResult<(HeaderMap, Json<Value>)> {
    if let Some(session) = session {
        state.auth_events.publish(AuthEvent::SignedOut {
            user_id: session.user_id.clone(),
        });
        info!(user_id = %session.user_id, "User signed out");
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        cookie::clear_session_cookie(state.config.secure_cookies)
            .parse()
            .map_err(|_| ApiError::Internal("Invalid cookie header".to_string()))?,
    );

    Ok((headers, Json(json!({ "signed_out": true }))))
}

/// GET /api/auth/me
///
/// Resolves the presented session back to a live account. A token for a
/// since-deleted account is as good as no token.
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<UserProfile>> {
    let user = state
        .store
        .users()
        .get(&session.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

    Ok(Json(user.profile()))
}
