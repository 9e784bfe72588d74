//! Admin session issuer and guard.
//!
//! One configured admin credential, bcrypt-verified, exchanged for a
//! short-lived HS256 token. Tokens are stateless: validity is fully
//! determined by signature and expiry, and there is no revocation — a
//! token outlives a later credential rotation until its expiry elapses.

use axum::{extract::State, http::HeaderMap, Json};
use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Session lifetime.
const TOKEN_EXPIRY_MINUTES: i64 = 60;

/// The single process-wide admin credential plus the signing secret.
/// Loaded from configuration at startup; immutable afterwards.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub admin_username: String,
    pub admin_password_hash: String,
    pub jwt_secret: String,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Sign a session token for `subject`, expiring in
/// [`TOKEN_EXPIRY_MINUTES`].
pub fn issue_token(auth: &AuthConfig, subject: &str) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(TOKEN_EXPIRY_MINUTES)).timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )?)
}

/// Verify signature, expiry, and subject of a presented token.
pub fn verify_token(auth: &AuthConfig, token: &str) -> Result<Claims, ApiError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("token verification failed: {}", e);
        ApiError::Authentication
    })?;

    if data.claims.sub != auth.admin_username {
        tracing::warn!("valid token presented with non-admin subject");
        return Err(ApiError::Authentication);
    }

    Ok(data.claims)
}

/// Check the `Authorization: Bearer <token>` header and return the
/// authenticated subject.
pub fn authorize_admin(auth: &AuthConfig, headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Authentication)?;

    Ok(verify_token(auth, token)?.sub)
}

/// Check a presented credential pair against the configured admin
/// account. The password hash is verified even when the username does
/// not match, so the unknown-user and wrong-password paths cost the
/// same and cannot be told apart by response timing.
async fn credentials_ok(auth: &AuthConfig, payload: &LoginRequest) -> bool {
    let username_ok = payload.username == auth.admin_username;

    // bcrypt is intentionally CPU-intensive; keep the async executor free.
    let password = payload.password.clone();
    let hash = auth.admin_password_hash.clone();
    let password_ok = tokio::task::spawn_blocking(move || verify(&password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false);

    username_ok && password_ok
}

/// POST /api/admin/login
///
/// Unknown username and wrong password fail with the same error; the
/// response never reveals which part of the credential was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let auth = &state.auth;

    if !credentials_ok(auth, &payload).await {
        tracing::warn!("failed admin login attempt");
        return Err(ApiError::Authentication);
    }

    let access_token = issue_token(auth, &auth.admin_username)?;
    tracing::info!("admin session issued");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
