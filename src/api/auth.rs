//! Minimal JWT session auth.
//!
//! - Clients submit the shared password to `/api/auth/login`
//! - Server returns a JWT valid for `JWT_TTL_DAYS`
//! - Every task endpoint requires `Authorization: Bearer <jwt>`; there is no bypass
//!
//! The token subject names the user whose task store a request reads and writes.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use super::error::{ApiError, MSG_UNAUTHORIZED};
use super::routes::AppState;
use super::types::{LoginRequest, LoginResponse};

const DEFAULT_USER: &str = "student";

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    /// User the session belongs to
    sub: String,
    /// Issued-at unix seconds
    iat: i64,
    /// Expiration unix seconds
    exp: i64,
}

/// Authenticated caller, attached to the request by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    if a_bytes.len() != b_bytes.len() {
        return false;
    }
    a_bytes
        .iter()
        .zip(b_bytes)
        .fold(0u8, |diff, (x, y)| diff | (x ^ y))
        == 0
}

pub(crate) fn issue_jwt(
    secret: &str,
    user: &str,
    ttl_days: i64,
) -> jsonwebtoken::errors::Result<(String, i64)> {
    let now = Utc::now();
    let exp = now + Duration::days(ttl_days.max(1));
    let claims = Claims {
        sub: user.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, claims.exp))
}

fn verify_jwt(token: &str, secret: &str) -> jsonwebtoken::errors::Result<Claims> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let auth = &state.config.auth;

    if !constant_time_eq(req.password.trim(), &auth.dashboard_password) {
        return Err(ApiError::Unauthorized("Invalid password".to_string()));
    }

    let user = req
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_USER);

    let (token, exp) = issue_jwt(&auth.jwt_secret, user, auth.jwt_ttl_days).map_err(|e| {
        tracing::error!("Failed to issue session token: {}", e);
        ApiError::Internal("Failed to issue session token".to_string())
    })?;

    tracing::info!(user, "Session issued");
    Ok(Json(LoginResponse { token, exp }))
}

pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .unwrap_or("");

    if token.is_empty() {
        return ApiError::Unauthorized(MSG_UNAUTHORIZED.to_string()).into_response();
    }

    match verify_jwt(token, &state.config.auth.jwt_secret) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthUser { id: claims.sub });
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("Rejected session token: {}", e);
            ApiError::Unauthorized(MSG_UNAUTHORIZED.to_string()).into_response()
        }
    }
}
