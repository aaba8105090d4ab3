//! Bearer-token guard for every route except sign-up and sign-in.
//!
//! On success the resolved [`AuthUser`] is inserted as a request extension
//! so handlers can take `Extension<AuthUser>`.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::error::ApiError;
use crate::AppState;

/// Caller identity resolved from the session token
#[derive(Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub token: String,
}

pub fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match bearer_token(&req) {
        Some(token) => token.to_string(),
        None => {
            warn!("{} {} rejected: missing bearer token", req.method(), req.uri().path());
            return Err(ApiError::unauthorized("Missing or malformed Authorization header"));
        }
    };

    let user_id = state.auth_service.authenticate(&token).await?;
    req.extensions_mut().insert(AuthUser { user_id, token });

    Ok(next.run(req).await)
}
