//! # REST API for Authentication
//!
//! Sign-up and sign-in are public; sign-out and `me` need a bearer session.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Extension, Router,
};
use shared::{DataEnvelope, MessageResponse, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse};
use tracing::info;

use super::auth_middleware::{require_session, AuthUser};
use super::error::failure;
use super::mappers::UserMapper;
use crate::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/signout", post(sign_out))
        .route("/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, require_session))
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
}

/// POST /auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return failure("parse sign-up", rejection),
    };
    info!("POST /auth/signup - email: {}", request.email);

    match state.auth_service.sign_up(UserMapper::to_sign_up_command(request)).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(SignUpResponse {
                user: UserMapper::user_to_dto(result.user),
                message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => failure("sign up", e),
    }
}

/// POST /auth/signin
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return failure("parse sign-in", rejection),
    };
    info!("POST /auth/signin - email: {}", request.email);

    match state.auth_service.sign_in(UserMapper::to_sign_in_command(request)).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SignInResponse {
                user: UserMapper::user_to_dto(result.user),
                session: UserMapper::session_to_dto(result.session),
                message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => failure("sign in", e),
    }
}

/// POST /auth/signout
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    info!("POST /auth/signout - user {}", user.user_id);

    match state.auth_service.sign_out(&user.token).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Signed out successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => failure("sign out", e),
    }
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    info!("GET /auth/me - user {}", user.user_id);

    match state.auth_service.current_user(&user.user_id).await {
        Ok(view) => (StatusCode::OK, Json(DataEnvelope::new(UserMapper::user_to_dto(view)))).into_response(),
        Err(e) => failure("load current user", e),
    }
}
