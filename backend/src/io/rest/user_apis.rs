//! # REST API for User Profiles

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get},
    Extension, Router,
};
use shared::{ClearAllResponse, DataEnvelope, UpdateProfileRequest};
use tracing::info;

use super::auth_middleware::{require_session, AuthUser};
use super::error::failure;
use super::mappers::UserMapper;
use crate::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(get_profile).put(update_profile))
        .route("/user/delete-account", delete(delete_account))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// GET /user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    info!("GET /user/profile - user {}", user.user_id);

    match state.profile_service.get_profile(&user.user_id).await {
        Ok(profile) => (StatusCode::OK, Json(DataEnvelope::new(UserMapper::profile_to_dto(profile)))).into_response(),
        Err(e) => failure("load profile", e),
    }
}

/// PUT /user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return failure("parse profile update", rejection),
    };
    info!("PUT /user/profile - user {} request: {:?}", user.user_id, request);

    let command = UserMapper::to_update_profile_command(&user.user_id, request);
    match state.profile_service.update_profile(command).await {
        Ok(profile) => (
            StatusCode::OK,
            Json(DataEnvelope::with_message(
                UserMapper::profile_to_dto(profile),
                "Profile updated successfully",
            )),
        )
            .into_response(),
        Err(e) => failure("update profile", e),
    }
}

/// DELETE /user/delete-account
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    info!("DELETE /user/delete-account - user {}", user.user_id);

    match state.profile_service.delete_account(&user.user_id).await {
        Ok(deleted_count) => (
            StatusCode::OK,
            Json(ClearAllResponse {
                deleted_count,
                message: "Account deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => failure("delete account", e),
    }
}
