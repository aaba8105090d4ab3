//! # REST API for Financial Entries
//!
//! Per-user CRUD over financial particulars plus the aggregate endpoints the
//! dashboard needs. Every route requires a bearer session.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Extension, Router,
};
use shared::{ClearAllResponse, CreateEntryRequest, DataEnvelope, DeleteEntryResponse, UpdateEntryRequest};
use tracing::info;

use super::auth_middleware::{require_session, AuthUser};
use super::error::failure;
use super::mappers::EntryMapper;
use crate::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/financial", post(create_entry))
        .route("/financial/all", get(list_entries))
        .route("/financial/stats", get(get_stats))
        .route("/financial/titles", get(get_titles))
        .route("/financial/clear-all", delete(clear_all))
        .route(
            "/financial/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// GET /financial/all
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    info!("GET /financial/all - user {}", user.user_id);

    match state.entry_service.list_entries(&user.user_id).await {
        Ok(entries) => {
            let data: Vec<_> = entries.into_iter().map(EntryMapper::to_dto).collect();
            (StatusCode::OK, Json(DataEnvelope::new(data))).into_response()
        }
        Err(e) => failure("list entries", e),
    }
}

/// GET /financial/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    info!("GET /financial/stats - user {}", user.user_id);

    match state.entry_service.stats(&user.user_id).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(DataEnvelope::new(EntryMapper::stats_to_dto(stats))),
        )
            .into_response(),
        Err(e) => failure("compute stats", e),
    }
}

/// GET /financial/titles
pub async fn get_titles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    info!("GET /financial/titles - user {}", user.user_id);

    match state.entry_service.titles(&user.user_id).await {
        Ok(titles) => (StatusCode::OK, Json(DataEnvelope::new(titles))).into_response(),
        Err(e) => failure("list titles", e),
    }
}

/// GET /financial/:id
pub async fn get_entry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(entry_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /financial/{} - user {}", entry_id, user.user_id);

    match state.entry_service.get_entry(&user.user_id, &entry_id).await {
        Ok(entry) => (StatusCode::OK, Json(DataEnvelope::new(EntryMapper::to_dto(entry)))).into_response(),
        Err(e) => failure("get entry", e),
    }
}

/// POST /financial
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return failure("parse entry", rejection),
    };
    info!("POST /financial - user {} request: {:?}", user.user_id, request);

    let command = EntryMapper::to_create_command(&user.user_id, request);
    match state.entry_service.create_entry(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(DataEnvelope::with_message(
                EntryMapper::to_dto(result.entry),
                result.success_message,
            )),
        )
            .into_response(),
        Err(e) => failure("create entry", e),
    }
}

/// PUT /financial/:id
pub async fn update_entry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(entry_id): Path<String>,
    payload: Result<Json<UpdateEntryRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return failure("parse entry update", rejection),
    };
    info!("PUT /financial/{} - user {} request: {:?}", entry_id, user.user_id, request);

    let command = EntryMapper::to_update_command(&user.user_id, &entry_id, request);
    match state.entry_service.update_entry(command).await {
        Ok(result) => (
            StatusCode::OK,
            Json(DataEnvelope::with_message(
                EntryMapper::to_dto(result.entry),
                result.success_message,
            )),
        )
            .into_response(),
        Err(e) => failure("update entry", e),
    }
}

/// DELETE /financial/:id
pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(entry_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /financial/{} - user {}", entry_id, user.user_id);

    match state.entry_service.delete_entry(&user.user_id, &entry_id).await {
        Ok(result) => (
            StatusCode::OK,
            Json(DeleteEntryResponse {
                deleted: result.deleted,
                message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => failure("delete entry", e),
    }
}

/// DELETE /financial/clear-all
pub async fn clear_all(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    info!("DELETE /financial/clear-all - user {}", user.user_id);

    match state.entry_service.clear_all(&user.user_id).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ClearAllResponse {
                deleted_count: result.deleted_count,
                message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => failure("clear entries", e),
    }
}
