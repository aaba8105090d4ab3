//! HTTP rendering of domain failures.
//!
//! Every non-2xx response carries an [`ErrorBody`]. Storage failures are
//! logged in full but reported to the caller with a generic message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorBody;
use tracing::{error, warn};

use crate::domain::DomainError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                field: None,
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    fn with_field(status: StatusCode, field: String, message: String) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message,
                field: Some(field),
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { field, message } => {
                ApiError::with_field(StatusCode::BAD_REQUEST, field, message)
            }
            DomainError::Auth(message) => ApiError::unauthorized(message),
            DomainError::NotFound(what) => {
                ApiError::new(StatusCode::NOT_FOUND, format!("{} not found", what))
            }
            DomainError::Conflict { field, message } => {
                ApiError::with_field(StatusCode::CONFLICT, field, message)
            }
            DomainError::Storage(source) => {
                error!("Storage failure: {:#}", source);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

/// Malformed or ill-typed JSON bodies are validation failures
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::with_field(
            StatusCode::BAD_REQUEST,
            "body".to_string(),
            rejection.body_text(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Log a failed handler action at a level matching its status, then render it
pub fn failure(action: &str, err: impl Into<ApiError>) -> Response {
    let err = err.into();
    if err.status.is_server_error() {
        error!("Failed to {}: {}", action, err.body.error);
    } else {
        warn!("Failed to {}: {}", action, err.body.error);
    }
    err.into_response()
}
