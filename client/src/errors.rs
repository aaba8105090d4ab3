use shared::ErrorBody;
use thiserror::Error;

/// Failure kinds a view can react to.
///
/// Every store call resolves to one of these; views decide how each one is
/// surfaced (inline on a field, as a toast, or by asking for a new sign-in).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("{message}")]
    Validation { field: Option<String>, message: String },

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Conflict { field: Option<String>, message: String },

    #[error("{0}")]
    Transient(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Map a non-2xx status and its (optional) error body onto a failure kind
    pub fn from_status(status: u16, body: Option<ErrorBody>) -> Self {
        let (message, field) = match body {
            Some(body) => (body.error, body.field),
            None => (format!("Request failed with status {}", status), None),
        };

        match status {
            400 | 422 => ClientError::Validation { field, message },
            401 | 403 => ClientError::Auth(message),
            404 => ClientError::NotFound(message),
            409 => ClientError::Conflict { field, message },
            _ => ClientError::Transient(message),
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            ClientError::Validation { field, .. } | ClientError::Conflict { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}
