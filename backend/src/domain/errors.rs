use thiserror::Error;

use crate::storage::unique_violation;

/// Failure taxonomy shared by every domain service
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Auth(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{message}")]
    Conflict { field: String, message: String },

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflict(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Conflict {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Turn a rejected write into a conflict when a UNIQUE column caused it
    pub fn from_write(err: anyhow::Error) -> Self {
        match unique_violation(&err) {
            Some(column) if column.ends_with(".email") => {
                DomainError::conflict("email", "Email already registered")
            }
            Some(column) if column.ends_with(".username") => {
                DomainError::conflict("username", "Username already taken")
            }
            _ => DomainError::Storage(err),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
