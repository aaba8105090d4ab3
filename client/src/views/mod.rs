//! # View Controllers
//!
//! Each controller fetches through a store, runs the aggregation and keeps
//! the result as a [`ViewState`]. Store failures never escape a controller:
//! they become a [`Notice`] and the view falls back to its empty state.

pub mod comparison;
pub mod dashboard;
pub mod particulars;
pub mod settings;
pub mod statistics;

pub use comparison::ComparisonController;
pub use dashboard::DashboardController;
pub use particulars::{ParticularsController, ParticularsForm};
pub use settings::SettingsController;
pub use statistics::StatisticsController;

use crate::errors::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Empty,
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ViewState::Empty)
    }
}

/// How a failure or success is shown to the user
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Dismissible message
    Toast(String),
    /// Error shown next to a form field
    Field { field: String, message: String },
    /// Session is gone; the user has to sign in again
    SignIn(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Toast(message) | Notice::SignIn(message) => message,
            Notice::Field { message, .. } => message,
        }
    }
}

pub fn notice_for(error: &ClientError) -> Notice {
    match error {
        ClientError::Validation {
            field: Some(field),
            message,
        }
        | ClientError::Conflict {
            field: Some(field),
            message,
        } => Notice::Field {
            field: field.clone(),
            message: message.clone(),
        },
        ClientError::Validation { field: None, message } | ClientError::Conflict { field: None, message } => {
            Notice::Toast(message.clone())
        }
        ClientError::Auth(message) => Notice::SignIn(message.clone()),
        ClientError::NotFound(_) => Notice::Toast("Something went wrong. Please try again.".to_string()),
        ClientError::Transient(message) => Notice::Toast(format!("{}. Please try again.", message.trim_end_matches('.'))),
    }
}
