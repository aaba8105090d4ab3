//! # REST API Interface Layer
//!
//! JSON endpoints for authentication, financial entries and profiles.
//!
//! Handlers only translate: they map wire DTOs to domain commands, call a
//! service and render the outcome. Failures become an [`error::ApiError`]
//! carrying `{ "error": ..., "field": ... }`.

pub mod auth_apis;
pub mod auth_middleware;
pub mod error;
pub mod financial_apis;
pub mod mappers;
pub mod user_apis;

pub use auth_middleware::AuthUser;
pub use error::ApiError;
