//! # Domain Module
//!
//! Business rules of the assets manager, independent of HTTP and SQL.
//!
//! ## Services
//!
//! - [`entry_service::EntryService`]: financial entry lifecycle and the
//!   liquid/invested bucket rules
//! - [`auth_service::AuthService`]: registration, sign-in and bearer sessions
//! - [`profile_service::ProfileService`]: profile edits and account removal
//!
//! Services are generic over [`crate::storage::Connection`] and report
//! failures as [`errors::DomainError`].

pub mod auth_service;
pub mod commands;
pub mod entry_service;
pub mod entry_stats;
pub mod errors;
pub mod models;
pub mod profile_service;
pub mod validation;

pub use errors::{DomainError, DomainResult};
