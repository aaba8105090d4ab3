//! # Assets Manager Backend
//!
//! HTTP store for personal financial particulars: accounts, bearer
//! sessions, profiles and per-user financial entries.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, auth middleware, mappers)
//!     ↓
//! Domain Layer (services, commands, validation)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! [`initialize_backend`] wires the services from a [`ServerConfig`] and
//! [`create_router`] exposes them with CORS and request tracing.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use chrono::Duration;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::ServerConfig;
use domain::{auth_service::AuthService, entry_service::EntryService, profile_service::ProfileService};
use io::rest::{auth_apis, financial_apis, user_apis};
pub use storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub entry_service: EntryService<DbConnection>,
    pub auth_service: AuthService<DbConnection>,
    pub profile_service: ProfileService<DbConnection>,
}

impl AppState {
    pub fn new(db: DbConnection, session_ttl: Duration) -> Self {
        let db = Arc::new(db);
        Self {
            entry_service: EntryService::new(db.clone()),
            auth_service: AuthService::new(db.clone(), session_ttl),
            profile_service: ProfileService::new(db),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url)
        .await
        .with_context(|| format!("open database {}", config.database_url))?;

    info!("Setting up application state");
    Ok(AppState::new(db, Duration::hours(config.session_ttl_hours)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin {}", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(Router::new()
        .merge(auth_apis::router(app_state.clone()))
        .merge(financial_apis::router(app_state.clone()))
        .merge(user_apis::router(app_state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
