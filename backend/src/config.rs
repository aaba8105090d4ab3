//! Server configuration.
//!
//! Values start from [`ServerConfig::default`], are overlaid by an optional
//! YAML file named in `ASSETS_CONFIG`, and finally by individual
//! `ASSETS_*` environment variables.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_ENV: &str = "ASSETS_CONFIG";

/// Upper bound for `session_ttl_hours`, ten years
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 366 * 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// sqlx connection string, e.g. `sqlite:assets.db`
    pub database_url: String,
    pub bind_addr: String,
    /// Origin allowed by the CORS layer
    pub cors_origin: String,
    /// Lifetime of issued session tokens
    pub session_ttl_hours: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:assets.db".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            session_ttl_hours: 24 * 7,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::load_with(file.as_deref().map(Path::new), |key| std::env::var(key).ok())
    }

    /// Load configuration from an optional file and an environment lookup
    pub fn load_with<F>(file: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("read {}", path.display()))?;
                serde_yaml::from_str(&raw)
                    .with_context(|| format!("parse {}", path.display()))?
            }
            None => ServerConfig::default(),
        };

        if let Some(url) = env("ASSETS_DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(addr) = env("ASSETS_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(origin) = env("ASSETS_CORS_ORIGIN") {
            config.cors_origin = origin;
        }
        if let Some(ttl) = env("ASSETS_SESSION_TTL_HOURS") {
            config.session_ttl_hours = ttl
                .parse()
                .with_context(|| format!("ASSETS_SESSION_TTL_HOURS is not a number: {}", ttl))?;
        }

        if !(1..=MAX_SESSION_TTL_HOURS).contains(&config.session_ttl_hours) {
            bail!(
                "session_ttl_hours must be between 1 and {}, got {}",
                MAX_SESSION_TTL_HOURS,
                config.session_ttl_hours
            );
        }

        Ok(config)
    }
}
