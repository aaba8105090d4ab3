//! # Storage Module
//!
//! Persistence for accounts, profiles, sessions and financial entries.
//!
//! Domain services only see the traits in [`traits`]; the SQLite
//! implementation lives in [`connection`] and [`repositories`]. Timestamps are
//! stored as fixed-width RFC 3339 text and monetary figures as REAL.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{AccountRepository, EntryRepository, ProfileRepository, SessionRepository};
pub use traits::{AccountStorage, Connection, EntryStorage, ProfileStorage, SessionStorage};

/// The `table.column` whose UNIQUE constraint rejected a write, if that is
/// why `err` happened
pub fn unique_violation(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            // SQLite reports "UNIQUE constraint failed: profiles.username"
            let message = db_err.message();
            Some(message.rsplit(": ").next().unwrap_or(message).to_string())
        }
        _ => None,
    }
}
