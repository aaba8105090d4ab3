pub mod account_repository;
pub mod entry_repository;
pub mod profile_repository;
pub mod session_repository;

pub use account_repository::AccountRepository;
pub use entry_repository::EntryRepository;
pub use profile_repository::ProfileRepository;
pub use session_repository::SessionRepository;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed-width RFC 3339 so that text ordering matches time ordering
pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid stored timestamp: {}", raw))?
        .with_timezone(&Utc))
}
