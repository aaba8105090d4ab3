use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Signed-in context passed explicitly to every store call
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Load a saved session; a missing file means nobody is signed in
    pub fn load(path: &Path) -> Result<Option<Session>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path).with_context(|| format!("read session file {}", path.display()))?;
        let session = serde_json::from_str(&contents).with_context(|| format!("parse session file {}", path.display()))?;
        Ok(Some(session))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("write session file {}", path.display()))
    }

    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path).with_context(|| format!("remove session file {}", path.display()))?;
        }
        Ok(())
    }
}
