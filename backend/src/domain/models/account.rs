use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Authentication identity
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    /// Stored lower-cased
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Bearer session issued on sign-in
#[derive(Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

// Tokens are credentials and must never reach the logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl Session {
    pub fn issue(user_id: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: uuid::Uuid::new_v4().simple().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry() {
        let session = Session::issue("user-1", Duration::hours(1));
        assert!(!session.is_expired(session.created_at));
        assert!(session.is_expired(session.created_at + Duration::hours(1)));
        assert_eq!(session.token.len(), 32);
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = Session::issue("user-1", Duration::hours(1));
        let b = Session::issue("user-1", Duration::hours(1));
        assert_ne!(a.token, b.token);
    }
}
