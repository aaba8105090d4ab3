use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use super::{format_timestamp, parse_timestamp};
use crate::domain::models::Session;
use crate::storage::connection::DbConnection;
use crate::storage::traits::SessionStorage;

/// Repository for issued bearer sessions
#[derive(Clone)]
pub struct SessionRepository {
    db: DbConnection,
}

impl SessionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStorage for SessionRepository {
    async fn store_session(&self, session: &Session) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&session.token)
        .bind(&session.user_id)
        .bind(format_timestamp(&session.created_at))
        .bind(format_timestamp(&session.expires_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT token, user_id, created_at, expires_at
            FROM sessions
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Session {
                token: r.get("token"),
                user_id: r.get("user_id"),
                created_at: parse_timestamp(r.get::<String, _>("created_at").as_str())?,
                expires_at: parse_timestamp(r.get::<String, _>("expires_at").as_str())?,
            })),
            None => Ok(None),
        }
    }

    async fn delete_session(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_sessions_for_user(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        let repo = SessionRepository::new(db);

        let first = Session::issue("u1", Duration::hours(1));
        let second = Session::issue("u1", Duration::hours(1));
        repo.store_session(&first).await.unwrap();
        repo.store_session(&second).await.unwrap();

        let fetched = repo.get_session(&first.token).await.unwrap().expect("session exists");
        assert_eq!(fetched.user_id, "u1");

        assert!(repo.delete_session(&first.token).await.unwrap());
        assert!(!repo.delete_session(&first.token).await.unwrap());
        assert_eq!(repo.delete_sessions_for_user("u1").await.unwrap(), 1);
        assert!(repo.get_session(&second.token).await.unwrap().is_none());
    }
}
