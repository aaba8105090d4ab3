use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::{format_timestamp, parse_timestamp};
use crate::domain::models::Profile;
use crate::storage::connection::DbConnection;
use crate::storage::traits::ProfileStorage;

/// Repository for user profiles
#[derive(Clone)]
pub struct ProfileRepository {
    db: DbConnection,
}

impl ProfileRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_profile(row: &SqliteRow) -> Result<Profile> {
        Ok(Profile {
            user_id: row.get("user_id"),
            name: row.get("name"),
            username: row.get("username"),
            created_at: parse_timestamp(row.get::<String, _>("created_at").as_str())?,
            updated_at: parse_timestamp(row.get::<String, _>("updated_at").as_str())?,
        })
    }
}

#[async_trait]
impl ProfileStorage for ProfileRepository {
    async fn store_profile(&self, profile: &Profile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, name, username, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile.user_id)
        .bind(&profile.name)
        .bind(&profile.username)
        .bind(format_timestamp(&profile.created_at))
        .bind(format_timestamp(&profile.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, name, username, created_at, updated_at
            FROM profiles
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    async fn get_profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, name, username, created_at, updated_at
            FROM profiles
            WHERE username = ? COLLATE NOCASE
            "#,
        )
        .bind(username)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    async fn update_profile(&self, profile: &Profile) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET name = ?, username = ?, updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(&profile.name)
        .bind(&profile.username)
        .bind(format_timestamp(&profile.updated_at))
        .bind(&profile.user_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_profile(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = ?")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
