use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::{format_timestamp, parse_timestamp};
use crate::domain::models::{Account, Profile};
use crate::storage::connection::DbConnection;
use crate::storage::traits::AccountStorage;

/// Repository for authentication identities
#[derive(Clone)]
pub struct AccountRepository {
    db: DbConnection,
}

impl AccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_account(row: &SqliteRow) -> Result<Account> {
        Ok(Account {
            id: row.get("id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: parse_timestamp(row.get::<String, _>("created_at").as_str())?,
        })
    }
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn create_account(&self, account: &Account, profile: &Profile) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(format_timestamp(&account.created_at))
        .execute(&mut *tx)
        .await?;

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
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM accounts
            WHERE email = ? COLLATE NOCASE
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn get_account(&self, user_id: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn delete_account(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
