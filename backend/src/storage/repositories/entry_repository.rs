use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{Category, Month};
use sqlx::{sqlite::SqliteRow, Row};

use super::{format_timestamp, parse_timestamp};
use crate::domain::models::{FinancialEntry, Holding};
use crate::storage::connection::DbConnection;
use crate::storage::traits::EntryStorage;

/// Repository for financial entry rows
#[derive(Clone)]
pub struct EntryRepository {
    db: DbConnection,
}

impl EntryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_entry(row: &SqliteRow) -> Result<FinancialEntry> {
        let category = Category::parse(row.get::<String, _>("category").as_str());
        let month_name: String = row.get("month");
        let month = Month::from_name(&month_name).map_err(|e| anyhow!("{}", e))?;
        let holding = Holding::from_columns(
            &category,
            row.get("cash"),
            row.get("investment"),
            row.get("current_value"),
        );

        Ok(FinancialEntry {
            id: row.get("id"),
            user_id: row.get("user_id"),
            category,
            description: row.get("description"),
            holding,
            month,
            year: row.get("year"),
            date_added: parse_timestamp(row.get::<String, _>("date_added").as_str())?,
            updated_at: parse_timestamp(row.get::<String, _>("updated_at").as_str())?,
        })
    }
}

#[async_trait]
impl EntryStorage for EntryRepository {
    async fn store_entry(&self, entry: &FinancialEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO financial_entries
                (id, user_id, category, description, amount, cash, investment,
                 current_value, month, year, date_added, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(entry.category.name())
        .bind(&entry.description)
        .bind(entry.holding.amount())
        .bind(entry.holding.cash())
        .bind(entry.holding.investment())
        .bind(entry.holding.current_value())
        .bind(entry.month.name())
        .bind(entry.year)
        .bind(format_timestamp(&entry.date_added))
        .bind(format_timestamp(&entry.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_entry(&self, user_id: &str, entry_id: &str) -> Result<Option<FinancialEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, category, description, cash, investment,
                   current_value, month, year, date_added, updated_at
            FROM financial_entries
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn list_entries(&self, user_id: &str) -> Result<Vec<FinancialEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category, description, cash, investment,
                   current_value, month, year, date_added, updated_at
            FROM financial_entries
            WHERE user_id = ?
            ORDER BY date_added DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    async fn update_entry(&self, entry: &FinancialEntry) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE financial_entries
            SET category = ?, description = ?, amount = ?, cash = ?, investment = ?,
                current_value = ?, month = ?, year = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(entry.category.name())
        .bind(&entry.description)
        .bind(entry.holding.amount())
        .bind(entry.holding.cash())
        .bind(entry.holding.investment())
        .bind(entry.holding.current_value())
        .bind(entry.month.name())
        .bind(entry.year)
        .bind(format_timestamp(&entry.updated_at))
        .bind(&entry.id)
        .bind(&entry.user_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_entry(&self, user_id: &str, entry_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM financial_entries WHERE id = ? AND user_id = ?")
            .bind(entry_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_entries(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM financial_entries WHERE user_id = ?")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
