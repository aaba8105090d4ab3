use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use super::repositories::{
    AccountRepository, EntryRepository, ProfileRepository, SessionRepository,
};
use super::traits::Connection;

/// DbConnection manages the SQLite pool shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection, creating the database file if needed
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Private in-memory database, used by tests and throwaway servers.
    ///
    /// A single connection that never expires keeps the data alive for the
    /// lifetime of the pool.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                username TEXT NOT NULL UNIQUE COLLATE NOCASE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_sessions_user_id
            ON sessions(user_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS financial_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT,
                amount REAL NOT NULL,
                cash REAL NOT NULL,
                investment REAL NOT NULL,
                current_value REAL NOT NULL,
                month TEXT NOT NULL,
                year INTEGER NOT NULL,
                date_added TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Listing is always scoped to one user, newest first
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_financial_entries_user_id
            ON financial_entries(user_id, date_added DESC);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type EntryRepository = EntryRepository;
    type AccountRepository = AccountRepository;
    type ProfileRepository = ProfileRepository;
    type SessionRepository = SessionRepository;

    fn create_entry_repository(&self) -> Self::EntryRepository {
        EntryRepository::new(self.clone())
    }

    fn create_account_repository(&self) -> Self::AccountRepository {
        AccountRepository::new(self.clone())
    }

    fn create_profile_repository(&self) -> Self::ProfileRepository {
        ProfileRepository::new(self.clone())
    }

    fn create_session_repository(&self) -> Self::SessionRepository {
        SessionRepository::new(self.clone())
    }
}
