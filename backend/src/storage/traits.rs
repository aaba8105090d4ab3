//! # Storage Traits
//!
//! Abstractions the domain services are written against. Every entry
//! operation is scoped by owner so one user can never observe or modify
//! another user's rows.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Account, FinancialEntry, Profile, Session};

#[async_trait]
pub trait EntryStorage: Send + Sync {
    async fn store_entry(&self, entry: &FinancialEntry) -> Result<()>;

    /// Fetch an entry only if it belongs to `user_id`
    async fn get_entry(&self, user_id: &str, entry_id: &str) -> Result<Option<FinancialEntry>>;

    /// All entries of a user, newest `date_added` first
    async fn list_entries(&self, user_id: &str) -> Result<Vec<FinancialEntry>>;

    async fn update_entry(&self, entry: &FinancialEntry) -> Result<()>;

    /// Returns true if a row was removed
    async fn delete_entry(&self, user_id: &str, entry_id: &str) -> Result<bool>;

    /// Returns the number of rows removed
    async fn delete_all_entries(&self, user_id: &str) -> Result<u64>;
}

#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Insert an account together with its profile; neither row is kept if
    /// either insert fails
    async fn create_account(&self, account: &Account, profile: &Profile) -> Result<()>;

    /// Case-insensitive lookup
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn get_account(&self, user_id: &str) -> Result<Option<Account>>;

    async fn delete_account(&self, user_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ProfileStorage: Send + Sync {
    async fn store_profile(&self, profile: &Profile) -> Result<()>;

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Case-insensitive lookup
    async fn get_profile_by_username(&self, username: &str) -> Result<Option<Profile>>;

    async fn update_profile(&self, profile: &Profile) -> Result<()>;

    async fn delete_profile(&self, user_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn store_session(&self, session: &Session) -> Result<()>;

    async fn get_session(&self, token: &str) -> Result<Option<Session>>;

    async fn delete_session(&self, token: &str) -> Result<bool>;

    async fn delete_sessions_for_user(&self, user_id: &str) -> Result<u64>;
}

/// A storage backend able to hand out one repository per concern
pub trait Connection: Send + Sync + Clone {
    type EntryRepository: EntryStorage + Clone;
    type AccountRepository: AccountStorage + Clone;
    type ProfileRepository: ProfileStorage + Clone;
    type SessionRepository: SessionStorage + Clone;

    fn create_entry_repository(&self) -> Self::EntryRepository;

    fn create_account_repository(&self) -> Self::AccountRepository;

    fn create_profile_repository(&self) -> Self::ProfileRepository;

    fn create_session_repository(&self) -> Self::SessionRepository;
}
