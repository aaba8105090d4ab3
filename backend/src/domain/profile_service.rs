//! Profile maintenance and full account removal.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::profile::UpdateProfileCommand;
use super::errors::{DomainError, DomainResult};
use super::models::Profile;
use super::validation::{sanitize_text, validate_name, validate_username};
use crate::storage::{AccountStorage, Connection, EntryStorage, ProfileStorage, SessionStorage};

#[derive(Clone)]
pub struct ProfileService<C: Connection> {
    profile_repository: C::ProfileRepository,
    entry_repository: C::EntryRepository,
    session_repository: C::SessionRepository,
    account_repository: C::AccountRepository,
}

impl<C: Connection> ProfileService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            profile_repository: connection.create_profile_repository(),
            entry_repository: connection.create_entry_repository(),
            session_repository: connection.create_session_repository(),
            account_repository: connection.create_account_repository(),
        }
    }

    pub async fn get_profile(&self, user_id: &str) -> DomainResult<Profile> {
        self.profile_repository
            .get_profile(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Profile".to_string()))
    }

    /// Apply name/username changes. A username held by another account is a
    /// conflict and leaves the profile untouched.
    pub async fn update_profile(&self, command: UpdateProfileCommand) -> DomainResult<Profile> {
        info!("Updating profile for user {}", command.user_id);

        let name = command.name.as_deref().map(sanitize_text);
        let username = command.username.as_deref().map(sanitize_text);
        if let Some(name) = &name {
            validate_name(name)?;
        }
        if let Some(username) = &username {
            validate_username(username)?;
        }

        let mut profile = self.get_profile(&command.user_id).await?;

        if let Some(username) = &username {
            if let Some(holder) = self.profile_repository.get_profile_by_username(username).await? {
                if holder.user_id != command.user_id {
                    warn!("Username {} already taken", username);
                    return Err(DomainError::conflict("username", "Username already taken"));
                }
            }
        }

        if let Some(name) = name {
            profile.name = name;
        }
        if let Some(username) = username {
            profile.username = username;
        }
        profile.updated_at = Utc::now();

        self.profile_repository
            .update_profile(&profile)
            .await
            .map_err(DomainError::from_write)?;
        info!("Updated profile for user {}", profile.user_id);
        Ok(profile)
    }

    /// Remove every trace of a user: entries, profile, sessions, account.
    /// Returns the number of entries removed.
    pub async fn delete_account(&self, user_id: &str) -> DomainResult<u64> {
        info!("Deleting account {}", user_id);

        let deleted_entries = self.entry_repository.delete_all_entries(user_id).await?;
        self.profile_repository.delete_profile(user_id).await?;
        self.session_repository.delete_sessions_for_user(user_id).await?;
        self.account_repository.delete_account(user_id).await?;

        info!("Deleted account {} with {} entries", user_id, deleted_entries);
        Ok(deleted_entries)
    }
}
