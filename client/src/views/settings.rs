use shared::{UpdateProfileRequest, UserProfile};
use tracing::{info, warn};

use super::{notice_for, Notice, ViewState};
use crate::session::Session;
use crate::store::{AccountStore, EntryStore};

pub struct SettingsController<S> {
    store: S,
    session: Session,
    pub state: ViewState<UserProfile>,
    pub notice: Option<Notice>,
    /// Set once the account is gone; the session must be discarded
    pub signed_out: bool,
}

impl<S: AccountStore + EntryStore> SettingsController<S> {
    pub fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            state: ViewState::Loading,
            notice: None,
            signed_out: false,
        }
    }

    pub async fn load(&mut self) {
        self.notice = None;
        self.state = match self.store.profile(&self.session).await {
            Ok(profile) => ViewState::Ready(profile),
            Err(e) => {
                warn!("Failed to load profile: {}", e);
                self.notice = Some(notice_for(&e));
                ViewState::Empty
            }
        };
    }

    /// Update name and/or username; a taken username is reported on the field
    pub async fn update_profile(&mut self, name: Option<String>, username: Option<String>) -> bool {
        let request = UpdateProfileRequest { name, username };
        match self.store.update_profile(&self.session, &request).await {
            Ok(profile) => {
                self.state = ViewState::Ready(profile);
                self.notice = Some(Notice::Toast("Profile updated successfully".to_string()));
                true
            }
            Err(e) => {
                warn!("Failed to update profile: {}", e);
                self.notice = Some(notice_for(&e));
                false
            }
        }
    }

    /// Remove every particular while keeping the account
    pub async fn clear_all_data(&mut self) -> Option<u64> {
        match self.store.clear_all(&self.session).await {
            Ok(count) => {
                info!("Cleared {} entries", count);
                self.notice = Some(Notice::Toast(format!("Deleted {} particulars", count)));
                Some(count)
            }
            Err(e) => {
                warn!("Failed to clear entries: {}", e);
                self.notice = Some(notice_for(&e));
                None
            }
        }
    }

    pub async fn delete_account(&mut self) -> bool {
        match self.store.delete_account(&self.session).await {
            Ok(count) => {
                info!("Deleted account with {} entries", count);
                self.state = ViewState::Empty;
                self.signed_out = true;
                self.notice = Some(Notice::SignIn("Account deleted".to_string()));
                true
            }
            Err(e) => {
                warn!("Failed to delete account: {}", e);
                self.notice = Some(notice_for(&e));
                false
            }
        }
    }
}
