//! Store seams used by the view controllers.
//!
//! [`crate::api::ApiClient`] is the HTTP implementation; tests use in-memory
//! fakes.

use async_trait::async_trait;
use shared::{
    CreateEntryRequest, CurrentUser, FinancialEntry, FinancialStats, SignInRequest, SignUpRequest,
    UpdateEntryRequest, UpdateProfileRequest, UserProfile,
};

use crate::errors::ClientResult;
use crate::session::Session;

/// Financial entries of the signed-in user
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries, in no particular order
    async fn list(&self, session: &Session) -> ClientResult<Vec<FinancialEntry>>;
    async fn stats(&self, session: &Session) -> ClientResult<FinancialStats>;
    async fn titles(&self, session: &Session) -> ClientResult<Vec<String>>;
    async fn get(&self, session: &Session, id: &str) -> ClientResult<FinancialEntry>;
    async fn create(&self, session: &Session, request: &CreateEntryRequest) -> ClientResult<FinancialEntry>;
    async fn update(&self, session: &Session, id: &str, request: &UpdateEntryRequest) -> ClientResult<FinancialEntry>;
    /// Returns whether a row was removed
    async fn delete(&self, session: &Session, id: &str) -> ClientResult<bool>;
    /// Returns how many rows were removed
    async fn clear_all(&self, session: &Session) -> ClientResult<u64>;
}

/// Accounts, sessions and profiles
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<CurrentUser>;
    async fn sign_in(&self, request: &SignInRequest) -> ClientResult<Session>;
    async fn sign_out(&self, session: &Session) -> ClientResult<()>;
    async fn current_user(&self, session: &Session) -> ClientResult<CurrentUser>;
    async fn profile(&self, session: &Session) -> ClientResult<UserProfile>;
    async fn update_profile(&self, session: &Session, request: &UpdateProfileRequest) -> ClientResult<UserProfile>;
    /// Returns how many entries were removed with the account
    async fn delete_account(&self, session: &Session) -> ClientResult<u64>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use crate::errors::ClientError;
    use chrono::{Duration, TimeZone, Utc};
    use shared::{Category, Month};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    pub struct FakeState {
        pub entries: Vec<FinancialEntry>,
        pub titles: Vec<String>,
        pub profile: Option<UserProfile>,
        pub taken_usernames: Vec<String>,
        pub created: Vec<CreateEntryRequest>,
        pub updated: Vec<(String, UpdateEntryRequest)>,
        pub fail_with: Option<ClientError>,
        pub next_id: u32,
    }

    /// Shared-state fake; clones observe the same data
    #[derive(Clone, Default)]
    pub struct FakeStore {
        pub state: Arc<Mutex<FakeState>>,
    }

    pub fn session() -> Session {
        Session {
            access_token: "token".to_string(),
            user_id: "user-1".to_string(),
            email: "ana@example.com".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    pub fn entry(id: &str, category: &str, title: &str, cash: f64, investment: f64, current_value: f64, month: Month, year: i32) -> FinancialEntry {
        let date_added = Utc.with_ymd_and_hms(year, month.index(), 1, 12, 0, 0).unwrap();
        FinancialEntry {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            category: Category::parse(category),
            description: if title.is_empty() { None } else { Some(title.to_string()) },
            amount: cash + investment,
            cash,
            investment,
            current_value,
            month,
            year,
            date_added,
            updated_at: date_added,
        }
    }

    impl FakeStore {
        pub fn with_entries(entries: Vec<FinancialEntry>) -> Self {
            let store = FakeStore::default();
            store.state.lock().unwrap().entries = entries;
            store
        }

        pub fn fail_with(&self, error: ClientError) {
            self.state.lock().unwrap().fail_with = Some(error);
        }

        pub fn recover(&self) {
            self.state.lock().unwrap().fail_with = None;
        }

        fn check(&self) -> ClientResult<()> {
            match &self.state.lock().unwrap().fail_with {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }

        fn build(&self, id: String, request: &CreateEntryRequest) -> FinancialEntry {
            let cash = request.cash.unwrap_or(0.0);
            let investment = request.investment.unwrap_or(0.0);
            let month = request
                .month
                .as_deref()
                .and_then(|name| Month::from_name(name).ok())
                .unwrap_or(Month::January);
            let now = Utc::now();
            FinancialEntry {
                id,
                user_id: "user-1".to_string(),
                category: Category::parse(request.category.as_deref().unwrap_or("Other")),
                description: request.description.clone(),
                amount: cash + investment,
                cash,
                investment,
                current_value: request.current_value.unwrap_or(cash + investment),
                month,
                year: request.year.unwrap_or(2024),
                date_added: now,
                updated_at: now,
            }
        }
    }

    #[async_trait]
    impl EntryStore for FakeStore {
        async fn list(&self, _session: &Session) -> ClientResult<Vec<FinancialEntry>> {
            self.check()?;
            Ok(self.state.lock().unwrap().entries.clone())
        }

        async fn stats(&self, _session: &Session) -> ClientResult<FinancialStats> {
            self.check()?;
            let state = self.state.lock().unwrap();
            let total_amount: f64 = state.entries.iter().map(|e| e.amount).sum();
            let mut category_breakdown = std::collections::BTreeMap::new();
            for entry in &state.entries {
                *category_breakdown.entry(entry.category.name().to_string()).or_insert(0.0) += entry.amount;
            }
            let total_entries = state.entries.len();
            Ok(FinancialStats {
                total_amount,
                total_entries,
                category_breakdown,
                average_amount: if total_entries == 0 { 0.0 } else { total_amount / total_entries as f64 },
            })
        }

        async fn titles(&self, _session: &Session) -> ClientResult<Vec<String>> {
            self.check()?;
            Ok(self.state.lock().unwrap().titles.clone())
        }

        async fn get(&self, _session: &Session, id: &str) -> ClientResult<FinancialEntry> {
            self.check()?;
            self.state
                .lock()
                .unwrap()
                .entries
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound("Entry not found".to_string()))
        }

        async fn create(&self, _session: &Session, request: &CreateEntryRequest) -> ClientResult<FinancialEntry> {
            self.check()?;
            let id = {
                let mut state = self.state.lock().unwrap();
                state.next_id += 1;
                state.created.push(request.clone());
                format!("entry-{}", state.next_id)
            };
            let entry = self.build(id, request);
            self.state.lock().unwrap().entries.push(entry.clone());
            Ok(entry)
        }

        async fn update(&self, _session: &Session, id: &str, request: &UpdateEntryRequest) -> ClientResult<FinancialEntry> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            state.updated.push((id.to_string(), request.clone()));
            let entry = state
                .entries
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| ClientError::NotFound("Entry not found".to_string()))?;
            if let Some(cash) = request.cash {
                entry.cash = cash;
            }
            if let Some(investment) = request.investment {
                entry.investment = investment;
            }
            if let Some(current_value) = request.current_value {
                entry.current_value = current_value;
            }
            if let Some(description) = &request.description {
                entry.description = Some(description.clone());
            }
            entry.amount = entry.cash + entry.investment;
            Ok(entry.clone())
        }

        async fn delete(&self, _session: &Session, id: &str) -> ClientResult<bool> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            let before = state.entries.len();
            state.entries.retain(|e| e.id != id);
            Ok(state.entries.len() != before)
        }

        async fn clear_all(&self, _session: &Session) -> ClientResult<u64> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            let count = state.entries.len() as u64;
            state.entries.clear();
            Ok(count)
        }
    }

    #[async_trait]
    impl AccountStore for FakeStore {
        async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<CurrentUser> {
            self.check()?;
            Ok(CurrentUser {
                id: "user-1".to_string(),
                email: request.email.clone(),
                created_at: Utc::now(),
                profile: None,
            })
        }

        async fn sign_in(&self, _request: &SignInRequest) -> ClientResult<Session> {
            self.check()?;
            Ok(session())
        }

        async fn sign_out(&self, _session: &Session) -> ClientResult<()> {
            self.check()
        }

        async fn current_user(&self, session: &Session) -> ClientResult<CurrentUser> {
            self.check()?;
            Ok(CurrentUser {
                id: session.user_id.clone(),
                email: session.email.clone(),
                created_at: Utc::now(),
                profile: self.state.lock().unwrap().profile.clone(),
            })
        }

        async fn profile(&self, _session: &Session) -> ClientResult<UserProfile> {
            self.check()?;
            self.state
                .lock()
                .unwrap()
                .profile
                .clone()
                .ok_or_else(|| ClientError::NotFound("Profile not found".to_string()))
        }

        async fn update_profile(&self, _session: &Session, request: &UpdateProfileRequest) -> ClientResult<UserProfile> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            if let Some(username) = &request.username {
                if state.taken_usernames.iter().any(|u| u.eq_ignore_ascii_case(username)) {
                    return Err(ClientError::Conflict {
                        field: Some("username".to_string()),
                        message: "Username already taken".to_string(),
                    });
                }
            }
            let profile = state
                .profile
                .as_mut()
                .ok_or_else(|| ClientError::NotFound("Profile not found".to_string()))?;
            if let Some(name) = &request.name {
                profile.name = name.clone();
            }
            if let Some(username) = &request.username {
                profile.username = username.clone();
            }
            Ok(profile.clone())
        }

        async fn delete_account(&self, _session: &Session) -> ClientResult<u64> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            let count = state.entries.len() as u64;
            state.entries.clear();
            state.profile = None;
            Ok(count)
        }
    }
}
