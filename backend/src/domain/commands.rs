//! Domain-level command and result types.
//!
//! Services take these instead of the wire DTOs from `shared`; the REST
//! mappers translate between the two. The owning user id always comes from
//! the authenticated session, never from a request body.

pub mod entries {
    use crate::domain::models::FinancialEntry;
    use std::collections::BTreeMap;

    /// Input for creating an entry. Figures are raw and unvalidated.
    #[derive(Debug, Clone, Default)]
    pub struct CreateEntryCommand {
        pub user_id: String,
        pub category: Option<String>,
        pub description: Option<String>,
        pub amount: Option<f64>,
        pub cash: Option<f64>,
        pub investment: Option<f64>,
        pub current_value: Option<f64>,
        pub month: Option<String>,
        pub month_number: Option<u32>,
        pub year: Option<i32>,
    }

    /// Partial update; `None` leaves the stored value in place
    #[derive(Debug, Clone, Default)]
    pub struct UpdateEntryCommand {
        pub user_id: String,
        pub entry_id: String,
        pub category: Option<String>,
        pub description: Option<String>,
        pub amount: Option<f64>,
        pub cash: Option<f64>,
        pub investment: Option<f64>,
        pub current_value: Option<f64>,
        pub month: Option<String>,
        pub month_number: Option<u32>,
        pub year: Option<i32>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteEntryResult {
        pub deleted: bool,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct ClearAllResult {
        pub deleted_count: u64,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct EntryResult {
        pub entry: FinancialEntry,
        pub success_message: String,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct EntryStats {
        pub total_amount: f64,
        pub total_entries: usize,
        pub category_breakdown: BTreeMap<String, f64>,
        pub average_amount: f64,
    }
}

pub mod auth {
    use crate::domain::models::{Account, Profile, Session};
    use std::fmt;

    #[derive(Clone)]
    pub struct SignUpCommand {
        pub email: String,
        pub password: String,
        pub name: String,
        pub username: String,
    }

    impl fmt::Debug for SignUpCommand {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("SignUpCommand")
                .field("email", &self.email)
                .field("password", &"<redacted>")
                .field("name", &self.name)
                .field("username", &self.username)
                .finish()
        }
    }

    #[derive(Clone)]
    pub struct SignInCommand {
        pub email: String,
        pub password: String,
    }

    impl fmt::Debug for SignInCommand {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("SignInCommand")
                .field("email", &self.email)
                .field("password", &"<redacted>")
                .finish()
        }
    }

    /// Account plus its profile, if one exists
    #[derive(Debug, Clone)]
    pub struct UserView {
        pub account: Account,
        pub profile: Option<Profile>,
    }

    #[derive(Debug, Clone)]
    pub struct SignUpResult {
        pub user: UserView,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct SignInResult {
        pub user: UserView,
        pub session: Session,
        pub success_message: String,
    }
}

pub mod profile {
    #[derive(Debug, Clone, Default)]
    pub struct UpdateProfileCommand {
        pub user_id: String,
        pub name: Option<String>,
        pub username: Option<String>,
    }
}
