//! Account registration, password sign-in and bearer session handling.
//!
//! Passwords are hashed with Argon2 and never logged. Sessions are opaque
//! random tokens persisted server-side, so signing out invalidates them
//! immediately.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use rand_core::OsRng;
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::auth::{SignInCommand, SignInResult, SignUpCommand, SignUpResult, UserView};
use super::errors::{DomainError, DomainResult};
use super::models::{Account, Profile, Session};
use super::validation::{
    sanitize_text, validate_email, validate_name, validate_new_password, validate_username,
};
use crate::storage::{AccountStorage, Connection, ProfileStorage, SessionStorage};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const INVALID_SESSION: &str = "Invalid or expired session";

pub fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DomainError::Storage(anyhow::anyhow!("password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[derive(Clone)]
pub struct AuthService<C: Connection> {
    account_repository: C::AccountRepository,
    profile_repository: C::ProfileRepository,
    session_repository: C::SessionRepository,
    session_ttl: Duration,
}

impl<C: Connection> AuthService<C> {
    pub fn new(connection: Arc<C>, session_ttl: Duration) -> Self {
        Self {
            account_repository: connection.create_account_repository(),
            profile_repository: connection.create_profile_repository(),
            session_repository: connection.create_session_repository(),
            session_ttl,
        }
    }

    pub async fn sign_up(&self, command: SignUpCommand) -> DomainResult<SignUpResult> {
        let email = command.email.trim().to_lowercase();
        let name = sanitize_text(&command.name);
        let username = sanitize_text(&command.username);
        info!("Signing up {} as {}", email, username);

        validate_email(&email)?;
        validate_new_password(&command.password)?;
        validate_name(&name)?;
        validate_username(&username)?;

        if self.account_repository.get_account_by_email(&email).await?.is_some() {
            warn!("Sign-up rejected, email already registered: {}", email);
            return Err(DomainError::conflict("email", "Email already registered"));
        }
        if self.profile_repository.get_profile_by_username(&username).await?.is_some() {
            warn!("Sign-up rejected, username taken: {}", username);
            return Err(DomainError::conflict("username", "Username already taken"));
        }

        let now = Utc::now();
        let account = Account {
            id: Account::generate_id(),
            email,
            password_hash: hash_password(&command.password)?,
            created_at: now,
        };
        let profile = Profile {
            user_id: account.id.clone(),
            name,
            username,
            created_at: now,
            updated_at: now,
        };

        self.account_repository
            .create_account(&account, &profile)
            .await
            .map_err(|e| {
                warn!("Sign-up write rejected for {}: {}", account.email, e);
                DomainError::from_write(e)
            })?;
        info!("Created account {}", account.id);

        Ok(SignUpResult {
            user: UserView {
                account,
                profile: Some(profile),
            },
            success_message: "Account created successfully".to_string(),
        })
    }

    pub async fn sign_in(&self, command: SignInCommand) -> DomainResult<SignInResult> {
        let email = command.email.trim().to_lowercase();
        info!("Sign-in attempt for {}", email);

        let account = match self.account_repository.get_account_by_email(&email).await? {
            Some(account) if verify_password(&command.password, &account.password_hash) => account,
            _ => {
                warn!("Sign-in failed for {}", email);
                return Err(DomainError::Auth(INVALID_CREDENTIALS.to_string()));
            }
        };

        let session = Session::issue(&account.id, self.session_ttl);
        self.session_repository.store_session(&session).await?;
        let profile = self.profile_repository.get_profile(&account.id).await?;
        info!("Signed in {} until {}", account.id, session.expires_at);

        Ok(SignInResult {
            user: UserView { account, profile },
            session,
            success_message: "Signed in successfully".to_string(),
        })
    }

    /// Invalidate a token. Unknown tokens are ignored.
    pub async fn sign_out(&self, token: &str) -> DomainResult<()> {
        if self.session_repository.delete_session(token).await? {
            info!("Session ended");
        }
        Ok(())
    }

    /// Resolve a bearer token to the owning user id
    pub async fn authenticate(&self, token: &str) -> DomainResult<String> {
        let session = self
            .session_repository
            .get_session(token)
            .await?
            .ok_or_else(|| DomainError::Auth(INVALID_SESSION.to_string()))?;

        if session.is_expired(Utc::now()) {
            self.session_repository.delete_session(token).await?;
            warn!("Rejected expired session for user {}", session.user_id);
            return Err(DomainError::Auth(INVALID_SESSION.to_string()));
        }

        Ok(session.user_id)
    }

    pub async fn current_user(&self, user_id: &str) -> DomainResult<UserView> {
        let account = self
            .account_repository
            .get_account(user_id)
            .await?
            .ok_or_else(|| DomainError::Auth(INVALID_SESSION.to_string()))?;
        let profile = self.profile_repository.get_profile(user_id).await?;
        Ok(UserView { account, profile })
    }
}
