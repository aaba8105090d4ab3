use shared::{
    CurrentUser, SessionInfo, SignInRequest, SignUpRequest, UpdateProfileRequest, UserProfile,
};

use crate::domain::commands::auth::{SignInCommand, SignUpCommand, UserView};
use crate::domain::commands::profile::UpdateProfileCommand;
use crate::domain::models::{Profile, Session};

/// Converts accounts, profiles and sessions to their wire shapes
pub struct UserMapper;

impl UserMapper {
    pub fn profile_to_dto(profile: Profile) -> UserProfile {
        UserProfile {
            user_id: profile.user_id,
            name: profile.name,
            username: profile.username,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }

    /// The password hash never leaves the domain
    pub fn user_to_dto(user: UserView) -> CurrentUser {
        CurrentUser {
            id: user.account.id,
            email: user.account.email,
            created_at: user.account.created_at,
            profile: user.profile.map(Self::profile_to_dto),
        }
    }

    pub fn session_to_dto(session: Session) -> SessionInfo {
        SessionInfo {
            access_token: session.token,
            token_type: "bearer".to_string(),
            expires_at: session.expires_at,
        }
    }

    pub fn to_sign_up_command(request: SignUpRequest) -> SignUpCommand {
        SignUpCommand {
            email: request.email,
            password: request.password,
            name: request.name,
            username: request.username,
        }
    }

    pub fn to_sign_in_command(request: SignInRequest) -> SignInCommand {
        SignInCommand {
            email: request.email,
            password: request.password,
        }
    }

    pub fn to_update_profile_command(user_id: &str, request: UpdateProfileRequest) -> UpdateProfileCommand {
        UpdateProfileCommand {
            user_id: user_id.to_string(),
            name: request.name,
            username: request.username,
        }
    }
}
