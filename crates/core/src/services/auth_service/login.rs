use crate::app_state::AppState;
use crate::security::SecurityConfig;
use crate::services::auth_service::password::PasswordService;
use crate::services::auth_service::AuthSession;
use agritrack_primitives::error::{ApiError, AuthError};
use agritrack_primitives::models::dtos::auth_dto::LoginRequest;
use secrecy::SecretString;
use tracing::{info, warn};
use validator::Validate;

pub struct LoginService;

impl LoginService {
    pub async fn login(state: &AppState, payload: LoginRequest) -> Result<AuthSession, ApiError> {
        let payload = payload.normalize();
        payload.validate()?;

        let user = state.users.find_by_national_id(&payload.national_id)?;

        // verify against a dummy hash when the user is unknown
        let matched = PasswordService::verify(
            SecretString::new(payload.password.into()),
            user.as_ref().map(|u| u.password_hash.clone()),
        )
        .await?;

        let user = match user {
            Some(user) if matched => user,
            _ => {
                warn!("auth.login: invalid credentials");
                return Err(ApiError::Auth(AuthError::InvalidCredentials));
            }
        };

        let token = SecurityConfig::create_token(state, user.id)?;

        info!(user_id = %user.id, role = %user.role, "User logged in successfully");

        Ok(AuthSession { token, user })
    }
}
