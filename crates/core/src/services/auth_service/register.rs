use crate::app_state::AppState;
use crate::security::SecurityConfig;
use crate::services::auth_service::password::PasswordService;
use crate::services::auth_service::AuthSession;
use agritrack_primitives::error::{ApiError, DUPLICATE_USER_MESSAGE};
use agritrack_primitives::models::dtos::auth_dto::RegisterRequest;
use agritrack_primitives::models::entities::enum_types::UserRole;
use agritrack_primitives::models::entities::user::NewUser;
use agritrack_primitives::utility::default_wallet_id;
use chrono::Utc;
use secrecy::SecretString;
use tracing::{info, warn};
use validator::Validate;

pub struct RegisterService;

impl RegisterService {
    pub async fn register(
        state: &AppState,
        payload: RegisterRequest,
    ) -> Result<AuthSession, ApiError> {
        let payload = payload.normalize();
        payload.validate()?;

        let role = UserRole::parse(&payload.role)?;
        let wallet_id = payload
            .wallet_id
            .clone()
            .unwrap_or_else(|| default_wallet_id(role, Utc::now()));

        if state
            .users
            .find_conflicting(&payload.username, &payload.national_id, &wallet_id)?
            .is_some()
        {
            warn!(username = %payload.username, "auth.register: duplicate user");
            return Err(ApiError::Conflict(DUPLICATE_USER_MESSAGE.into()));
        }

        let password_hash = PasswordService::hash(
            SecretString::new(payload.password.into()),
            state.config.bcrypt_cost,
        )
        .await?;

        let user = state.users.create(NewUser {
            username: &payload.username,
            password_hash: &password_hash,
            role,
            address: &payload.address,
            national_id: &payload.national_id,
            wallet_id: &wallet_id,
        })?;

        let token = SecurityConfig::create_token(state, user.id)?;

        info!(
            user_id = %user.id,
            role = %user.role,
            "User registered successfully"
        );

        Ok(AuthSession { token, user })
    }
}
