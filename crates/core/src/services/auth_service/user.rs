use crate::app_state::AppState;
use agritrack_primitives::error::ApiError;
use agritrack_primitives::models::dtos::auth_dto::UpdateProfileRequest;
use agritrack_primitives::models::entities::user::{ProfileChanges, User};
use chrono::Utc;
use tracing::info;

pub struct UserService;

impl UserService {
    /// Updates username and/or address. Absent or blank fields are ignored,
    /// and an update with nothing to change returns the user as-is.
    pub fn update_profile(
        state: &AppState,
        user: &User,
        payload: UpdateProfileRequest,
    ) -> Result<User, ApiError> {
        let payload = payload.normalize();

        if let Some(name) = payload.username.as_deref() {
            let len = name.chars().count();
            if !(3..=30).contains(&len) {
                return Err(ApiError::BadRequest(
                    "Username must be 3-30 characters".into(),
                ));
            }
        }

        let changes = ProfileChanges {
            username: payload.username.as_deref(),
            address: payload.address.as_deref(),
            updated_at: Some(Utc::now()),
        };
        if changes.is_empty() {
            return Ok(user.clone());
        }

        let updated = state.users.update_profile(user.id, changes)?;
        info!(user_id = %updated.id, "Profile updated");
        Ok(updated)
    }

    pub fn list_users(state: &AppState) -> Result<Vec<User>, ApiError> {
        state.users.list_all()
    }
}
