use crate::extract::ApiJson;
use agritrack_core::services::UserService;
use agritrack_core::{AppState, CurrentUser};
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::auth_dto::{ProfileResponse, UpdateProfileRequest};
use axum::extract::State;
use axum::{Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid or duplicate username", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    tag = "Auth",
    security(("bearerAuth" = [])),
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let updated = UserService::update_profile(&state, &user, payload)?;

    Ok(Json(ProfileResponse {
        success: true,
        message: "Profile updated successfully".into(),
        user: updated.into(),
    }))
}
