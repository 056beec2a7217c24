use agritrack_core::services::UserService;
use agritrack_core::AppState;
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::auth_dto::{UserResponse, UsersResponse};
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/auth/users",
    responses(
        (status = 200, description = "All users, newest first", body = UsersResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    tag = "Auth",
    security(("bearerAuth" = [])),
)]
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<UsersResponse>, ApiError> {
    let users = UserService::list_users(&state)?;

    Ok(Json(UsersResponse {
        success: true,
        users: users.iter().map(UserResponse::from).collect(),
    }))
}
