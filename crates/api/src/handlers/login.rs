use crate::extract::ApiJson;
use agritrack_core::services::LoginService;
use agritrack_core::AppState;
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::auth_dto::{AuthResponse, LoginRequest};
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = LoginService::login(&state, payload).await?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".into(),
        token: session.token,
        user: session.user.into(),
    }))
}
