use crate::extract::ApiJson;
use agritrack_core::services::RegisterService;
use agritrack_core::AppState;
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::auth_dto::{AuthResponse, RegisterRequest};
use axum::extract::State;
use axum::Json;
use http::StatusCode;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Validation failed or user already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let session = RegisterService::register(&state, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "User registered successfully".into(),
            token: session.token,
            user: session.user.into(),
        }),
    ))
}
