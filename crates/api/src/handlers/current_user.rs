use agritrack_core::CurrentUser;
use agritrack_primitives::error::ErrorBody;
use agritrack_primitives::models::dtos::auth_dto::CurrentUserResponse;
use axum::{Extension, Json};

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated user", body = CurrentUserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    tag = "Auth",
    security(("bearerAuth" = [])),
)]
pub async fn current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        success: true,
        user: user.into(),
    })
}
