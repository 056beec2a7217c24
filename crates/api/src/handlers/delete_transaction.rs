use agritrack_core::services::TransactionService;
use agritrack_core::{AppState, CurrentUser};
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::auth_dto::MessageResponse;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction UUID or TXN code")),
    responses(
        (status = 200, description = "Transaction deleted", body = MessageResponse),
        (status = 400, description = "Transaction no longer pending", body = ErrorBody),
        (status = 403, description = "Owned by another user", body = ErrorBody),
        (status = 404, description = "Transaction not found", body = ErrorBody)
    ),
    tag = "Transactions",
    security(("bearerAuth" = [])),
)]
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    TransactionService::delete(&state, &id, &user)?;
    Ok(Json(MessageResponse::ok("Transaction deleted successfully")))
}
