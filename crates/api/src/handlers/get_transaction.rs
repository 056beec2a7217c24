use agritrack_core::services::TransactionService;
use agritrack_core::{AppState, CurrentUser};
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::transaction_dto::TransactionEnvelope;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction UUID or TXN code")),
    responses(
        (status = 200, description = "Transaction", body = TransactionEnvelope),
        (status = 403, description = "Owned by another user", body = ErrorBody),
        (status = 404, description = "Transaction not found", body = ErrorBody)
    ),
    tag = "Transactions",
    security(("bearerAuth" = [])),
)]
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<TransactionEnvelope>, ApiError> {
    let txn = TransactionService::get(&state, &id, &user)?;
    Ok(Json(TransactionEnvelope::new(txn, None)))
}
