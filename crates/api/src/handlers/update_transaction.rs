use crate::extract::ApiJson;
use agritrack_core::services::TransactionService;
use agritrack_core::{AppState, CurrentUser};
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::transaction_dto::TransactionEnvelope;
use agritrack_primitives::models::dtos::transaction_patch::UpdateTransactionRequest;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction UUID or TXN code")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated", body = TransactionEnvelope),
        (status = 400, description = "Invalid patch or transaction no longer pending", body = ErrorBody),
        (status = 403, description = "Owned by another user", body = ErrorBody),
        (status = 404, description = "Transaction not found", body = ErrorBody)
    ),
    tag = "Transactions",
    security(("bearerAuth" = [])),
)]
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<UpdateTransactionRequest>,
) -> Result<Json<TransactionEnvelope>, ApiError> {
    let txn = TransactionService::update(&state, &id, &user, patch)?;
    Ok(Json(TransactionEnvelope::new(
        txn,
        Some("Transaction updated successfully"),
    )))
}
