use crate::extract::ApiJson;
use agritrack_core::services::TransactionService;
use agritrack_core::{AppState, CurrentUser};
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::transaction_dto::{
    LinkTransactionRequest, TransactionEnvelope,
};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/transactions/{id}/link",
    params(("id" = String, Path, description = "UUID or TXN code of the later transaction")),
    request_body = LinkTransactionRequest,
    responses(
        (status = 200, description = "Predecessor recorded", body = TransactionEnvelope),
        (status = 400, description = "Slot already taken, self link or cycle", body = ErrorBody),
        (status = 403, description = "Owned by another user", body = ErrorBody),
        (status = 404, description = "Either transaction not found", body = ErrorBody)
    ),
    tag = "Supply Chain",
    security(("bearerAuth" = [])),
)]
pub async fn link_transaction(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<LinkTransactionRequest>,
) -> Result<Json<TransactionEnvelope>, ApiError> {
    let txn = TransactionService::link(&state, &id, &user, payload)?;
    Ok(Json(TransactionEnvelope::new(
        txn,
        Some("Transactions linked successfully"),
    )))
}
