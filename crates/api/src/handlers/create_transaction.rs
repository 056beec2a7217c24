use crate::extract::ApiJson;
use agritrack_core::services::TransactionService;
use agritrack_core::{AppState, CurrentUser};
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::transaction_dto::{
    CreateTransactionRequest, TransactionEnvelope,
};
use axum::extract::State;
use axum::{Extension, Json};
use http::StatusCode;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = TransactionEnvelope),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    tag = "Transactions",
    security(("bearerAuth" = [])),
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionEnvelope>), ApiError> {
    let txn = TransactionService::create(&state, &user, payload)?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionEnvelope::new(
            txn,
            Some("Transaction created successfully"),
        )),
    ))
}
