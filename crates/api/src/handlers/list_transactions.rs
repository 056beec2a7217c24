use crate::extract::ApiQuery;
use agritrack_core::services::TransactionService;
use agritrack_core::{AppState, CurrentUser};
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::transaction_dto::{
    ListTransactionsQuery, TransactionListResponse,
};
use axum::extract::State;
use axum::{Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/transactions",
    params(ListTransactionsQuery),
    responses(
        (status = 200, description = "Caller's transactions, newest first", body = TransactionListResponse),
        (status = 400, description = "Invalid paging or filter", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    tag = "Transactions",
    security(("bearerAuth" = [])),
)]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiQuery(query): ApiQuery<ListTransactionsQuery>,
) -> Result<Json<TransactionListResponse>, ApiError> {
    let page = TransactionService::list(&state, &user, query)?;
    Ok(Json(page.into()))
}
