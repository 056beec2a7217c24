use agritrack_core::services::SupplyChainService;
use agritrack_core::AppState;
use agritrack_primitives::error::{ApiError, ErrorBody};
use agritrack_primitives::models::dtos::transaction_dto::{
    SupplyChainResponse, TransactionResponse,
};
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/transactions/{id}/supply-chain",
    params(("id" = String, Path, description = "Transaction UUID or TXN code")),
    responses(
        (status = 200, description = "Linked chain, oldest first", body = SupplyChainResponse),
        (status = 404, description = "Transaction not found", body = ErrorBody)
    ),
    tag = "Supply Chain",
    security(("bearerAuth" = [])),
)]
pub async fn supply_chain(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SupplyChainResponse>, ApiError> {
    let chain = SupplyChainService::history_for(&state, &id)?;

    Ok(Json(SupplyChainResponse {
        success: true,
        supply_chain: chain.iter().map(TransactionResponse::from).collect(),
    }))
}
