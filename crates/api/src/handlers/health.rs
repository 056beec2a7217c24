use agritrack_core::AppState;
use agritrack_primitives::models::dtos::auth_dto::HealthStatus;
use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    summary = "Liveness check",
    description = "Reports that the API process is up. Public and does not touch the database.",
    operation_id = "healthCheck",
    responses(
        (status = 200, description = "Service is running", body = HealthStatus),
    ),
    security(()),
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        success: true,
        message: "AgriTrack API is running".to_string(),
        timestamp: Utc::now(),
        environment: state.config.app_env.clone(),
    })
}
