use crate::observability::metrics::metrics_router;
use agritrack_core::app_state::AppState;
use axum::Router;
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use eyre::Report;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Credentialed CORS for the configured origins. Credentials rule out
/// wildcards, so methods and headers are listed explicitly.
pub fn build_cors(origins: &[String]) -> Result<CorsLayer, Report> {
    let allowed_origins = origins
        .iter()
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| eyre::eyre!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        .allow_credentials(true)
        .allow_origin(allowed_origins))
}

pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded .env file");
    } else {
        info!("No .env file found, using system environment");
    }
}

pub fn build_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Result<Router, Report> {
    let cors = build_cors(&state.config.cors_origins)?;

    Ok(agritrack_api::create_router(state)
        .merge(metrics_router(metric_handle))
        .layer(metric_layer)
        .layer(cors))
}
