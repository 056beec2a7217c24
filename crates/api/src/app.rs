use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    confirm_transaction::confirm_transaction, create_transaction::create_transaction,
    current_user::current_user, delete_transaction::delete_transaction,
    get_transaction::get_transaction, health::health_check, link_transaction::link_transaction,
    list_transactions::list_transactions, list_users::list_users, login::login,
    register::register, supply_chain::supply_chain, update_profile::update_profile,
    update_transaction::update_transaction,
};
use agritrack_core::{AppState, SecurityConfig};
use agritrack_primitives::error::ErrorBody;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::{middleware, Json, Router};
use http::StatusCode;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    // public routes (no authentication)
    let public_router = create_public_routers();

    // protected routes (require JWT authentication)
    let protected_router = create_secured_routers(&state);

    let mut router = Router::new()
        .merge(public_router)
        .merge(protected_router)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    // the limiter keys on the peer address, which in-process test servers lack
    if state.config.rate_limit_enabled() {
        let quota = state.config.rate_limit;
        match GovernorConfigBuilder::default()
            .per_millisecond(quota.replenish_interval_ms())
            .burst_size(quota.max_requests)
            .finish()
        {
            Some(conf) => router = router.layer(GovernorLayer::new(Arc::new(conf))),
            None => warn!("invalid rate limit configuration, limiter disabled"),
        }
    }

    router.with_state(state)
}

fn create_secured_routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/me", get(current_user))
        .route("/api/auth/profile", put(update_profile))
        .route("/api/auth/users", get(list_users))
        .route(
            "/api/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/api/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route("/api/transactions/{id}/supply-chain", get(supply_chain))
        .route("/api/transactions/{id}/confirm", post(confirm_transaction))
        .route("/api/transactions/{id}/link", post(link_transaction))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::auth_middleware,
        ))
}

fn create_public_routers() -> Router<Arc<AppState>> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/health", get(health_check))
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            success: false,
            message: "API endpoint not found".into(),
            error: None,
        }),
    )
}
