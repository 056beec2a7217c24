#![allow(dead_code)]

use agritrack_core::repositories::memory::{
    InMemoryTransactionRepository, InMemoryUserRepository,
};
use agritrack_core::AppState;
use agritrack_primitives::models::app_state::{AppConfig, JWTInfo, RateLimitInfo};
use axum::http::StatusCode;
use axum::Router;
use axum_test::TestServer;
use serde_json::Value;
use std::sync::Arc;

pub mod fixtures;

pub const TEST_JWT_SECRET: &str = "test_secret_key_minimum_32_characters_long_for_testing";

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_details: JWTInfo::from_parts(
            TEST_JWT_SECRET.into(),
            30,
            "agritrack".into(),
            "agritrack_api".into(),
        )
        .expect("test JWT config"),
        app_env: "test".into(),
        bcrypt_cost: 4,
        cors_origins: vec!["http://localhost:3000".into()],
        rate_limit: RateLimitInfo::default(),
    }
}

/// Application state backed by in-memory repositories.
pub fn create_test_app_state() -> Arc<AppState> {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(agritrack::utility::logging::setup_logging);

    AppState::with_repositories(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryTransactionRepository::new()),
        test_config(),
    )
}

pub fn create_test_app(state: Arc<AppState>) -> Router {
    agritrack_api::create_router(state)
}

pub fn create_test_server() -> TestServer {
    TestServer::new(create_test_app(create_test_app_state())).expect("test server")
}

/// Registers a user with `role` and returns its token and user JSON.
pub async fn register_user(server: &TestServer, role: &str) -> (String, Value) {
    let response = server
        .post("/api/auth/register")
        .json(&fixtures::register_payload(role))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    (
        body["token"].as_str().expect("token").to_string(),
        body["user"].clone(),
    )
}

/// Creates a transaction for `token` and returns the transaction JSON.
pub async fn create_transaction(server: &TestServer, token: &str, crop: &str) -> Value {
    let response = server
        .post("/api/transactions")
        .authorization_bearer(token)
        .json(&fixtures::transaction_payload(crop))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["transaction"].clone()
}
