mod common;

use axum::http::StatusCode;
use common::{create_test_server, create_transaction, register_user};
use serde_json::Value;

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "AgriTrack API is running");
    assert_eq!(body["environment"], "test");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = create_test_server();

    let response = server.get("/api/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let server = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let doc: Value = response.json();
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/auth/register",
        "/api/auth/login",
        "/api/transactions",
        "/api/transactions/{id}/supply-chain",
        "/api/transactions/{id}/link",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn test_pagination() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;
    for i in 0..25 {
        create_transaction(&server, &token, &format!("Crop {i}")).await;
    }

    let response = server
        .get("/api/transactions")
        .authorization_bearer(&token)
        .add_query_param("page", 2)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["transactions"].as_array().unwrap().len(), 10);
    assert_eq!(body["total"], 25);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["currentPage"], 2);

    let last: Value = server
        .get("/api/transactions")
        .authorization_bearer(&token)
        .add_query_param("page", 3)
        .await
        .json();
    assert_eq!(last["transactions"].as_array().unwrap().len(), 5);

    let wide: Value = server
        .get("/api/transactions")
        .authorization_bearer(&token)
        .add_query_param("limit", 100)
        .await
        .json();
    assert_eq!(wide["transactions"].as_array().unwrap().len(), 25);
    assert_eq!(wide["totalPages"], 1);
}

#[tokio::test]
async fn test_pagination_bounds() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;

    for (key, value) in [("page", 0), ("limit", 0), ("limit", 101), ("page", i64::MAX)] {
        server
            .get("/api/transactions")
            .authorization_bearer(&token)
            .add_query_param(key, value)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    let response = server
        .get("/api/transactions")
        .authorization_bearer(&token)
        .add_query_param("page", i64::MAX)
        .add_query_param("limit", 100)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Validation failed");

    let far: Value = server
        .get("/api/transactions")
        .authorization_bearer(&token)
        .add_query_param("page", 1_000_000)
        .add_query_param("limit", 100)
        .await
        .json();
    assert_eq!(far["transactions"].as_array().unwrap().len(), 0);
    assert_eq!(far["currentPage"], 1_000_000);
}
