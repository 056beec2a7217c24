mod common;

use agritrack_primitives::error::DUPLICATE_USER_MESSAGE;
use axum::http::StatusCode;
use common::fixtures::{register_payload, unique_aadhar, TEST_PASSWORD};
use common::{create_test_server, register_user, test_config};
use serde_json::{json, Value};

#[tokio::test]
async fn test_register_success() {
    let server = create_test_server();
    let payload = register_payload("farmer");

    let response = server.post("/api/auth/register").json(&payload).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["role"], "farmer");
    assert_eq!(body["user"]["aadhar"], payload["aadhar"]);
    assert_eq!(body["user"]["walletId"], payload["walletId"]);
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_generates_wallet_and_accepts_mixed_case_role() {
    let server = create_test_server();
    let mut payload = register_payload("distributor");
    payload["type"] = json!("Distributor");
    payload.as_object_mut().unwrap().remove("walletId");

    let response = server.post("/api/auth/register").json(&payload).await;

    response.assert_status(StatusCode::CREATED);
    let user = &response.json::<Value>()["user"];
    assert_eq!(user["role"], "distributor");
    assert!(user["walletId"]
        .as_str()
        .unwrap()
        .starts_with("wallet_distributor_"));
}

#[tokio::test]
async fn test_register_duplicate_aadhar() {
    let server = create_test_server();
    let first = register_payload("farmer");
    server
        .post("/api/auth/register")
        .json(&first)
        .await
        .assert_status(StatusCode::CREATED);

    let mut second = register_payload("retailer");
    second["aadhar"] = first["aadhar"].clone();
    let response = server.post("/api/auth/register").json(&second).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], DUPLICATE_USER_MESSAGE);

    let (token, _) = register_user(&server, "distributor").await;
    let users: Value = server
        .get("/api/auth/users")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(users["users"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_register_duplicate_username_or_wallet_creates_nothing() {
    let server = create_test_server();
    let (token, first) = register_user(&server, "farmer").await;

    let mut same_username = register_payload("retailer");
    same_username["username"] = first["username"].clone();
    let mut same_wallet = register_payload("distributor");
    same_wallet["walletId"] = first["walletId"].clone();

    for payload in [same_username, same_wallet] {
        let response = server.post("/api/auth/register").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], DUPLICATE_USER_MESSAGE);

        // the rejected identity cannot log in either
        server
            .post("/api/auth/login")
            .json(&json!({ "aadhar": payload["aadhar"], "password": TEST_PASSWORD }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    let users: Value = server
        .get("/api/auth/users")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(users["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let server = create_test_server();

    let mut short_aadhar = register_payload("farmer");
    short_aadhar["aadhar"] = json!("12345");
    let mut bad_role = register_payload("farmer");
    bad_role["type"] = json!("consumer");
    let mut short_password = register_payload("farmer");
    short_password["password"] = json!("abc");

    for payload in [short_aadhar, bad_role, short_password] {
        let response = server.post("/api/auth/register").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Validation failed");
    }

    let (token, _) = register_user(&server, "farmer").await;
    let users: Value = server
        .get("/api/auth/users")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(users["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_success() {
    let server = create_test_server();
    let payload = register_payload("retailer");
    server
        .post("/api/auth/register")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "aadhar": payload["aadhar"], "password": TEST_PASSWORD }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["username"], payload["username"]);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = create_test_server();
    let payload = register_payload("farmer");
    server
        .post("/api/auth/register")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "aadhar": payload["aadhar"], "password": "not-the-password" }))
        .await;
    let unknown_user = server
        .post("/api/auth/login")
        .json(&json!({ "aadhar": unique_aadhar(), "password": TEST_PASSWORD }))
        .await;

    for response in [wrong_password, unknown_user] {
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_current_user() {
    let server = create_test_server();
    let (token, user) = register_user(&server, "farmer").await;

    let response = server.get("/api/auth/me").authorization_bearer(&token).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], user["id"]);
}

#[tokio::test]
async fn test_protected_routes_require_valid_token() {
    let server = create_test_server();

    let missing = server.get("/api/auth/me").await;
    missing.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        missing.json::<Value>()["message"],
        "Authorization header required"
    );

    let garbage = server
        .get("/api/auth/me")
        .authorization_bearer("not.a.jwt")
        .await;
    garbage.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let server = create_test_server();
    let (_, user) = register_user(&server, "farmer").await;
    let jwt = test_config().jwt_details;
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "sub": user["id"],
        "iat": now,
        "exp": now + 3600,
        "iss": jwt.jwt_issuer,
        "aud": jwt.jwt_audience,
        "jti": "forged",
    });
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some_other_secret_that_is_32_chars_plus"),
    )
    .unwrap();

    server
        .get("/api/auth/me")
        .authorization_bearer(&forged)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile() {
    let server = create_test_server();
    let (token, user) = register_user(&server, "farmer").await;

    let response = server
        .put("/api/auth/profile")
        .authorization_bearer(&token)
        .json(&json!({ "address": "Plot 9, Pune" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["address"], "Plot 9, Pune");
    assert_eq!(body["user"]["username"], user["username"]);

    let too_short = server
        .put("/api/auth/profile")
        .authorization_bearer(&token)
        .json(&json!({ "username": "ab" }))
        .await;
    too_short.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile_rejects_taken_username() {
    let server = create_test_server();
    let (_, first) = register_user(&server, "farmer").await;
    let (token, _) = register_user(&server, "retailer").await;

    server
        .put("/api/auth/profile")
        .authorization_bearer(&token)
        .json(&json!({ "username": first["username"] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;
    register_user(&server, "distributor").await;

    server
        .get("/api/auth/users")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/auth/users")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let users = response.json::<Value>()["users"].as_array().unwrap().clone();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));
}
