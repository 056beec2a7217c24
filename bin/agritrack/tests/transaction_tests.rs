mod common;

use axum::http::StatusCode;
use common::fixtures::transaction_payload;
use common::{create_test_server, create_transaction, register_user};
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_transaction_derives_stage_and_target() {
    let server = create_test_server();
    let (token, user) = register_user(&server, "farmer").await;

    let response = server
        .post("/api/transactions")
        .authorization_bearer(&token)
        .json(&transaction_payload("Basmati Rice"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    let txn = &body["transaction"];
    assert!(txn["transactionId"].as_str().unwrap().starts_with("TXN_FARMER_"));
    assert_eq!(txn["createdBy"], user["id"]);
    assert_eq!(txn["creatorRole"], "farmer");
    assert_eq!(txn["cropDetails"]["cropName"], "Basmati Rice");
    assert_eq!(txn["cropDetails"]["priceUnit"], "per kg");
    assert_eq!(txn["targetEntity"]["entityId"], "DIST_001");
    assert_eq!(txn["targetEntity"]["entityType"], "distributor");
    assert_eq!(txn["supplyChain"]["stage"], "production");
    assert!(txn["supplyChain"]["previousTransaction"].is_null());
    assert!(txn["supplyChain"]["nextTransaction"].is_null());
    assert_eq!(txn["location"]["address"]["country"], "India");
    assert_eq!(txn["metadata"]["batchNumber"], "B-42");
    assert_eq!(txn["status"], "pending");
    assert_eq!(txn["isVerified"], false);
    assert_eq!(txn["totalValue"], 2500.0);
}

#[tokio::test]
async fn test_create_transaction_stage_follows_role() {
    let server = create_test_server();
    let (distributor, _) = register_user(&server, "distributor").await;
    let (retailer, _) = register_user(&server, "retailer").await;

    let d = create_transaction(&server, &distributor, "Wheat").await;
    let r = create_transaction(&server, &retailer, "Wheat").await;

    assert_eq!(d["supplyChain"]["stage"], "distribution");
    assert_eq!(d["targetEntity"]["entityType"], "retailer");
    assert_eq!(r["supplyChain"]["stage"], "retail");
    assert_eq!(r["targetEntity"]["entityType"], "consumer");
}

#[tokio::test]
async fn test_create_transaction_accepts_string_price() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;
    let mut payload = transaction_payload("Onion");
    payload["price"] = json!("12.5");
    payload["priceUnit"] = json!("per quintal");

    let response = server
        .post("/api/transactions")
        .authorization_bearer(&token)
        .json(&payload)
        .await;

    response.assert_status(StatusCode::CREATED);
    let txn = &response.json::<Value>()["transaction"];
    assert_eq!(txn["cropDetails"]["price"], 12.5);
    assert_eq!(txn["cropDetails"]["priceUnit"], "per quintal");
}

#[tokio::test]
async fn test_create_transaction_rejects_non_finite_price() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;

    for price in ["NaN", "inf", "-inf"] {
        let mut payload = transaction_payload("Rice");
        payload["price"] = json!(price);
        let response = server
            .post("/api/transactions")
            .authorization_bearer(&token)
            .json(&payload)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["success"], false);
    }

    let listed: Value = server
        .get("/api/transactions")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(listed["total"], 0);
}

#[tokio::test]
async fn test_create_transaction_validation() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;

    let mut blank_crop = transaction_payload("x");
    blank_crop["cropName"] = json!("   ");
    let mut negative_price = transaction_payload("Rice");
    negative_price["price"] = json!(-1);
    let mut bad_quality = transaction_payload("Rice");
    bad_quality["quality"] = json!("Grade C");
    let mut missing_target = transaction_payload("Rice");
    missing_target.as_object_mut().unwrap().remove("targetEntity");

    for payload in [blank_crop, negative_price, bad_quality, missing_target] {
        let response = server
            .post("/api/transactions")
            .authorization_bearer(&token)
            .json(&payload)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["success"], false);
    }
}

#[tokio::test]
async fn test_get_transaction_by_uuid_and_code() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;
    let txn = create_transaction(&server, &token, "Tomato").await;

    for key in ["id", "transactionId"] {
        let path = format!("/api/transactions/{}", txn[key].as_str().unwrap());
        let response = server.get(&path).authorization_bearer(&token).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["transaction"]["id"], txn["id"]);
    }

    server
        .get("/api/transactions/TXN_FARMER_missing_00000")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_transactions_are_private_to_their_creator() {
    let server = create_test_server();
    let (owner, _) = register_user(&server, "farmer").await;
    let (other, _) = register_user(&server, "farmer").await;
    let txn = create_transaction(&server, &owner, "Mango").await;
    let path = format!("/api/transactions/{}", txn["id"].as_str().unwrap());

    let read = server.get(&path).authorization_bearer(&other).await;
    read.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(read.json::<Value>()["message"], "Access denied");

    server
        .put(&path)
        .authorization_bearer(&other)
        .json(&json!({ "cropDetails": { "quantity": "1 kg" } }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    server
        .delete(&path)
        .authorization_bearer(&other)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    server
        .post(&format!("{path}/confirm"))
        .authorization_bearer(&other)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let unchanged: Value = server.get(&path).authorization_bearer(&owner).await.json();
    assert_eq!(unchanged["transaction"]["status"], "pending");
    assert_eq!(unchanged["transaction"]["cropDetails"]["quantity"], "100 kg");

    let listed = server
        .get("/api/transactions")
        .authorization_bearer(&other)
        .await;
    listed.assert_status_ok();
    assert_eq!(listed.json::<Value>()["total"], 0);
}

#[tokio::test]
async fn test_list_transactions_filters() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;
    let rice = create_transaction(&server, &token, "Basmati Rice").await;
    create_transaction(&server, &token, "Wheat").await;
    create_transaction(&server, &token, "Brown rice").await;

    server
        .post(&format!(
            "/api/transactions/{}/confirm",
            rice["id"].as_str().unwrap()
        ))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let by_crop = server
        .get("/api/transactions")
        .authorization_bearer(&token)
        .add_query_param("cropName", "RICE")
        .await;
    by_crop.assert_status_ok();
    assert_eq!(by_crop.json::<Value>()["total"], 2);

    let by_status = server
        .get("/api/transactions")
        .authorization_bearer(&token)
        .add_query_param("status", "confirmed")
        .await;
    let body: Value = by_status.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["transactions"][0]["id"], rice["id"]);

    server
        .get("/api/transactions")
        .authorization_bearer(&token)
        .add_query_param("status", "shipped")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_transactions_newest_first() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;
    create_transaction(&server, &token, "First").await;
    let last = create_transaction(&server, &token, "Second").await;

    let body: Value = server
        .get("/api/transactions")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(body["transactions"][0]["id"], last["id"]);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn test_update_pending_transaction_merges_fields() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;
    let txn = create_transaction(&server, &token, "Potato").await;
    let path = format!("/api/transactions/{}", txn["id"].as_str().unwrap());

    let response = server
        .put(&path)
        .authorization_bearer(&token)
        .json(&json!({
            "cropDetails": { "price": 30, "quality": "Grade A" },
            "metadata": { "notes": "cold storage" }
        }))
        .await;

    response.assert_status_ok();
    let updated = &response.json::<Value>()["transaction"];
    assert_eq!(updated["cropDetails"]["price"], 30.0);
    assert_eq!(updated["cropDetails"]["quality"], "Grade A");
    assert_eq!(updated["cropDetails"]["cropName"], "Potato");
    assert_eq!(updated["metadata"]["notes"], "cold storage");
    assert_eq!(updated["metadata"]["batchNumber"], "B-42");
    assert_eq!(updated["totalValue"], 3000.0);
}

#[tokio::test]
async fn test_update_rejects_invalid_values() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;
    let txn = create_transaction(&server, &token, "Potato").await;
    let path = format!("/api/transactions/{}", txn["id"].as_str().unwrap());

    server
        .put(&path)
        .authorization_bearer(&token)
        .json(&json!({ "cropDetails": { "price": -5 } }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_confirmed_transaction_is_frozen() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;
    let txn = create_transaction(&server, &token, "Garlic").await;
    let path = format!("/api/transactions/{}", txn["id"].as_str().unwrap());

    let confirmed = server
        .post(&format!("{path}/confirm"))
        .authorization_bearer(&token)
        .await;
    confirmed.assert_status_ok();
    assert_eq!(confirmed.json::<Value>()["transaction"]["status"], "confirmed");

    let update = server
        .put(&path)
        .authorization_bearer(&token)
        .json(&json!({ "cropDetails": { "quantity": "5 kg" } }))
        .await;
    update.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        update.json::<Value>()["message"],
        "Cannot update confirmed or completed transactions"
    );

    let delete = server.delete(&path).authorization_bearer(&token).await;
    delete.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        delete.json::<Value>()["message"],
        "Cannot delete confirmed or completed transactions"
    );

    let stored = server.get(&path).authorization_bearer(&token).await;
    stored.assert_status_ok();
    let stored = &stored.json::<Value>()["transaction"];
    assert_eq!(stored["status"], "confirmed");
    assert_eq!(stored["cropDetails"]["quantity"], "100 kg");
    assert_eq!(stored["updatedAt"], confirmed.json::<Value>()["transaction"]["updatedAt"]);

    // confirming again is allowed
    server
        .post(&format!("{path}/confirm"))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_delete_transaction() {
    let server = create_test_server();
    let (token, _) = register_user(&server, "farmer").await;
    let txn = create_transaction(&server, &token, "Chilli").await;
    let path = format!("/api/transactions/{}", txn["transactionId"].as_str().unwrap());

    let response = server.delete(&path).authorization_bearer(&token).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Transaction deleted successfully");

    server
        .get(&path)
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
