use serde_json::{json, Value};
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "secret123";

/// Twelve digit Aadhar-style number that is unique per call.
pub fn unique_aadhar() -> String {
    let digits: String = Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(12)
        .collect();
    format!("{digits:0>12}")
}

/// Registration body for `role` with unique identity fields.
pub fn register_payload(role: &str) -> Value {
    let tag = &Uuid::new_v4().simple().to_string()[..8];
    json!({
        "username": format!("{role}_{tag}"),
        "type": role,
        "address": "Village Road 4, Nashik, Maharashtra",
        "aadhar": unique_aadhar(),
        "password": TEST_PASSWORD,
        "walletId": format!("wallet_{role}_{tag}"),
    })
}

pub fn transaction_payload(crop: &str) -> Value {
    json!({
        "cropName": crop,
        "quantity": "100 kg",
        "quality": "Premium",
        "price": 25,
        "targetEntity": "DIST_001",
        "date": "2024-03-15",
        "location": {
            "address": { "city": "Nashik", "state": "Maharashtra" }
        },
        "metadata": {
            "harvestDate": "2024-03-10",
            "batchNumber": "B-42",
            "certifications": ["organic"]
        }
    })
}
