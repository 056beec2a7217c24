use crate::models::entities::enum_types::{
    CropQuality, EntityType, SupplyChainStage, TransactionStatus, UserRole,
};
use crate::models::entities::transaction::Transaction;
use crate::models::entities::transaction_details::{
    BlockchainRecord, EntityDetails, Location, TransactionMetadata,
};
use crate::utility::validate_not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_PRICE_UNIT: &str = "per kg";
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE: i64 = 1_000_000;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[schema(example = "Basmati Rice")]
    #[validate(custom(function = "validate_not_blank", message = "Crop name is required"))]
    pub crop_name: String,

    #[schema(example = "100 kg")]
    #[validate(custom(function = "validate_not_blank", message = "Quantity is required"))]
    pub quantity: String,

    pub quality: CropQuality,

    /// Accepted as a number or a numeric string.
    #[schema(value_type = f64, example = 25.5)]
    #[serde(deserialize_with = "crate::utility::price::deserialize")]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[schema(example = "per kg")]
    pub price_unit: Option<String>,

    /// Identifier of the receiving party.
    #[schema(example = "DIST-042")]
    #[validate(custom(function = "validate_not_blank", message = "Target entity is required"))]
    pub target_entity: String,

    pub target_entity_details: Option<EntityDetails>,

    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    #[schema(value_type = String, example = "2024-03-15")]
    #[serde(deserialize_with = "crate::utility::flexible_date::deserialize")]
    pub date: DateTime<Utc>,

    pub location: Option<Location>,

    pub metadata: Option<TransactionMetadata>,
}

impl CreateTransactionRequest {
    pub fn normalize(mut self) -> Self {
        self.crop_name = self.crop_name.trim().to_string();
        self.quantity = self.quantity.trim().to_string();
        self.target_entity = self.target_entity.trim().to_string();
        self.price_unit = self
            .price_unit
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        self
    }
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListTransactionsQuery {
    /// 1-based page number (default 1, at most 1000000).
    #[validate(range(min = 1, max = 1000000, message = "page must be between 1 and 1000000"))]
    pub page: Option<i64>,
    /// Page size, 1 to 100 (default 10).
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    /// pending, confirmed, completed or cancelled.
    pub status: Option<String>,
    /// Case-insensitive substring of the crop name.
    pub crop_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub status: Option<TransactionStatus>,
    pub crop_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Rows to skip. Saturates instead of overflowing on out-of-range input.
    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .max(0)
            .saturating_mul(self.limit.max(0))
    }
}

#[derive(Debug, Clone)]
pub struct TransactionPage {
    pub items: Vec<Transaction>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl TransactionPage {
    pub fn total_pages(&self) -> i64 {
        if self.limit <= 0 {
            return 0;
        }
        (self.total + self.limit - 1) / self.limit
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropDetails {
    pub crop_name: String,
    pub quantity: String,
    pub quality: CropQuality,
    pub price: f64,
    pub price_unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetEntity {
    pub entity_id: String,
    pub entity_type: EntityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_details: Option<EntityDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainLinks {
    pub previous_transaction: Option<Uuid>,
    pub next_transaction: Option<Uuid>,
    pub stage: SupplyChainStage,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    #[schema(example = "TXN_FARMER_lq2w8x1c_4kz9a")]
    pub transaction_id: String,
    pub created_by: Uuid,
    pub creator_role: UserRole,
    pub crop_details: CropDetails,
    pub target_entity: TargetEntity,
    pub transaction_date: DateTime<Utc>,
    pub supply_chain: SupplyChainLinks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub metadata: TransactionMetadata,
    pub blockchain: BlockchainRecord,
    pub status: TransactionStatus,
    pub is_verified: bool,
    pub verified_by: Option<Uuid>,
    pub verification_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Leading number of `quantity` times `price`.
    pub total_value: f64,
}

impl From<&Transaction> for TransactionResponse {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id,
            transaction_id: txn.transaction_id.clone(),
            created_by: txn.created_by,
            creator_role: txn.creator_role,
            crop_details: CropDetails {
                crop_name: txn.crop_name.clone(),
                quantity: txn.quantity.clone(),
                quality: txn.quality,
                price: txn.price,
                price_unit: txn.price_unit.clone(),
            },
            target_entity: TargetEntity {
                entity_id: txn.target_entity_id.clone(),
                entity_type: txn.target_entity_type,
                entity_details: txn.parsed_entity_details(),
            },
            transaction_date: txn.transaction_date,
            supply_chain: SupplyChainLinks {
                previous_transaction: txn.previous_transaction,
                next_transaction: txn.next_transaction,
                stage: txn.stage,
            },
            location: txn.parsed_location(),
            metadata: txn.parsed_metadata(),
            blockchain: serde_json::from_value(txn.blockchain.clone()).unwrap_or_default(),
            status: txn.status,
            is_verified: txn.is_verified,
            verified_by: txn.verified_by,
            verification_date: txn.verification_date,
            created_at: txn.created_at,
            updated_at: txn.updated_at,
            total_value: txn.total_value(),
        }
    }
}

impl From<Transaction> for TransactionResponse {
    fn from(txn: Transaction) -> Self {
        Self::from(&txn)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub transaction: TransactionResponse,
}

impl TransactionEnvelope {
    pub fn new(transaction: impl Into<TransactionResponse>, message: Option<&str>) -> Self {
        Self {
            success: true,
            message: message.map(String::from),
            transaction: transaction.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListResponse {
    pub success: bool,
    pub transactions: Vec<TransactionResponse>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: i64,
}

impl From<TransactionPage> for TransactionListResponse {
    fn from(page: TransactionPage) -> Self {
        Self {
            success: true,
            total_pages: page.total_pages(),
            current_page: page.page,
            total: page.total,
            transactions: page.items.iter().map(TransactionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainResponse {
    pub success: bool,
    pub supply_chain: Vec<TransactionResponse>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkTransactionRequest {
    /// UUID or transaction code of the predecessor.
    #[schema(example = "TXN_FARMER_lq2w8x1c_4kz9a")]
    #[validate(custom(function = "validate_not_blank", message = "previousTransactionId is required"))]
    pub previous_transaction_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn total_pages_rounds_up() {
        let page = |total| TransactionPage {
            items: vec![],
            total,
            page: 1,
            limit: 10,
        };
        assert_eq!(page(0).total_pages(), 0);
        assert_eq!(page(10).total_pages(), 1);
        assert_eq!(page(25).total_pages(), 3);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest { page: 1, limit: 10 }.offset(), 0);
        assert_eq!(PageRequest { page: 3, limit: 10 }.offset(), 20);
        assert_eq!(
            PageRequest { page: i64::MAX, limit: MAX_PAGE_SIZE }.offset(),
            i64::MAX
        );
    }

    #[test]
    fn create_accepts_string_prices_and_plain_dates() {
        let req: CreateTransactionRequest = serde_json::from_value(json!({
            "cropName": " Wheat ",
            "quantity": "50 quintal",
            "quality": "Grade A",
            "price": "2150.5",
            "targetEntity": "DIST-1",
            "date": "2024-04-01"
        }))
        .unwrap();
        let req = req.normalize();
        assert_eq!(req.crop_name, "Wheat");
        assert_eq!(req.price, 2150.5);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn negative_price_fails_validation() {
        let req: CreateTransactionRequest = serde_json::from_value(json!({
            "cropName": "Wheat",
            "quantity": "50",
            "quality": "Standard",
            "price": -1,
            "targetEntity": "DIST-1",
            "date": "2024-04-01"
        }))
        .unwrap();
        assert!(req.validate().unwrap_err().field_errors().contains_key("price"));
    }

    #[test]
    fn list_query_bounds() {
        let q = ListTransactionsQuery {
            page: Some(0),
            limit: Some(101),
            ..Default::default()
        };
        let errors = q.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("page"));
        assert!(errors.field_errors().contains_key("limit"));

        let huge = ListTransactionsQuery {
            page: Some(i64::MAX),
            limit: Some(MAX_PAGE_SIZE),
            ..Default::default()
        };
        assert!(huge.validate().unwrap_err().field_errors().contains_key("page"));
        let last = ListTransactionsQuery {
            page: Some(MAX_PAGE),
            limit: Some(MAX_PAGE_SIZE),
            ..Default::default()
        };
        assert!(last.validate().is_ok());
    }

    #[test]
    fn non_finite_string_price_is_rejected() {
        for price in ["NaN", "inf", "-inf"] {
            let parsed = serde_json::from_value::<CreateTransactionRequest>(json!({
                "cropName": "Wheat",
                "quantity": "50",
                "quality": "Standard",
                "price": price,
                "targetEntity": "DIST-1",
                "date": "2024-04-01"
            }));
            assert!(parsed.is_err(), "{price}");
        }
    }
}
