use crate::models::entities::enum_types::{
    CropQuality, EntityType, SupplyChainStage, TransactionStatus, UserRole,
};
use crate::models::entities::transaction_details::{
    EntityDetails, Location, TransactionMetadata,
};
use crate::utility::numeric_quantity;
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Associations, Identifiable, Insertable, Queryable, Selectable};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(belongs_to(crate::models::entities::user::User, foreign_key = created_by))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Transaction {
    pub id: Uuid,
    pub transaction_id: String,
    pub created_by: Uuid,
    pub creator_role: UserRole,

    pub crop_name: String,
    pub quantity: String,
    pub quality: CropQuality,
    pub price: f64,
    pub price_unit: String,

    pub target_entity_id: String,
    pub target_entity_type: EntityType,
    pub target_entity_details: Option<Value>,

    pub transaction_date: DateTime<Utc>,

    pub previous_transaction: Option<Uuid>,
    pub next_transaction: Option<Uuid>,
    pub stage: SupplyChainStage,

    pub location: Option<Value>,
    pub metadata: Value,
    pub blockchain: Value,

    pub status: TransactionStatus,
    pub is_verified: bool,
    pub verified_by: Option<Uuid>,
    pub verification_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }

    /// First number found in `quantity` multiplied by `price`.
    pub fn total_value(&self) -> f64 {
        numeric_quantity(&self.quantity) * self.price
    }

    pub fn parsed_metadata(&self) -> TransactionMetadata {
        serde_json::from_value(self.metadata.clone()).unwrap_or_default()
    }

    pub fn parsed_location(&self) -> Option<Location> {
        self.location
            .clone()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn parsed_entity_details(&self) -> Option<EntityDetails> {
        self.target_entity_details
            .clone()
            .and_then(|v| serde_json::from_value(v).ok())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction {
    pub transaction_id: String,
    pub created_by: Uuid,
    pub creator_role: UserRole,
    pub crop_name: String,
    pub quantity: String,
    pub quality: CropQuality,
    pub price: f64,
    pub price_unit: String,
    pub target_entity_id: String,
    pub target_entity_type: EntityType,
    pub target_entity_details: Option<Value>,
    pub transaction_date: DateTime<Utc>,
    pub stage: SupplyChainStage,
    pub location: Option<Value>,
    pub metadata: Value,
    pub blockchain: Value,
    pub status: TransactionStatus,
    pub is_verified: bool,
}

impl NewTransaction {
    /// Materializes the row the way the database would, for stores
    /// that do not generate ids or timestamps themselves.
    pub fn into_transaction(self, id: Uuid, now: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            transaction_id: self.transaction_id,
            created_by: self.created_by,
            creator_role: self.creator_role,
            crop_name: self.crop_name,
            quantity: self.quantity,
            quality: self.quality,
            price: self.price,
            price_unit: self.price_unit,
            target_entity_id: self.target_entity_id,
            target_entity_type: self.target_entity_type,
            target_entity_details: self.target_entity_details,
            transaction_date: self.transaction_date,
            previous_transaction: None,
            next_transaction: None,
            stage: self.stage,
            location: self.location,
            metadata: self.metadata,
            blockchain: self.blockchain,
            status: self.status,
            is_verified: self.is_verified,
            verified_by: None,
            verification_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Full set of user-editable columns, written back after a patch is merged.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(treat_none_as_null = true)]
pub struct TransactionChanges<'a> {
    pub crop_name: &'a str,
    pub quantity: &'a str,
    pub quality: CropQuality,
    pub price: f64,
    pub price_unit: &'a str,
    pub target_entity_id: &'a str,
    pub target_entity_details: Option<&'a Value>,
    pub transaction_date: DateTime<Utc>,
    pub metadata: &'a Value,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Transaction> for TransactionChanges<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            crop_name: &txn.crop_name,
            quantity: &txn.quantity,
            quality: txn.quality,
            price: txn.price,
            price_unit: &txn.price_unit,
            target_entity_id: &txn.target_entity_id,
            target_entity_details: txn.target_entity_details.as_ref(),
            transaction_date: txn.transaction_date,
            metadata: &txn.metadata,
            updated_at: Utc::now(),
        }
    }
}
