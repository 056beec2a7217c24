//! Partial updates for pending transactions.
//!
//! Each sub-object is merged one level deep: a field present in the patch
//! replaces the stored value, an absent field keeps it. Nested objects such
//! as `entityDetails` are replaced whole.

use crate::error::ApiError;
use crate::models::entities::enum_types::CropQuality;
use crate::models::entities::transaction::Transaction;
use crate::models::entities::transaction_details::EntityDetails;
use crate::utility::validate_not_blank;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropDetailsPatch {
    pub crop_name: Option<String>,
    pub quantity: Option<String>,
    pub quality: Option<CropQuality>,
    #[schema(value_type = Option<f64>)]
    #[serde(default, deserialize_with = "crate::utility::price::option")]
    pub price: Option<f64>,
    pub price_unit: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetEntityPatch {
    pub entity_id: Option<String>,
    pub entity_details: Option<EntityDetails>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPatch {
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "crate::utility::flexible_date::option")]
    pub harvest_date: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "crate::utility::flexible_date::option")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub storage_conditions: Option<String>,
    pub transport_method: Option<String>,
    pub certifications: Option<Vec<String>>,
    pub batch_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    pub crop_details: Option<CropDetailsPatch>,
    pub target_entity: Option<TargetEntityPatch>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "crate::utility::flexible_date::option")]
    pub transaction_date: Option<DateTime<Utc>>,
    pub metadata: Option<MetadataPatch>,
}

fn field_error(errors: &mut ValidationErrors, field: &'static str, message: &'static str) {
    let mut err = ValidationError::new("invalid");
    err.message = Some(message.into());
    errors.add(field, err);
}

impl Validate for UpdateTransactionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(crop) = &self.crop_details {
            if crop.crop_name.as_deref().is_some_and(|v| validate_not_blank(v).is_err()) {
                field_error(&mut errors, "cropName", "Crop name cannot be empty");
            }
            if crop.quantity.as_deref().is_some_and(|v| validate_not_blank(v).is_err()) {
                field_error(&mut errors, "quantity", "Quantity cannot be empty");
            }
            if crop.price.is_some_and(|p| p < 0.0 || !p.is_finite()) {
                field_error(&mut errors, "price", "Price cannot be negative");
            }
        }
        if let Some(target) = &self.target_entity {
            if target.entity_id.as_deref().is_some_and(|v| validate_not_blank(v).is_err()) {
                field_error(&mut errors, "entityId", "Target entity cannot be empty");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl UpdateTransactionRequest {
    /// Merges the patch into `txn`. Only user-editable columns are touched.
    pub fn apply_to(self, txn: &mut Transaction) -> Result<(), ApiError> {
        if let Some(crop) = self.crop_details {
            if let Some(name) = crop.crop_name {
                txn.crop_name = name.trim().to_string();
            }
            if let Some(quantity) = crop.quantity {
                txn.quantity = quantity.trim().to_string();
            }
            if let Some(quality) = crop.quality {
                txn.quality = quality;
            }
            if let Some(price) = crop.price {
                txn.price = price;
            }
            if let Some(unit) = crop.price_unit {
                txn.price_unit = unit;
            }
        }

        if let Some(target) = self.target_entity {
            if let Some(id) = target.entity_id {
                txn.target_entity_id = id.trim().to_string();
            }
            if let Some(details) = target.entity_details {
                txn.target_entity_details = Some(to_json(&details)?);
            }
        }

        if let Some(date) = self.transaction_date {
            txn.transaction_date = date;
        }

        if let Some(patch) = self.metadata {
            let mut meta = txn.parsed_metadata();
            if patch.harvest_date.is_some() {
                meta.harvest_date = patch.harvest_date;
            }
            if patch.expiry_date.is_some() {
                meta.expiry_date = patch.expiry_date;
            }
            if patch.storage_conditions.is_some() {
                meta.storage_conditions = patch.storage_conditions;
            }
            if patch.transport_method.is_some() {
                meta.transport_method = patch.transport_method;
            }
            if let Some(certs) = patch.certifications {
                meta.certifications = certs;
            }
            if patch.batch_number.is_some() {
                meta.batch_number = patch.batch_number;
            }
            if patch.notes.is_some() {
                meta.notes = patch.notes;
            }
            txn.metadata = to_json(&meta)?;
        }

        Ok(())
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}
