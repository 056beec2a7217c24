use crate::error::ApiError;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserRole {
    Farmer,
    Distributor,
    Retailer,
}

impl UserRole {
    pub fn parse(input: &str) -> Result<Self, ApiError> {
        UserRole::from_str(input.trim())
            .map_err(|_| ApiError::BadRequest(format!("Unsupported role: {}", input)))
    }

    /// Supply-chain stage recorded on transactions created by this role.
    pub const fn stage(self) -> SupplyChainStage {
        match self {
            UserRole::Farmer => SupplyChainStage::Production,
            UserRole::Distributor => SupplyChainStage::Distribution,
            UserRole::Retailer => SupplyChainStage::Retail,
        }
    }

    /// Kind of entity this role hands goods to.
    pub const fn target_entity_type(self) -> EntityType {
        match self {
            UserRole::Farmer => EntityType::Distributor,
            UserRole::Distributor => EntityType::Retailer,
            UserRole::Retailer => EntityType::Consumer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, ToSchema)]
#[ExistingTypePath = "crate::schema::sql_types::CropQuality"]
pub enum CropQuality {
    Premium,
    #[serde(rename = "Grade A")]
    #[strum(serialize = "Grade A")]
    GradeA,
    #[serde(rename = "Grade B")]
    #[strum(serialize = "Grade B")]
    GradeB,
    Standard,
    Organic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, ToSchema)]
#[ExistingTypePath = "crate::schema::sql_types::EntityType"]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityType {
    Distributor,
    Retailer,
    Consumer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, ToSchema)]
#[ExistingTypePath = "crate::schema::sql_types::SupplyChainStage"]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SupplyChainStage {
    Production,
    Distribution,
    Retail,
    Consumed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::TransactionStatus"]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    pub fn parse(input: &str) -> Result<Self, ApiError> {
        TransactionStatus::from_str(input.trim())
            .map_err(|_| ApiError::BadRequest(format!("Unsupported status: {}", input)))
    }

    /// Only pending transactions may be edited or deleted.
    pub const fn is_pending(self) -> bool {
        matches!(self, TransactionStatus::Pending)
    }
}
