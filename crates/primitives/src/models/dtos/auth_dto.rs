use crate::models::entities::enum_types::UserRole;
use crate::models::entities::user::User;
use crate::utility::{validate_national_id, validate_not_blank, validate_role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ramesh_farms")]
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    pub username: String,

    /// One of `farmer`, `distributor`, `retailer` (case-insensitive).
    #[schema(example = "farmer")]
    #[serde(rename = "type", alias = "role")]
    #[validate(custom(function = "validate_role"))]
    pub role: String,

    #[schema(example = "Village Road 4, Nashik, Maharashtra")]
    #[validate(custom(function = "validate_not_blank", message = "Address is required"))]
    pub address: String,

    #[schema(example = "123456789012")]
    #[serde(rename = "aadhar", alias = "nationalId")]
    #[validate(custom(function = "validate_national_id"))]
    pub national_id: String,

    #[schema(example = "secret123", format = "password")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[schema(example = "wallet_farmer_1700000000000")]
    pub wallet_id: Option<String>,
}

impl RegisterRequest {
    pub fn normalize(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.role = self.role.trim().to_lowercase();
        self.address = self.address.trim().to_string();
        self.national_id = self.national_id.trim().to_string();
        self.wallet_id = self
            .wallet_id
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty());
        self
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "123456789012")]
    #[serde(rename = "aadhar", alias = "nationalId")]
    #[validate(length(min = 1, message = "Aadhar number is required"))]
    pub national_id: String,

    #[schema(example = "secret123", format = "password")]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn normalize(mut self) -> Self {
        self.national_id = self.national_id.trim().to_string();
        self
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub address: String,
    #[serde(rename = "aadhar")]
    pub national_id: String,
    pub wallet_id: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            address: user.address.clone(),
            national_id: user.national_id.clone(),
            wallet_id: user.wallet_id.clone(),
            is_verified: user.is_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    #[schema(example = "Login successful")]
    pub message: String,
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserResponse {
    pub success: bool,
    pub user: UserResponse,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[schema(example = "ramesh_organic")]
    pub username: Option<String>,
    pub address: Option<String>,
}

impl UpdateProfileRequest {
    /// Trims both fields and drops empty ones, which are treated as absent.
    pub fn normalize(self) -> Self {
        fn clean(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            username: clean(self.username),
            address: clean(self.address),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    #[schema(example = "Profile updated successfully")]
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub success: bool,
    #[schema(example = "AgriTrack API is running")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "development")]
    pub environment: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
