use crate::models::entities::enum_types::UserRole;
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use uuid::Uuid;

/// Stored account. Not serializable: responses go through `UserResponse`
/// so the password hash cannot leak.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub address: String,
    pub national_id: String,
    pub wallet_id: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: UserRole,
    pub address: &'a str,
    pub national_id: &'a str,
    pub wallet_id: &'a str,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct ProfileChanges<'a> {
    pub username: Option<&'a str>,
    pub address: Option<&'a str>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileChanges<'_> {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.address.is_none()
    }
}
