use crate::app_state::DbPool;
use agritrack_primitives::error::{ApiError, DUPLICATE_USER_MESSAGE};
use agritrack_primitives::models::entities::user::{NewUser, ProfileChanges, User};
use agritrack_primitives::schema::users;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::prelude::*;
use tracing::error;
use uuid::Uuid;

/// Persistence port for accounts.
pub trait UserRepository: Send + Sync {
    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;

    fn find_by_national_id(&self, national_id: &str) -> Result<Option<User>, ApiError>;

    /// Any user sharing the username, national id or wallet id.
    fn find_conflicting(
        &self,
        username: &str,
        national_id: &str,
        wallet_id: &str,
    ) -> Result<Option<User>, ApiError>;

    fn create(&self, new_user: NewUser<'_>) -> Result<User, ApiError>;

    fn update_profile(&self, id: Uuid, changes: ProfileChanges<'_>) -> Result<User, ApiError>;

    /// All users, newest first.
    fn list_all(&self) -> Result<Vec<User>, ApiError>;
}

pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, ApiError> {
        self.pool.get().map_err(|e| {
            error!(error = %e, "users: failed to acquire db connection");
            ApiError::from(e)
        })
    }
}

fn is_unique_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

impl UserRepository for PgUserRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let mut conn = self.conn()?;
        users::table
            .find(id)
            .select(User::as_select())
            .first(&mut conn)
            .optional()
            .map_err(ApiError::from)
    }

    fn find_by_national_id(&self, national_id: &str) -> Result<Option<User>, ApiError> {
        let mut conn = self.conn()?;
        users::table
            .filter(users::national_id.eq(national_id))
            .select(User::as_select())
            .first(&mut conn)
            .optional()
            .map_err(ApiError::from)
    }

    fn find_conflicting(
        &self,
        username: &str,
        national_id: &str,
        wallet_id: &str,
    ) -> Result<Option<User>, ApiError> {
        let mut conn = self.conn()?;
        users::table
            .filter(
                users::username
                    .eq(username)
                    .or(users::national_id.eq(national_id))
                    .or(users::wallet_id.eq(wallet_id)),
            )
            .select(User::as_select())
            .first(&mut conn)
            .optional()
            .map_err(ApiError::from)
    }

    fn create(&self, new_user: NewUser<'_>) -> Result<User, ApiError> {
        let mut conn = self.conn()?;
        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict(DUPLICATE_USER_MESSAGE.into())
                } else {
                    ApiError::from(e)
                }
            })
    }

    fn update_profile(&self, id: Uuid, changes: ProfileChanges<'_>) -> Result<User, ApiError> {
        let mut conn = self.conn()?;
        diesel::update(users::table.find(id))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .optional()
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("Username is already taken".into())
                } else {
                    ApiError::from(e)
                }
            })?
            .ok_or_else(|| ApiError::not_found("User"))
    }

    fn list_all(&self) -> Result<Vec<User>, ApiError> {
        let mut conn = self.conn()?;
        users::table
            .order(users::created_at.desc())
            .select(User::as_select())
            .load(&mut conn)
            .map_err(ApiError::from)
    }
}
