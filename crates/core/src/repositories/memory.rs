//! In-process repositories used by tests that run without PostgreSQL.
//! They mirror the unique constraints and ordering of the SQL schema.

use crate::repositories::transaction_repository::{TransactionLookup, TransactionRepository};
use crate::repositories::user_repository::UserRepository;
use agritrack_primitives::error::{ApiError, DUPLICATE_USER_MESSAGE};
use agritrack_primitives::models::dtos::transaction_dto::{
    PageRequest, TransactionFilter, TransactionPage,
};
use agritrack_primitives::models::entities::enum_types::TransactionStatus;
use agritrack_primitives::models::entities::transaction::{NewTransaction, Transaction};
use agritrack_primitives::models::entities::user::{NewUser, ProfileChanges, User};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, ApiError> {
    mutex
        .lock()
        .map_err(|_| ApiError::Internal("in-memory store poisoned".into()))
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(lock(&self.users)?.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_national_id(&self, national_id: &str) -> Result<Option<User>, ApiError> {
        Ok(lock(&self.users)?
            .iter()
            .find(|u| u.national_id == national_id)
            .cloned())
    }

    fn find_conflicting(
        &self,
        username: &str,
        national_id: &str,
        wallet_id: &str,
    ) -> Result<Option<User>, ApiError> {
        Ok(lock(&self.users)?
            .iter()
            .find(|u| {
                u.username == username || u.national_id == national_id || u.wallet_id == wallet_id
            })
            .cloned())
    }

    fn create(&self, new_user: NewUser<'_>) -> Result<User, ApiError> {
        let mut users = lock(&self.users)?;
        let duplicate = users.iter().any(|u| {
            u.username == new_user.username
                || u.national_id == new_user.national_id
                || u.wallet_id == new_user.wallet_id
        });
        if duplicate {
            return Err(ApiError::Conflict(DUPLICATE_USER_MESSAGE.into()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.to_string(),
            password_hash: new_user.password_hash.to_string(),
            role: new_user.role,
            address: new_user.address.to_string(),
            national_id: new_user.national_id.to_string(),
            wallet_id: new_user.wallet_id.to_string(),
            is_verified: true,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    fn update_profile(&self, id: Uuid, changes: ProfileChanges<'_>) -> Result<User, ApiError> {
        let mut users = lock(&self.users)?;
        if let Some(name) = changes.username {
            if users.iter().any(|u| u.id != id && u.username == name) {
                return Err(ApiError::Conflict("Username is already taken".into()));
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ApiError::not_found("User"))?;
        if let Some(name) = changes.username {
            user.username = name.to_string();
        }
        if let Some(address) = changes.address {
            user.address = address.to_string();
        }
        user.updated_at = changes.updated_at.unwrap_or_else(Utc::now);
        Ok(user.clone())
    }

    fn list_all(&self) -> Result<Vec<User>, ApiError> {
        let mut users = lock(&self.users)?.clone();
        users.reverse();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

/// Rows are kept in insertion order so ties on `created_at` stay stable.
#[derive(Default)]
pub struct InMemoryTransactionRepository {
    rows: Mutex<Vec<Transaction>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a fully-formed row, bypassing service rules. Used to stage
    /// chains with arbitrary links.
    pub fn insert(&self, txn: Transaction) -> Result<(), ApiError> {
        lock(&self.rows)?.push(txn);
        Ok(())
    }
}

impl TransactionRepository for InMemoryTransactionRepository {
    fn find(&self, lookup: &TransactionLookup) -> Result<Option<Transaction>, ApiError> {
        let rows = lock(&self.rows)?;
        let found = match lookup {
            TransactionLookup::Id(id) => rows.iter().find(|t| t.id == *id),
            TransactionLookup::Code(code) => rows.iter().find(|t| &t.transaction_id == code),
        };
        Ok(found.cloned())
    }

    fn create(&self, new_txn: NewTransaction) -> Result<Transaction, ApiError> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|t| t.transaction_id == new_txn.transaction_id) {
            return Err(ApiError::Conflict("Duplicate transaction id".into()));
        }
        let txn = new_txn.into_transaction(Uuid::new_v4(), Utc::now());
        rows.push(txn.clone());
        Ok(txn)
    }

    fn list_for_owner(
        &self,
        owner: Uuid,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<TransactionPage, ApiError> {
        let needle = filter
            .crop_name
            .as_deref()
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty());

        let mut matching: Vec<Transaction> = lock(&self.rows)?
            .iter()
            .rev()
            .filter(|t| t.created_by == owner)
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .filter(|t| {
                needle
                    .as_ref()
                    .map_or(true, |n| t.crop_name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(0))
            .take(usize::try_from(page.limit).unwrap_or(0))
            .collect();

        Ok(TransactionPage {
            items,
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    fn save(&self, txn: &Transaction) -> Result<Transaction, ApiError> {
        let mut rows = lock(&self.rows)?;
        let row = rows
            .iter_mut()
            .find(|t| t.id == txn.id)
            .ok_or_else(|| ApiError::not_found("Transaction"))?;

        row.crop_name = txn.crop_name.clone();
        row.quantity = txn.quantity.clone();
        row.quality = txn.quality;
        row.price = txn.price;
        row.price_unit = txn.price_unit.clone();
        row.target_entity_id = txn.target_entity_id.clone();
        row.target_entity_details = txn.target_entity_details.clone();
        row.transaction_date = txn.transaction_date;
        row.metadata = txn.metadata.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    fn set_status(&self, id: Uuid, status: TransactionStatus) -> Result<Transaction, ApiError> {
        let mut rows = lock(&self.rows)?;
        let row = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::not_found("Transaction"))?;
        row.status = status;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut rows = lock(&self.rows)?;
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }

    fn link(&self, previous: Uuid, next: Uuid) -> Result<Transaction, ApiError> {
        let mut rows = lock(&self.rows)?;

        let prev_idx = rows
            .iter()
            .position(|t| t.id == previous)
            .ok_or_else(|| ApiError::not_found("Previous transaction"))?;
        let next_idx = rows
            .iter()
            .position(|t| t.id == next)
            .ok_or_else(|| ApiError::not_found("Transaction"))?;

        if rows[prev_idx].next_transaction.is_some() {
            return Err(ApiError::InvalidState(
                "Previous transaction already has a successor".into(),
            ));
        }
        if rows[next_idx].previous_transaction.is_some() {
            return Err(ApiError::InvalidState(
                "Transaction already has a predecessor".into(),
            ));
        }

        let now = Utc::now();
        rows[prev_idx].next_transaction = Some(next);
        rows[prev_idx].updated_at = now;
        rows[next_idx].previous_transaction = Some(previous);
        rows[next_idx].updated_at = now;
        Ok(rows[next_idx].clone())
    }
}
