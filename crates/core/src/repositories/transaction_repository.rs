use crate::app_state::DbPool;
use agritrack_primitives::error::ApiError;
use agritrack_primitives::models::dtos::transaction_dto::{
    PageRequest, TransactionFilter, TransactionPage,
};
use agritrack_primitives::models::entities::enum_types::TransactionStatus;
use agritrack_primitives::models::entities::transaction::{
    NewTransaction, Transaction, TransactionChanges,
};
use agritrack_primitives::schema::transactions;
use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::error;
use uuid::Uuid;

/// A transaction is addressed either by its UUID or its `TXN_...` code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionLookup {
    Id(Uuid),
    Code(String),
}

impl TransactionLookup {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match Uuid::parse_str(raw) {
            Ok(id) => TransactionLookup::Id(id),
            Err(_) => TransactionLookup::Code(raw.to_string()),
        }
    }
}

/// Persistence port for transactions.
pub trait TransactionRepository: Send + Sync {
    fn find(&self, lookup: &TransactionLookup) -> Result<Option<Transaction>, ApiError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, ApiError> {
        self.find(&TransactionLookup::Id(id))
    }

    fn create(&self, new_txn: NewTransaction) -> Result<Transaction, ApiError>;

    /// Owner's transactions matching `filter`, newest first.
    fn list_for_owner(
        &self,
        owner: Uuid,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<TransactionPage, ApiError>;

    /// Writes back the user-editable columns of `txn`.
    fn save(&self, txn: &Transaction) -> Result<Transaction, ApiError>;

    fn set_status(&self, id: Uuid, status: TransactionStatus) -> Result<Transaction, ApiError>;

    /// Returns false when no row was removed.
    fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    /// Sets `previous.next = next` and `next.previous = previous` atomically.
    /// Fails with `InvalidState` when either slot is already taken.
    fn link(&self, previous: Uuid, next: Uuid) -> Result<Transaction, ApiError>;
}

pub struct PgTransactionRepository {
    pool: DbPool,
}

impl PgTransactionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, ApiError> {
        self.pool.get().map_err(|e| {
            error!(error = %e, "transactions: failed to acquire db connection");
            ApiError::from(e)
        })
    }
}

/// Escapes LIKE metacharacters so user input only ever matches literally.
pub fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn owned_filtered<'a>(
    owner: Uuid,
    filter: &TransactionFilter,
) -> transactions::BoxedQuery<'a, Pg> {
    let mut query = transactions::table
        .filter(transactions::created_by.eq(owner))
        .into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(transactions::status.eq(status));
    }
    if let Some(name) = filter.crop_name.as_deref().filter(|n| !n.trim().is_empty()) {
        query = query.filter(transactions::crop_name.ilike(like_pattern(name.trim())));
    }
    query
}

impl TransactionRepository for PgTransactionRepository {
    fn find(&self, lookup: &TransactionLookup) -> Result<Option<Transaction>, ApiError> {
        let mut conn = self.conn()?;
        let query = match lookup {
            TransactionLookup::Id(id) => transactions::table
                .filter(transactions::id.eq(*id))
                .into_boxed(),
            TransactionLookup::Code(code) => transactions::table
                .filter(transactions::transaction_id.eq(code.clone()))
                .into_boxed(),
        };

        query
            .select(Transaction::as_select())
            .first(&mut conn)
            .optional()
            .map_err(ApiError::from)
    }

    fn create(&self, new_txn: NewTransaction) -> Result<Transaction, ApiError> {
        let mut conn = self.conn()?;
        diesel::insert_into(transactions::table)
            .values(&new_txn)
            .returning(Transaction::as_returning())
            .get_result(&mut conn)
            .map_err(ApiError::from)
    }

    fn list_for_owner(
        &self,
        owner: Uuid,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<TransactionPage, ApiError> {
        let mut conn = self.conn()?;

        let total = owned_filtered(owner, filter)
            .count()
            .get_result::<i64>(&mut conn)?;

        let items = owned_filtered(owner, filter)
            .order((transactions::created_at.desc(), transactions::id.desc()))
            .limit(page.limit)
            .offset(page.offset())
            .select(Transaction::as_select())
            .load(&mut conn)?;

        Ok(TransactionPage {
            items,
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    fn save(&self, txn: &Transaction) -> Result<Transaction, ApiError> {
        let mut conn = self.conn()?;
        diesel::update(transactions::table.find(txn.id))
            .set(TransactionChanges::from(txn))
            .returning(Transaction::as_returning())
            .get_result(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::not_found("Transaction"))
    }

    fn set_status(&self, id: Uuid, status: TransactionStatus) -> Result<Transaction, ApiError> {
        let mut conn = self.conn()?;
        diesel::update(transactions::table.find(id))
            .set((
                transactions::status.eq(status),
                transactions::updated_at.eq(Utc::now()),
            ))
            .returning(Transaction::as_returning())
            .get_result(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::not_found("Transaction"))
    }

    fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut conn = self.conn()?;
        let removed = diesel::delete(transactions::table.find(id)).execute(&mut conn)?;
        Ok(removed > 0)
    }

    fn link(&self, previous: Uuid, next: Uuid) -> Result<Transaction, ApiError> {
        let mut conn = self.conn()?;
        conn.transaction::<_, ApiError, _>(|conn| {
            let now = Utc::now();

            let claimed_next = diesel::update(
                transactions::table
                    .filter(transactions::id.eq(previous))
                    .filter(transactions::next_transaction.is_null()),
            )
            .set((
                transactions::next_transaction.eq(Some(next)),
                transactions::updated_at.eq(now),
            ))
            .execute(conn)?;
            if claimed_next == 0 {
                return Err(ApiError::InvalidState(
                    "Previous transaction already has a successor".into(),
                ));
            }

            diesel::update(
                transactions::table
                    .filter(transactions::id.eq(next))
                    .filter(transactions::previous_transaction.is_null()),
            )
            .set((
                transactions::previous_transaction.eq(Some(previous)),
                transactions::updated_at.eq(now),
            ))
            .returning(Transaction::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or_else(|| {
                ApiError::InvalidState("Transaction already has a predecessor".into())
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_distinguishes_uuid_from_code() {
        let id = Uuid::new_v4();
        assert_eq!(
            TransactionLookup::parse(&id.to_string()),
            TransactionLookup::Id(id)
        );
        assert_eq!(
            TransactionLookup::parse(" TXN_FARMER_abc_12345 "),
            TransactionLookup::Code("TXN_FARMER_abc_12345".into())
        );
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("rice"), "%rice%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
