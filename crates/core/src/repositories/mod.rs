pub mod transaction_repository;
pub mod user_repository;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

pub use transaction_repository::{PgTransactionRepository, TransactionLookup, TransactionRepository};
pub use user_repository::{PgUserRepository, UserRepository};
