use crate::repositories::{
    PgTransactionRepository, PgUserRepository, TransactionRepository, UserRepository,
};
use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use std::sync::Arc;

pub use agritrack_primitives::models::app_config::AppConfig;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Arc<Self> {
        Self::with_repositories(
            Arc::new(PgUserRepository::new(db.clone())),
            Arc::new(PgTransactionRepository::new(db)),
            config,
        )
    }

    pub fn with_repositories(
        users: Arc<dyn UserRepository>,
        transactions: Arc<dyn TransactionRepository>,
        config: AppConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            users,
            transactions,
            config,
        })
    }
}
