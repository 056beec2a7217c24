pub mod auth_service;
pub mod supply_chain;
pub mod transaction_service;

pub use auth_service::{AuthSession, LoginService, RegisterService, UserService};
pub use supply_chain::SupplyChainService;
pub use transaction_service::TransactionService;
