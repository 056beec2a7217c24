pub mod enum_types;
pub mod transaction;
pub mod transaction_details;
pub mod user;

pub use enum_types::*;
pub use transaction::*;
pub use transaction_details::*;
pub use user::*;
