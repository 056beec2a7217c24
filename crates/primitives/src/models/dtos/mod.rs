pub mod auth_dto;
pub mod transaction_dto;
pub mod transaction_patch;

pub use auth_dto::*;
pub use transaction_dto::*;
pub use transaction_patch::*;
