pub mod confirm_transaction;
pub mod create_transaction;
pub mod current_user;
pub mod delete_transaction;
pub mod get_transaction;
pub mod health;
pub mod link_transaction;
pub mod list_transactions;
pub mod list_users;
pub mod login;
pub mod register;
pub mod supply_chain;
pub mod update_profile;
pub mod update_transaction;
