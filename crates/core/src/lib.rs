pub mod app_state;
pub mod migrations;
pub mod repositories;
pub mod security;
pub mod services;

pub use app_state::{AppState, DbPool};
pub use security::{Claims, CurrentUser, SecurityConfig};
