pub mod login;
pub mod password;
pub mod register;
pub mod user;

use agritrack_primitives::models::entities::user::User;

pub use login::LoginService;
pub use register::RegisterService;
pub use user::UserService;

/// Issued token together with the account it was issued for.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}
