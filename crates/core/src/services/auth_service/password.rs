use agritrack_primitives::error::ApiError;
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};
use tracing::error;

/// Verified against when the account does not exist, so unknown ids cost
/// the same bcrypt work as wrong passwords.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| bcrypt::hash("agritrack-dummy-password", bcrypt::DEFAULT_COST).ok());

pub struct PasswordService;

impl PasswordService {
    pub async fn hash(password: SecretString, cost: u32) -> Result<String, ApiError> {
        tokio::task::spawn_blocking(move || bcrypt::hash(password.expose_secret(), cost))
            .await
            .map_err(|e| {
                error!(error = %e, "auth.password: hashing task failed");
                ApiError::Internal("Credential processing failed".into())
            })?
            .map_err(ApiError::from)
    }

    /// Returns whether `password` matches `hash`. A missing hash always fails
    /// after doing comparable work.
    pub async fn verify(password: SecretString, hash: Option<String>) -> Result<bool, ApiError> {
        tokio::task::spawn_blocking(move || -> Result<bool, ApiError> {
            let known = hash.is_some();
            let target = match hash {
                Some(h) => h,
                None => match DUMMY_HASH.as_ref() {
                    Some(h) => h.clone(),
                    None => return Ok(false),
                },
            };
            let matched = bcrypt::verify(password.expose_secret(), &target)?;
            Ok(known && matched)
        })
        .await
        .map_err(|e| {
            error!(error = %e, "auth.password: verification task failed");
            ApiError::Internal("Credential processing failed".into())
        })?
    }
}
