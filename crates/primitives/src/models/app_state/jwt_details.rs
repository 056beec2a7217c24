use eyre::{eyre, Report, WrapErr};
use secrecy::SecretString;
use std::env;

const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct JWTInfo {
    pub jwt_secret: SecretString,
    pub jwt_expiration_days: i64,
    pub jwt_issuer: String,
    pub jwt_audience: String,
}

impl JWTInfo {
    pub fn new() -> Result<JWTInfo, Report> {
        let jwt_secret =
            env::var("JWT_SECRET").wrap_err("JWT_SECRET must be set in environment variables")?;

        Self::from_parts(
            jwt_secret,
            env::var("JWT_EXPIRATION_DAYS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .wrap_err("Invalid JWT_EXPIRATION_DAYS")?,
            env::var("JWT_ISSUER").unwrap_or_else(|_| "agritrack".into()),
            env::var("JWT_AUDIENCE").unwrap_or_else(|_| "agritrack_api".into()),
        )
    }

    pub fn from_parts(
        secret: String,
        expiration_days: i64,
        issuer: String,
        audience: String,
    ) -> Result<JWTInfo, Report> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(eyre!(
                "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
            ));
        }
        if expiration_days <= 0 {
            return Err(eyre!("JWT_EXPIRATION_DAYS must be positive"));
        }

        Ok(Self {
            jwt_secret: SecretString::new(secret.into()),
            jwt_expiration_days: expiration_days,
            jwt_issuer: issuer,
            jwt_audience: audience,
        })
    }
}
