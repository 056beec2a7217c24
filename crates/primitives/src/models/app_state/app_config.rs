use crate::models::app_state::jwt_details::JWTInfo;
use crate::models::app_state::rate_limit_details::RateLimitInfo;
use eyre::{eyre, Report, WrapErr};
use std::env;

pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_details: JWTInfo,

    pub app_env: String,

    pub bcrypt_cost: u32,

    pub cors_origins: Vec<String>,

    pub rate_limit: RateLimitInfo,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        let bcrypt_cost: u32 = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse()
            .wrap_err("Invalid BCRYPT_COST")?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(eyre!("BCRYPT_COST must be between 4 and 31"));
        }

        Ok(Self {
            jwt_details: JWTInfo::new()?,

            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),

            bcrypt_cost,

            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
            ),

            rate_limit: RateLimitInfo::new()?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn is_test(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("test")
    }

    /// The limiter keys on peer address, which in-process test servers do not provide.
    pub fn rate_limit_enabled(&self) -> bool {
        !self.is_test()
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
