use eyre::{eyre, Report, WrapErr};
use std::env;

/// Per-IP request quota: `max_requests` replenished evenly across `window_secs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitInfo {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

impl RateLimitInfo {
    pub fn new() -> Result<Self, Report> {
        let defaults = Self::default();
        let info = Self {
            max_requests: match env::var("RATE_LIMIT_MAX_REQUESTS") {
                Ok(v) => v.parse().wrap_err("Invalid RATE_LIMIT_MAX_REQUESTS")?,
                Err(_) => defaults.max_requests,
            },
            window_secs: match env::var("RATE_LIMIT_WINDOW_SECS") {
                Ok(v) => v.parse().wrap_err("Invalid RATE_LIMIT_WINDOW_SECS")?,
                Err(_) => defaults.window_secs,
            },
        };

        if info.max_requests == 0 || info.window_secs == 0 {
            return Err(eyre!("Rate limit quota and window must be non-zero"));
        }
        Ok(info)
    }

    /// Interval after which one request slot is restored.
    pub fn replenish_interval_ms(&self) -> u64 {
        (self.window_secs * 1000 / u64::from(self.max_requests)).max(1)
    }
}
