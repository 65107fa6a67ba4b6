use std::time::Duration;

use crate::constants::{KICK_BASE_URL, RUN_INTERVAL};

/// Process configuration, read from the environment once at startup. Every
/// variable has a default so a bare `kick-fan` invocation works against a
/// local redis and the real kick.com endpoint.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub kick_api_base: String,
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let redis_url =
            dotenvy::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let kick_api_base =
            dotenvy::var("KICK_API_BASE").unwrap_or_else(|_| KICK_BASE_URL.to_string());
        let poll_interval = dotenvy::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(RUN_INTERVAL);

        Self {
            redis_url,
            kick_api_base,
            poll_interval,
        }
    }
}
