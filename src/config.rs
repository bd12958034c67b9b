//! Settings the web demos read from the environment.

use std::env;
use std::time::Duration;

use tracing::warn;

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const TOKEN_TTL_ENV: &str = "TOUR_TOKEN_TTL_SECS";

const DEFAULT_SECRET: &str = "tour-demo-secret";
const DEFAULT_TTL_SECS: u64 = 3600;
/// Longest accepted token lifetime: one year.
pub const MAX_TTL_SECS: u64 = 365 * 24 * 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_SECRET.to_string(),
            token_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Missing, empty or invalid
    /// values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secret) = lookup(JWT_SECRET_ENV).filter(|s| !s.trim().is_empty()) {
            config.jwt_secret = secret;
        }

        if let Some(raw) = lookup(TOKEN_TTL_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if (1..=MAX_TTL_SECS).contains(&secs) => {
                    config.token_ttl = Duration::from_secs(secs)
                }
                Ok(secs) if secs > MAX_TTL_SECS => warn!(
                    value = secs,
                    "{TOKEN_TTL_ENV} above {MAX_TTL_SECS}s, using {DEFAULT_TTL_SECS}s"
                ),
                _ => warn!(value = %raw, "invalid {TOKEN_TTL_ENV}, using {DEFAULT_TTL_SECS}s"),
            }
        }

        config
    }
}
