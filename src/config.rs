use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};

/// Placeholder host. Set `LST_YIELDS_API_URL` to the real yield-history service.
pub const DEFAULT_API_URL: &str = "https://api.solanabeach.io/v2";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_vars(
            env::var("LST_YIELDS_API_URL").ok(),
            env::var("LST_YIELDS_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(api_url: Option<String>, timeout: Option<String>) -> Result<Config> {
        let api_url = api_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let timeout_secs = match timeout {
            Some(t) => t
                .trim()
                .parse()
                .map_err(|e| anyhow!("LST_YIELDS_TIMEOUT_SECS={:?}: {}", t, e))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Config {
            api_url: api_url.trim().trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
