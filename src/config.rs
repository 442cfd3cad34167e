use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    // Logging
    pub log_dir: String,
    pub log_file: String,
    pub log_level: Level,

    // Form-load balance snapshots
    pub balance_cache_ttl: Duration,
    pub balance_cache_capacity: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ttl_secs: u64 = parse_or(&lookup, "BALANCE_CACHE_TTL_SECS", 300)?; // 5 min

        Ok(Self {
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_file: lookup("LOG_FILE").unwrap_or_else(|| "app.log".to_string()),
            log_level: parse_or(&lookup, "LOG_LEVEL", Level::INFO)?,
            balance_cache_ttl: Duration::from_secs(ttl_secs),
            balance_cache_capacity: parse_or(&lookup, "BALANCE_CACHE_CAPACITY", 10_000)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid value, got {raw:?}")),
        None => Ok(default),
    }
}
