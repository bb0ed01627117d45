use crate::error::TrackerResult;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;

/// Hourly rate used when nothing has been persisted yet
pub const DEFAULT_HOURLY_RATE: i64 = 4500;

/// Main configuration structure for the tracker
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL for the key-value store
    pub redis_url: String,
    /// Hourly rate applied when no rate has been persisted
    pub default_hourly_rate: i64,
}

/// Optional overrides loaded from config/tuntikirja.toml
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    redis_url: Option<String>,
    default_hourly_rate: Option<i64>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> TrackerResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| String::from("redis://127.0.0.1:6379"));

        let mut default_hourly_rate = env::var("DEFAULT_HOURLY_RATE")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(DEFAULT_HOURLY_RATE);

        // File overrides take precedence over environment values
        if let Ok(content) = fs::read_to_string("config/tuntikirja.toml") {
            let overrides: FileOverrides = toml::from_str(&content)?;
            if let Some(url) = overrides.redis_url {
                redis_url = url;
            }
            if let Some(rate) = overrides.default_hourly_rate {
                default_hourly_rate = rate;
            }
        }

        Ok(Config {
            redis_url,
            default_hourly_rate,
        })
    }
}
