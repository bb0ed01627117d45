use crate::error::TrackerResult;
use crate::storage::{keys, KvStore};
use std::sync::Arc;
use tracing::warn;

/// Current hourly pay rate, persisted as a stringified integer
pub struct RateConfig {
    value: i64,
    default: i64,
    kv: Arc<dyn KvStore>,
}

impl RateConfig {
    pub fn new(kv: Arc<dyn KvStore>, default: i64) -> Self {
        Self {
            value: default,
            default,
            kv,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Load the persisted rate, falling back to the default
    pub async fn load(&mut self) -> TrackerResult<()> {
        self.value = match self.kv.get(keys::HOURLY_RATE).await? {
            Some(raw) => raw.parse::<i64>().unwrap_or_else(|_| {
                warn!("Persisted hourly rate is not a number: {}", raw);
                self.default
            }),
            None => self.default,
        };
        Ok(())
    }

    /// Change the rate and persist it immediately
    pub async fn set(&mut self, rate: i64) -> TrackerResult<()> {
        self.kv.set(keys::HOURLY_RATE, &rate.to_string()).await?;
        self.value = rate;
        Ok(())
    }
}
