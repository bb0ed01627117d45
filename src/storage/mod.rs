mod redis;

pub use self::redis::{KvActor, KvActorHandle};

use crate::error::TrackerResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// Storage key constants
pub mod keys {
    /// JSON-serialized list of schedule records
    pub const SCHEDULES: &str = "schedules";
    /// Stringified integer hourly rate
    pub const HOURLY_RATE: &str = "hourlyRate";
    /// UI theme, written by the presentation layer only
    pub const THEME: &str = "theme";
}

/// Opaque string key-value store the tracker persists through
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Get the value stored under a key, if any
    async fn get(&self, key: &str) -> TrackerResult<Option<String>>;

    /// Store a value under a key, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> TrackerResult<()>;

    /// Remove a key and its value entirely
    async fn delete(&self, key: &str) -> TrackerResult<()>;
}

/// In-memory implementation of the store (for testing)
#[derive(Debug, Default)]
pub struct InMemoryKv {
    data: tokio::sync::RwLock<HashMap<String, String>>,
}

impl InMemoryKv {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryKv {
    async fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        let data = self.data.read().await;
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> TrackerResult<()> {
        let mut data = self.data.write().await;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> TrackerResult<()> {
        let mut data = self.data.write().await;
        data.remove(key);
        Ok(())
    }
}
