use crate::error::{storage_error, TrackerResult};
use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client as RedisClient};
use tokio::sync::mpsc;
use tracing::info;

/// The key-value actor that processes storage requests
pub struct KvActor {
    client: RedisClient,
    command_rx: mpsc::Receiver<KvCommand>,
}

/// Commands that can be sent to the key-value actor
pub enum KvCommand {
    Get(String, mpsc::Sender<TrackerResult<Option<String>>>),
    Set(String, String, mpsc::Sender<TrackerResult<()>>),
    Delete(String, mpsc::Sender<TrackerResult<()>>),
    Shutdown,
}

/// Handle for communicating with the key-value actor
#[derive(Clone)]
pub struct KvActorHandle {
    command_tx: mpsc::Sender<KvCommand>,
}

impl KvActorHandle {
    /// Shutdown the actor
    pub async fn shutdown(&self) -> TrackerResult<()> {
        let _ = self.command_tx.send(KvCommand::Shutdown).await;
        Ok(())
    }

    async fn request<T>(
        &self,
        make_cmd: impl FnOnce(mpsc::Sender<TrackerResult<T>>) -> KvCommand,
    ) -> TrackerResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(make_cmd(response_tx))
            .await
            .map_err(|e| storage_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| storage_error("Response channel closed"))?
    }
}

#[async_trait]
impl super::KvStore for KvActorHandle {
    async fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        let key = key.to_string();
        self.request(|tx| KvCommand::Get(key, tx)).await
    }

    async fn set(&self, key: &str, value: &str) -> TrackerResult<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.request(|tx| KvCommand::Set(key, value, tx)).await
    }

    async fn delete(&self, key: &str) -> TrackerResult<()> {
        let key = key.to_string();
        self.request(|tx| KvCommand::Delete(key, tx)).await
    }
}

impl KvActor {
    /// Create a new actor and return its handle
    pub fn new(redis_url: &str) -> TrackerResult<(Self, KvActorHandle)> {
        let (command_tx, command_rx) = mpsc::channel(32);

        let client = RedisClient::open(redis_url)
            .map_err(|e| storage_error(&format!("Failed to create Redis client: {}", e)))?;

        let actor = Self { client, command_rx };
        let handle = KvActorHandle { command_tx };

        Ok((actor, handle))
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Key-value actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                KvCommand::Get(key, response_tx) => {
                    let result = self.get_value(&key).await;
                    let _ = response_tx.send(result).await;
                }
                KvCommand::Set(key, value, response_tx) => {
                    let result = self.set_value(&key, &value).await;
                    let _ = response_tx.send(result).await;
                }
                KvCommand::Delete(key, response_tx) => {
                    let result = self.delete_value(&key).await;
                    let _ = response_tx.send(result).await;
                }
                KvCommand::Shutdown => {
                    info!("Key-value actor shutting down");
                    break;
                }
            }
        }

        info!("Key-value actor shut down");
    }

    /// Get a redis connection
    async fn connection(&self) -> TrackerResult<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| storage_error(&format!("Failed to connect to Redis: {}", e)))
    }

    async fn get_value(&self, key: &str) -> TrackerResult<Option<String>> {
        let mut conn = self.connection().await?;

        let exists: bool = conn
            .exists(key)
            .await
            .map_err(|e| storage_error(&format!("Redis error: {}", e)))?;

        if !exists {
            return Ok(None);
        }

        let value: String = conn
            .get(key)
            .await
            .map_err(|e| storage_error(&format!("Failed to read {} from Redis: {}", key, e)))?;

        Ok(Some(value))
    }

    async fn set_value(&self, key: &str, value: &str) -> TrackerResult<()> {
        let mut conn = self.connection().await?;

        () = conn
            .set(key, value)
            .await
            .map_err(|e| storage_error(&format!("Failed to write {} to Redis: {}", key, e)))?;

        Ok(())
    }

    async fn delete_value(&self, key: &str) -> TrackerResult<()> {
        let mut conn = self.connection().await?;

        () = conn
            .del(key)
            .await
            .map_err(|e| storage_error(&format!("Failed to delete {} from Redis: {}", key, e)))?;

        Ok(())
    }
}
