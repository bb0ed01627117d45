use super::actor::{TrackerActor, TrackerActorHandle};
use super::input::UpsertRequest;
use super::models::{ScheduleRecord, UpsertOutcome, WeekExport, WeekSummary, WeekView};
use crate::error::TrackerResult;
use crate::storage::KvStore;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the tracker service
#[derive(Clone)]
pub struct TrackerHandle {
    actor_handle: TrackerActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl TrackerHandle {
    /// Create a new TrackerHandle and spawn the actor.
    ///
    /// The actor loads persisted records, runs the legacy-date
    /// migration and loads the hourly rate before serving intents.
    pub fn new(kv: Arc<dyn KvStore>, default_rate: i64) -> Self {
        let (mut actor, handle) = TrackerActor::new(kv, default_rate);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Record or replace one day's shifts
    pub async fn upsert(&self, request: UpsertRequest) -> TrackerResult<UpsertOutcome> {
        self.actor_handle.upsert(request).await
    }

    /// Remove the record for a date
    pub async fn remove(&self, record_date: impl Into<String>) -> TrackerResult<()> {
        self.actor_handle.remove(record_date).await
    }

    /// Delete every record and the persisted state behind them
    pub async fn clear_all(&self) -> TrackerResult<()> {
        self.actor_handle.clear_all().await
    }

    /// Change the hourly rate, persisting immediately
    pub async fn set_rate(&self, rate: i64) -> TrackerResult<()> {
        self.actor_handle.set_rate(rate).await
    }

    /// Current hourly rate
    pub async fn rate(&self) -> TrackerResult<i64> {
        self.actor_handle.rate().await
    }

    /// View of the currently selected week
    pub async fn current_week(&self) -> TrackerResult<WeekView> {
        self.actor_handle.current_week().await
    }

    /// Move the selected week backwards or forwards
    pub async fn navigate(&self, delta_weeks: i32) -> TrackerResult<WeekView> {
        self.actor_handle.navigate(delta_weeks).await
    }

    /// Records falling within the selected week
    pub async fn week_records(&self) -> TrackerResult<Vec<ScheduleRecord>> {
        self.actor_handle.week_records().await
    }

    /// Aggregated totals for the selected week
    pub async fn summary(&self) -> TrackerResult<WeekSummary> {
        self.actor_handle.summary().await
    }

    /// Export document for the selected week
    pub async fn export(&self) -> TrackerResult<WeekExport> {
        self.actor_handle.export().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> TrackerResult<()> {
        self.actor_handle.shutdown().await
    }
}
