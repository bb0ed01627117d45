use crate::error::{component_error, TrackerResult};
use crate::storage::KvStore;
use crate::tracker::input::{self, UpsertRequest};
use crate::tracker::models::{
    ExportDocument, ScheduleRecord, UpsertOutcome, WeekExport, WeekSummary, WeekView,
};
use crate::tracker::rate::RateConfig;
use crate::tracker::store::ScheduleStore;
use crate::tracker::week::WeekWindow;
use crate::tracker::{date, summary};
use chrono::{Local, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// The tracker actor that processes user intents
pub struct TrackerActor {
    store: ScheduleStore,
    rate: RateConfig,
    week: WeekWindow,
    command_rx: mpsc::Receiver<TrackerCommand>,
}

/// Intents that can be dispatched to the tracker actor
pub enum TrackerCommand {
    Upsert(UpsertRequest, mpsc::Sender<TrackerResult<UpsertOutcome>>),
    Remove(String, mpsc::Sender<TrackerResult<()>>),
    ClearAll(mpsc::Sender<TrackerResult<()>>),
    SetRate(i64, mpsc::Sender<TrackerResult<()>>),
    GetRate(mpsc::Sender<TrackerResult<i64>>),
    CurrentWeek(mpsc::Sender<TrackerResult<WeekView>>),
    Navigate(i32, mpsc::Sender<TrackerResult<WeekView>>),
    WeekRecords(mpsc::Sender<TrackerResult<Vec<ScheduleRecord>>>),
    Summary(mpsc::Sender<TrackerResult<WeekSummary>>),
    Export(mpsc::Sender<TrackerResult<WeekExport>>),
    Shutdown,
}

/// Handle for communicating with the tracker actor
#[derive(Clone)]
pub struct TrackerActorHandle {
    command_tx: mpsc::Sender<TrackerCommand>,
}

impl TrackerActorHandle {
    async fn request<T>(
        &self,
        make_cmd: impl FnOnce(mpsc::Sender<TrackerResult<T>>) -> TrackerCommand,
    ) -> TrackerResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(make_cmd(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    /// Record or replace one day's shifts
    pub async fn upsert(&self, request: UpsertRequest) -> TrackerResult<UpsertOutcome> {
        self.request(|tx| TrackerCommand::Upsert(request, tx)).await
    }

    /// Remove the record for a date
    pub async fn remove(&self, record_date: impl Into<String>) -> TrackerResult<()> {
        let record_date = record_date.into();
        self.request(|tx| TrackerCommand::Remove(record_date, tx))
            .await
    }

    /// Delete every record and the persisted state behind them
    pub async fn clear_all(&self) -> TrackerResult<()> {
        self.request(TrackerCommand::ClearAll).await
    }

    /// Change the hourly rate, persisting immediately
    pub async fn set_rate(&self, rate: i64) -> TrackerResult<()> {
        self.request(|tx| TrackerCommand::SetRate(rate, tx)).await
    }

    /// Current hourly rate
    pub async fn rate(&self) -> TrackerResult<i64> {
        self.request(TrackerCommand::GetRate).await
    }

    /// View of the currently selected week
    pub async fn current_week(&self) -> TrackerResult<WeekView> {
        self.request(TrackerCommand::CurrentWeek).await
    }

    /// Move the selected week backwards or forwards
    pub async fn navigate(&self, delta_weeks: i32) -> TrackerResult<WeekView> {
        self.request(|tx| TrackerCommand::Navigate(delta_weeks, tx))
            .await
    }

    /// Records falling within the selected week
    pub async fn week_records(&self) -> TrackerResult<Vec<ScheduleRecord>> {
        self.request(TrackerCommand::WeekRecords).await
    }

    /// Aggregated totals for the selected week
    pub async fn summary(&self) -> TrackerResult<WeekSummary> {
        self.request(TrackerCommand::Summary).await
    }

    /// Export document for the selected week
    pub async fn export(&self) -> TrackerResult<WeekExport> {
        self.request(TrackerCommand::Export).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> TrackerResult<()> {
        let _ = self.command_tx.send(TrackerCommand::Shutdown).await;
        Ok(())
    }
}

impl TrackerActor {
    /// Create a new actor and return its handle
    pub fn new(kv: Arc<dyn KvStore>, default_rate: i64) -> (Self, TrackerActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            store: ScheduleStore::new(kv.clone()),
            rate: RateConfig::new(kv, default_rate),
            week: WeekWindow::containing(Local::now().date_naive()),
            command_rx,
        };

        let handle = TrackerActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Tracker actor started");

        if let Err(e) = self.init().await {
            error!("Failed to load persisted tracker state: {:?}", e);
        }

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                TrackerCommand::Upsert(request, response_tx) => {
                    let result = self.upsert(request).await;
                    let _ = response_tx.send(result).await;
                }
                TrackerCommand::Remove(record_date, response_tx) => {
                    let result = self.store.remove(&record_date).await;
                    let _ = response_tx.send(result).await;
                }
                TrackerCommand::ClearAll(response_tx) => {
                    let result = self.store.clear_all().await;
                    let _ = response_tx.send(result).await;
                }
                TrackerCommand::SetRate(rate, response_tx) => {
                    let result = self.rate.set(rate).await;
                    let _ = response_tx.send(result).await;
                }
                TrackerCommand::GetRate(response_tx) => {
                    let _ = response_tx.send(Ok(self.rate.value())).await;
                }
                TrackerCommand::CurrentWeek(response_tx) => {
                    let _ = response_tx.send(Ok(self.week_view())).await;
                }
                TrackerCommand::Navigate(delta_weeks, response_tx) => {
                    let result = self.navigate(delta_weeks);
                    let _ = response_tx.send(Ok(result)).await;
                }
                TrackerCommand::WeekRecords(response_tx) => {
                    let records = summary::week_records(self.store.records(), &self.week);
                    let _ = response_tx.send(Ok(records)).await;
                }
                TrackerCommand::Summary(response_tx) => {
                    let _ = response_tx.send(Ok(self.summarize())).await;
                }
                TrackerCommand::Export(response_tx) => {
                    let _ = response_tx.send(Ok(self.export())).await;
                }
                TrackerCommand::Shutdown => {
                    info!("Tracker actor shutting down");
                    break;
                }
            }
        }

        info!("Tracker actor shut down");
    }

    /// Load persisted state before serving any intents
    async fn init(&mut self) -> TrackerResult<()> {
        self.store.load().await?;
        self.rate.load().await?;
        Ok(())
    }

    async fn upsert(&mut self, request: UpsertRequest) -> TrackerResult<UpsertOutcome> {
        let entry = input::validate(&request)?;
        let record =
            ScheduleRecord::build(entry.date, entry.shift1, entry.shift2, self.rate.value())?;
        self.store.upsert(record).await
    }

    /// Move the selected week; navigation into future weeks is refused
    /// and leaves the window unchanged
    fn navigate(&mut self, delta_weeks: i32) -> WeekView {
        let candidate = self.week.shifted(delta_weeks);
        if candidate.start <= self.today_window().start {
            self.week = candidate;
        }
        self.week_view()
    }

    fn today_window(&self) -> WeekWindow {
        WeekWindow::containing(Local::now().date_naive())
    }

    fn week_view(&self) -> WeekView {
        WeekView {
            week_number: self.week.number,
            start: date::to_display(self.week.start),
            end: date::to_display(self.week.end),
            is_current_week: self.week.start == self.today_window().start,
        }
    }

    fn summarize(&self) -> WeekSummary {
        let records = summary::week_records(self.store.records(), &self.week);
        summary::summarize(&records, self.rate.value())
    }

    fn export(&self) -> WeekExport {
        let records = summary::week_records(self.store.records(), &self.week);
        let totals = summary::summarize(&records, self.rate.value());
        let view = self.week_view();

        WeekExport {
            filename: format!("work-week-{}.json", view.week_number),
            document: ExportDocument {
                schedules: records,
                hourly_rate: self.rate.value(),
                total_hours: totals.total_hours,
                total_salary: totals.total_salary,
                week_range: format!("Week of {} to {}", view.start, view.end),
                export_date: Utc::now().to_rfc3339(),
            },
        }
    }
}
