use crate::error::{Error, TrackerResult};
use crate::storage::{keys, KvStore};
use crate::tracker::date;
use crate::tracker::models::{ScheduleRecord, UpsertOutcome};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

/// Ordered collection of daily schedule records, persisted as one JSON
/// document through the key-value store
pub struct ScheduleStore {
    records: Vec<ScheduleRecord>,
    kv: Arc<dyn KvStore>,
}

impl ScheduleStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            records: Vec::new(),
            kv,
        }
    }

    /// All records, sorted ascending by calendar date
    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    /// Load the persisted collection, then run the legacy-date migration
    pub async fn load(&mut self) -> TrackerResult<()> {
        self.records = match self.kv.get(keys::SCHEDULES).await? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        self.sort();

        let migrated = self.migrate().await?;
        if migrated > 0 {
            info!("Migrated {} legacy schedule dates", migrated);
        }

        Ok(())
    }

    /// Insert a record, replacing any existing record with the same date
    pub async fn upsert(&mut self, record: ScheduleRecord) -> TrackerResult<UpsertOutcome> {
        let created = match self.records.iter().position(|r| r.date == record.date) {
            Some(index) => {
                self.records[index] = record;
                false
            }
            None => {
                self.records.push(record);
                true
            }
        };

        self.sort();
        self.persist().await?;

        Ok(UpsertOutcome { created })
    }

    /// Remove the record for a date
    pub async fn remove(&mut self, record_date: &str) -> TrackerResult<()> {
        let index = self
            .records
            .iter()
            .position(|r| r.date == record_date)
            .ok_or_else(|| Error::NotFound(format!("No record for {}", record_date)))?;

        self.records.remove(index);
        self.persist().await?;

        Ok(())
    }

    /// Empty the collection and drop the persisted key entirely
    pub async fn clear_all(&mut self) -> TrackerResult<()> {
        self.records.clear();
        self.kv.delete(keys::SCHEDULES).await
    }

    /// Rewrite legacy YYYY-MM-DD dates in place.
    ///
    /// Persists once, and only when something changed; running it again
    /// is a no-op.
    pub async fn migrate(&mut self) -> TrackerResult<usize> {
        let mut migrated = 0;
        for record in &mut self.records {
            if date::is_legacy_format(&record.date) {
                record.date = date::migrate_legacy(&record.date);
                migrated += 1;
            }
        }

        if migrated > 0 {
            self.sort();
            self.persist().await?;
        }

        Ok(migrated)
    }

    fn sort(&mut self) {
        self.records.sort_by_key(|record| {
            record.calendar_date().unwrap_or_else(|_| {
                warn!("Record has unparseable date: {}", record.date);
                NaiveDate::MIN
            })
        });
    }

    async fn persist(&self) -> TrackerResult<()> {
        let json = serde_json::to_string(&self.records)?;
        self.kv.set(keys::SCHEDULES, &json).await
    }
}
