use crate::error::TrackerResult;
use crate::tracker::{date, time};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's recorded shifts with derived hours and pay.
///
/// Field names serialize in camelCase so data persisted by earlier
/// versions of the tracker loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    /// Record date in DD/MM/YYYY display format, unique within the store
    pub date: String,
    #[serde(default)]
    pub start_time1: Option<String>,
    #[serde(default)]
    pub end_time1: Option<String>,
    #[serde(default)]
    pub start_time2: Option<String>,
    #[serde(default)]
    pub end_time2: Option<String>,
    pub hours_worked1: f64,
    pub hours_worked2: f64,
    pub total_hours_day: f64,
    pub salary_day: f64,
}

impl ScheduleRecord {
    /// Build a record from validated shift times, deriving hours and pay.
    ///
    /// The salary is a snapshot of the rate in effect at entry time.
    pub fn build(
        date: String,
        shift1: (String, String),
        shift2: Option<(String, String)>,
        rate: i64,
    ) -> TrackerResult<Self> {
        let hours_worked1 = time::shift_duration(&shift1.0, &shift1.1)?;
        let hours_worked2 = match &shift2 {
            Some((start, end)) => time::shift_duration(start, end)?,
            None => 0.0,
        };

        let total_hours_day = hours_worked1 + hours_worked2;
        let salary_day = total_hours_day * rate as f64;

        let (start_time2, end_time2) = match shift2 {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };

        Ok(Self {
            date,
            start_time1: Some(shift1.0),
            end_time1: Some(shift1.1),
            start_time2,
            end_time2,
            hours_worked1,
            hours_worked2,
            total_hours_day,
            salary_day,
        })
    }

    /// Calendar date of this record
    pub fn calendar_date(&self) -> TrackerResult<NaiveDate> {
        date::to_calendar(&self.date)
    }
}

/// Outcome of an upsert: whether a new record was created or an
/// existing one replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub created: bool,
}

/// View model for the currently selected week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekView {
    pub week_number: u32,
    /// Monday of the week, DD/MM/YYYY
    pub start: String,
    /// Sunday of the week, DD/MM/YYYY
    pub end: String,
    /// True when the window is the week containing today
    pub is_current_week: bool,
}

/// Aggregated totals for one week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    pub total_hours: f64,
    pub total_salary: f64,
    pub working_days: usize,
    pub daily_average: f64,
}

impl WeekSummary {
    /// Summary of a week with no recorded days
    pub fn empty() -> Self {
        Self {
            total_hours: 0.0,
            total_salary: 0.0,
            working_days: 0,
            daily_average: 0.0,
        }
    }
}

/// Downloadable export of one week's data
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub schedules: Vec<ScheduleRecord>,
    pub hourly_rate: i64,
    pub total_hours: f64,
    pub total_salary: f64,
    pub week_range: String,
    pub export_date: String,
}

/// Export document plus the file name it should be saved under
#[derive(Debug, Clone)]
pub struct WeekExport {
    pub filename: String,
    pub document: ExportDocument,
}
