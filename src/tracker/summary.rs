use crate::tracker::models::{ScheduleRecord, WeekSummary};
use crate::tracker::week::WeekWindow;

/// Records whose date falls inside the week window, store order preserved.
///
/// Comparison happens at day granularity; records with unparseable dates
/// are skipped rather than matched.
pub fn week_records(records: &[ScheduleRecord], window: &WeekWindow) -> Vec<ScheduleRecord> {
    records
        .iter()
        .filter(|record| {
            record
                .calendar_date()
                .map(|date| window.contains(date))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Weekly totals over a filtered set of records.
///
/// The total salary is recomputed from the current rate rather than
/// summed from the per-day snapshots, so a rate change is reflected in
/// the aggregate immediately.
pub fn summarize(records: &[ScheduleRecord], rate: i64) -> WeekSummary {
    let total_hours: f64 = records.iter().map(|r| r.total_hours_day).sum();
    let working_days = records.len();
    let daily_average = if working_days > 0 {
        total_hours / working_days as f64
    } else {
        0.0
    };

    WeekSummary {
        total_hours,
        total_salary: total_hours * rate as f64,
        working_days,
        daily_average,
    }
}
