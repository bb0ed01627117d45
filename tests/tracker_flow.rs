use chrono::{Datelike, Local};
use std::sync::Arc;
use tuntikirja::error::Error;
use tuntikirja::storage::{keys, InMemoryKv, KvStore};
use tuntikirja::tracker::input::{RawShiftFields, UpsertRequest};
use tuntikirja::tracker::TrackerHandle;

fn today_display() -> String {
    Local::now().date_naive().format("%d/%m/%Y").to_string()
}

fn request(date: &str, shift1: (&str, &str), shift2: Option<(&str, &str)>) -> UpsertRequest {
    UpsertRequest {
        date: date.to_string(),
        shift1: RawShiftFields::from_times(shift1.0, shift1.1),
        shift2: match shift2 {
            Some((start, end)) => RawShiftFields::from_times(start, end),
            None => RawShiftFields::default(),
        },
    }
}

async fn tracker_with_kv() -> (TrackerHandle, Arc<InMemoryKv>) {
    let kv = Arc::new(InMemoryKv::new());
    let tracker = TrackerHandle::new(kv.clone(), 4500);
    (tracker, kv)
}

/// One eight-hour day at the default rate produces the expected weekly
/// totals
#[tokio::test]
async fn test_end_to_end_week_summary() {
    let (tracker, _kv) = tracker_with_kv().await;

    let outcome = tracker
        .upsert(request(&today_display(), ("09:00", "17:00"), None))
        .await
        .unwrap();
    assert!(outcome.created);

    let records = tracker.week_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].total_hours_day, 8.0);
    assert_eq!(records[0].salary_day, 36000.0);

    let summary = tracker.summary().await.unwrap();
    assert_eq!(summary.total_hours, 8.0);
    assert_eq!(summary.total_salary, 36000.0);
    assert_eq!(summary.working_days, 1);
    assert_eq!(summary.daily_average, 8.0);
}

/// Upserting the same date twice replaces the record instead of adding
/// a duplicate
#[tokio::test]
async fn test_upsert_replaces_existing_date() {
    let (tracker, _kv) = tracker_with_kv().await;
    let date = today_display();

    let first = tracker
        .upsert(request(&date, ("09:00", "17:00"), None))
        .await
        .unwrap();
    assert!(first.created);

    let second = tracker
        .upsert(request(&date, ("10:00", "14:00"), None))
        .await
        .unwrap();
    assert!(!second.created);

    let records = tracker.week_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].total_hours_day, 4.0);
}

/// Alternative spellings of the same date resolve to one record
#[tokio::test]
async fn test_unpadded_date_spelling_replaces_same_day() {
    let (tracker, _kv) = tracker_with_kv().await;
    let today = Local::now().date_naive();
    let padded = today.format("%d/%m/%Y").to_string();
    let unpadded = format!("{}/{}/{}", today.day(), today.month(), today.year());

    let first = tracker
        .upsert(request(&padded, ("09:00", "17:00"), None))
        .await
        .unwrap();
    assert!(first.created);

    let second = tracker
        .upsert(request(&unpadded, ("10:00", "14:00"), None))
        .await
        .unwrap();
    assert!(!second.created);

    let records = tracker.week_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date, padded);
    assert_eq!(records[0].total_hours_day, 4.0);
}

/// The weekly salary follows the current rate while the per-day
/// snapshot keeps the rate from entry time
#[tokio::test]
async fn test_rate_change_recomputes_weekly_salary() {
    let (tracker, _kv) = tracker_with_kv().await;

    tracker
        .upsert(request(&today_display(), ("09:00", "17:00"), None))
        .await
        .unwrap();

    tracker.set_rate(5000).await.unwrap();

    let summary = tracker.summary().await.unwrap();
    assert_eq!(summary.total_salary, 40000.0);

    let records = tracker.week_records().await.unwrap();
    assert_eq!(records[0].salary_day, 36000.0);
}

/// A validation failure leaves nothing persisted
#[tokio::test]
async fn test_invalid_input_blocks_persistence() {
    let (tracker, kv) = tracker_with_kv().await;

    // Partial second shift
    let mut req = request(&today_display(), ("09:00", "17:00"), Some(("18:00", "22:00")));
    req.shift2.end_minute.clear();

    let result = tracker.upsert(req).await;
    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(kv.get(keys::SCHEDULES).await.unwrap().is_none());
}

/// An overnight shift is accepted and counts the wrapped hours
#[tokio::test]
async fn test_overnight_shift_counts_wrapped_hours() {
    let (tracker, _kv) = tracker_with_kv().await;

    tracker
        .upsert(request(&today_display(), ("23:00", "01:00"), None))
        .await
        .unwrap();

    let summary = tracker.summary().await.unwrap();
    assert_eq!(summary.total_hours, 2.0);
}

/// Legacy YYYY-MM-DD dates are rewritten once at startup and stay put
#[tokio::test]
async fn test_legacy_dates_migrate_once_on_startup() {
    let kv = Arc::new(InMemoryKv::new());

    let legacy = serde_json::json!([{
        "date": "2024-03-05",
        "startTime1": "09:00",
        "endTime1": "17:00",
        "startTime2": null,
        "endTime2": null,
        "hoursWorked1": 8.0,
        "hoursWorked2": 0.0,
        "totalHoursDay": 8.0,
        "salaryDay": 36000.0
    }]);
    kv.set(keys::SCHEDULES, &legacy.to_string()).await.unwrap();

    let tracker = TrackerHandle::new(kv.clone(), 4500);
    // Any round-trip guarantees startup loading has finished
    tracker.rate().await.unwrap();

    let stored = kv.get(keys::SCHEDULES).await.unwrap().unwrap();
    assert!(stored.contains("05/03/2024"));
    assert!(!stored.contains("2024-03-05"));
    tracker.shutdown().await.unwrap();

    // A second startup finds nothing to migrate and leaves the stored
    // value byte-for-byte unchanged
    let tracker = TrackerHandle::new(kv.clone(), 4500);
    tracker.rate().await.unwrap();
    assert_eq!(kv.get(keys::SCHEDULES).await.unwrap().unwrap(), stored);
}

/// clear_all removes the persisted key instead of writing an empty list
#[tokio::test]
async fn test_clear_all_leaves_no_persisted_state() {
    let (tracker, kv) = tracker_with_kv().await;

    tracker
        .upsert(request(&today_display(), ("09:00", "17:00"), None))
        .await
        .unwrap();
    assert!(kv.get(keys::SCHEDULES).await.unwrap().is_some());

    tracker.clear_all().await.unwrap();
    assert!(kv.get(keys::SCHEDULES).await.unwrap().is_none());
    assert!(tracker.week_records().await.unwrap().is_empty());
}

/// Removing records uses the stable date key
#[tokio::test]
async fn test_remove_by_date_key() {
    let (tracker, _kv) = tracker_with_kv().await;
    let date = today_display();

    tracker
        .upsert(request(&date, ("09:00", "17:00"), None))
        .await
        .unwrap();

    tracker.remove(date.clone()).await.unwrap();
    assert!(tracker.week_records().await.unwrap().is_empty());

    let result = tracker.remove(date).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

/// Navigation walks whole weeks and refuses to move past the current
/// one
#[tokio::test]
async fn test_week_navigation() {
    let (tracker, _kv) = tracker_with_kv().await;

    let current = tracker.current_week().await.unwrap();
    assert!(current.is_current_week);

    let previous = tracker.navigate(-1).await.unwrap();
    assert!(!previous.is_current_week);
    assert_ne!(previous.start, current.start);

    let back = tracker.navigate(1).await.unwrap();
    assert_eq!(back, current);

    // Moving forward from the current week is refused
    let refused = tracker.navigate(1).await.unwrap();
    assert_eq!(refused, current);
}

/// The export document carries the filtered week and live totals
#[tokio::test]
async fn test_export_document() {
    let (tracker, _kv) = tracker_with_kv().await;

    tracker
        .upsert(request(&today_display(), ("09:00", "17:00"), None))
        .await
        .unwrap();

    let view = tracker.current_week().await.unwrap();
    let export = tracker.export().await.unwrap();

    assert_eq!(
        export.filename,
        format!("work-week-{}.json", view.week_number)
    );
    assert_eq!(export.document.schedules.len(), 1);
    assert_eq!(export.document.hourly_rate, 4500);
    assert_eq!(export.document.total_hours, 8.0);
    assert_eq!(export.document.total_salary, 36000.0);
    assert!(export.document.week_range.contains(&view.start));

    let json = serde_json::to_value(&export.document).unwrap();
    assert!(json["hourlyRate"].is_i64());
    assert!(json["exportDate"].is_string());
    assert!(json["weekRange"].is_string());
}
