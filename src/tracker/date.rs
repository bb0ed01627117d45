use crate::error::{parse_error, TrackerResult};
use chrono::NaiveDate;

/// Parse a DD/MM/YYYY display date into a calendar date
pub fn to_calendar(date_str: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%d/%m/%Y")
        .map_err(|e| parse_error(&format!("Invalid date {}: {}", date_str, e)))
}

/// Format a calendar date as zero-padded DD/MM/YYYY
pub fn to_display(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Whether a stored date still uses the old YYYY-MM-DD format
pub fn is_legacy_format(date_str: &str) -> bool {
    date_str.contains('-') && !date_str.contains('/')
}

/// Rewrite a legacy YYYY-MM-DD date as DD/MM/YYYY.
///
/// This is a plain field reorder on '-', not a calendar-aware reparse;
/// values that do not split into three fields are returned unchanged.
pub fn migrate_legacy(date_str: &str) -> String {
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() != 3 {
        return date_str.to_string();
    }
    format!("{}/{}/{}", parts[2], parts[1], parts[0])
}
