use crate::error::{validation_error, TrackerResult};
use crate::tracker::{date, time};

/// Raw clock-time sub-fields as the form collaborator supplies them.
///
/// An empty string means the field was left unset, mirroring the
/// selector values the entry form produces.
#[derive(Debug, Clone, Default)]
pub struct RawShiftFields {
    pub start_hour: String,
    pub start_minute: String,
    pub end_hour: String,
    pub end_minute: String,
}

impl RawShiftFields {
    /// Convenience constructor from whole HH:MM strings
    pub fn from_times(start: &str, end: &str) -> Self {
        let split = |s: &str| -> (String, String) {
            match s.split_once(':') {
                Some((h, m)) => (h.to_string(), m.to_string()),
                None => (s.to_string(), String::new()),
            }
        };
        let (start_hour, start_minute) = split(start);
        let (end_hour, end_minute) = split(end);
        Self {
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        }
    }

    fn is_empty(&self) -> bool {
        self.start_hour.is_empty()
            && self.start_minute.is_empty()
            && self.end_hour.is_empty()
            && self.end_minute.is_empty()
    }

    fn is_complete(&self) -> bool {
        !self.start_hour.is_empty()
            && !self.start_minute.is_empty()
            && !self.end_hour.is_empty()
            && !self.end_minute.is_empty()
    }

    fn compose(&self) -> (String, String) {
        (
            format!("{}:{}", self.start_hour, self.start_minute),
            format!("{}:{}", self.end_hour, self.end_minute),
        )
    }
}

/// A request to record or replace one day's shifts
#[derive(Debug, Clone, Default)]
pub struct UpsertRequest {
    /// Date in DD/MM/YYYY display format
    pub date: String,
    pub shift1: RawShiftFields,
    pub shift2: RawShiftFields,
}

/// Validated, normalized entry ready for record building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub date: String,
    pub shift1: (String, String),
    pub shift2: Option<(String, String)>,
}

/// Check a raw upsert request and normalize it into HH:MM shift pairs.
///
/// Shift 1 requires the date and all four time sub-fields. Shift 2 is
/// all-or-nothing. An end time equal to the start is rejected; an end
/// time before the start is accepted and treated as crossing midnight.
///
/// The returned date and times are canonical zero-padded spellings, so
/// "26/8/2026" and "26/08/2026" resolve to the same record key.
pub fn validate(request: &UpsertRequest) -> TrackerResult<ValidatedEntry> {
    if request.date.is_empty() || !request.shift1.is_complete() {
        return Err(validation_error(
            "A date and the full first shift are required",
        ));
    }

    let calendar = date::to_calendar(&request.date)?;

    let composed = request.shift1.compose();
    let shift1 = normalize_shift(&composed.0, &composed.1, "first")?;

    let shift2 = if request.shift2.is_empty() {
        None
    } else if request.shift2.is_complete() {
        let composed = request.shift2.compose();
        Some(normalize_shift(&composed.0, &composed.1, "second")?)
    } else {
        return Err(validation_error(
            "The second shift needs all of its fields or none of them",
        ));
    };

    Ok(ValidatedEntry {
        date: date::to_display(calendar),
        shift1,
        shift2,
    })
}

fn normalize_shift(start: &str, end: &str, which: &str) -> TrackerResult<(String, String)> {
    let start_minutes = time::time_to_minutes(start)?;
    let end_minutes = time::time_to_minutes(end)?;

    // end < start is a valid overnight shift; only a zero-length shift
    // is rejected
    if start_minutes == end_minutes {
        return Err(validation_error(&format!(
            "The {} shift cannot start and end at the same time",
            which
        )));
    }

    Ok((
        time::minutes_to_time(start_minutes),
        time::minutes_to_time(end_minutes),
    ))
}
