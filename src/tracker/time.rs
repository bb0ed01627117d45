use crate::error::{parse_error, TrackerResult};

/// Minutes in a full day, used for shifts that cross midnight
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse a clock time in HH:MM format into minutes since midnight
pub fn time_to_minutes(time_str: &str) -> TrackerResult<u32> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return Err(parse_error(&format!("Invalid time format: {}", time_str)));
    }

    let hour = parts[0]
        .parse::<u32>()
        .map_err(|_| parse_error(&format!("Invalid hour in time: {}", time_str)))?;
    let minute = parts[1]
        .parse::<u32>()
        .map_err(|_| parse_error(&format!("Invalid minute in time: {}", time_str)))?;

    if hour > 23 || minute > 59 {
        return Err(parse_error(&format!("Time out of range: {}", time_str)));
    }

    Ok(hour * 60 + minute)
}

/// Format minutes since midnight as a zero-padded HH:MM string
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Hours between a start and end clock time.
///
/// An end time earlier than the start time means the shift crosses
/// midnight (e.g. 23:00 to 01:00) and counts the wrapped span.
pub fn shift_duration(start: &str, end: &str) -> TrackerResult<f64> {
    let start_minutes = time_to_minutes(start)?;
    let end_minutes = time_to_minutes(end)?;

    let total_minutes = if end_minutes < start_minutes {
        (MINUTES_PER_DAY - start_minutes) + end_minutes
    } else {
        end_minutes - start_minutes
    };

    Ok(f64::from(total_minutes) / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_minutes() {
        // Valid cases
        assert_eq!(time_to_minutes("00:00").unwrap(), 0);
        assert_eq!(time_to_minutes("09:00").unwrap(), 540);
        assert_eq!(time_to_minutes("12:30").unwrap(), 750);
        assert_eq!(time_to_minutes("23:59").unwrap(), 1439);

        // Invalid cases
        assert!(time_to_minutes("24:00").is_err()); // Hour out of range
        assert!(time_to_minutes("12:60").is_err()); // Minute out of range
        assert!(time_to_minutes("12:30:45").is_err()); // Too many parts
        assert!(time_to_minutes("12").is_err()); // Too few parts
        assert!(time_to_minutes("12:ab").is_err()); // Invalid minute
        assert!(time_to_minutes("ab:30").is_err()); // Invalid hour
    }

    #[test]
    fn test_minutes_to_time_roundtrip() {
        for time in ["00:00", "09:05", "12:30", "23:59"] {
            assert_eq!(minutes_to_time(time_to_minutes(time).unwrap()), time);
        }
    }

    #[test]
    fn test_shift_duration_same_day() {
        assert_eq!(shift_duration("09:00", "17:00").unwrap(), 8.0);
        assert_eq!(shift_duration("08:30", "12:00").unwrap(), 3.5);
        assert_eq!(shift_duration("10:00", "10:00").unwrap(), 0.0);
    }

    #[test]
    fn test_shift_duration_overnight() {
        assert_eq!(shift_duration("23:00", "01:00").unwrap(), 2.0);
        assert_eq!(shift_duration("22:30", "06:30").unwrap(), 8.0);
        // One minute short of a full day
        assert_eq!(
            shift_duration("00:01", "00:00").unwrap(),
            1439.0 / 60.0
        );
    }

    #[test]
    fn test_shift_duration_malformed() {
        assert!(shift_duration("9am", "17:00").is_err());
        assert!(shift_duration("09:00", "25:00").is_err());
    }
}
