use chrono::{Datelike, Duration, NaiveDate};

/// Get the Monday of the week containing the given date
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_signed(Duration::days(
        (date.weekday().num_days_from_monday() % 7) as i64,
    ))
    .unwrap_or(date)
}

/// Get the Sunday of the week (Monday + 6 days)
pub fn week_end(start: NaiveDate) -> NaiveDate {
    start.checked_add_signed(Duration::days(6)).unwrap_or(start)
}

/// ISO-8601 week number of the week containing the given date
pub fn week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Monday-to-Sunday span selected for display and aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub number: u32,
}

impl WeekWindow {
    /// The week window containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        let start = week_start(date);
        Self {
            start,
            end: week_end(start),
            number: week_number(start),
        }
    }

    /// The window a number of weeks before or after this one
    pub fn shifted(&self, weeks: i32) -> Self {
        let start = self
            .start
            .checked_add_signed(Duration::days(i64::from(weeks) * 7))
            .unwrap_or(self.start);
        Self::containing(start)
    }

    /// Whether a date falls within this window, inclusive on both ends
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_start_same_monday_for_whole_week() {
        // Monday 2023-01-02 through Sunday 2023-01-08
        let monday = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        for offset in 0..7 {
            let date = monday + Duration::days(offset);
            assert_eq!(week_start(date), monday, "offset {}", offset);
        }
    }

    #[test]
    fn test_week_start_sunday_belongs_to_prior_monday() {
        let sunday = NaiveDate::from_ymd_opt(2023, 1, 8).unwrap();
        assert_eq!(
            week_start(sunday),
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_week_end() {
        let monday = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        assert_eq!(
            week_end(monday),
            NaiveDate::from_ymd_opt(2023, 1, 8).unwrap()
        );
    }

    #[test]
    fn test_week_start_rolls_over_month_and_year() {
        // Sunday 2023-01-01 belongs to the week starting Monday 2022-12-26
        let new_years_day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(
            week_start(new_years_day),
            NaiveDate::from_ymd_opt(2022, 12, 26).unwrap()
        );
    }

    #[test]
    fn test_week_number_year_boundary() {
        // 2021-01-01 is a Friday and belongs to week 53 of 2020
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(week_number(date), 53);

        // 2016-01-01 is a Friday in week 53 of 2015
        let date = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        assert_eq!(week_number(date), 53);

        // A mid-year date for contrast
        let date = NaiveDate::from_ymd_opt(2023, 7, 5).unwrap();
        assert_eq!(week_number(date), 27);
    }

    #[test]
    fn test_window_contains_bounds() {
        let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2023, 1, 4).unwrap());
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.start - Duration::days(1)));
        assert!(!window.contains(window.end + Duration::days(1)));
    }

    #[test]
    fn test_window_shifted_back_and_forth() {
        let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2023, 6, 14).unwrap());
        let prev = window.shifted(-1);
        assert_eq!(prev.end + Duration::days(1), window.start);
        assert_eq!(prev.shifted(1), window);
    }
}
