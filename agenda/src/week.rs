use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Week number of the semester start date itself.
///
/// The school counts the week after the nominal start as week 1, and the
/// report always concerns the week after the current one.
pub const START_WEEK: i64 = 2;

/// Current academic week for `today`.
///
/// Dates before `semester_start` round down, giving week 1 or lower.
#[must_use]
pub fn current_week(today: NaiveDate, semester_start: NaiveDate) -> i64 {
    (today - semester_start).num_days().div_euclid(7) + START_WEEK
}

/// Week numbering anchored at a semester start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterCalendar {
    start: NaiveDate,
}

impl SemesterCalendar {
    /// A calendar for the semester starting on `start`.
    #[must_use]
    pub const fn new(start: NaiveDate) -> Self {
        Self { start }
    }

    /// See [`current_week`].
    #[must_use]
    pub fn current_week(&self, today: NaiveDate) -> i64 {
        current_week(today, self.start)
    }

    /// The week being reported on, i.e. next week.
    #[must_use]
    pub fn target_week(&self, today: NaiveDate) -> i64 {
        self.current_week(today) + 1
    }

    /// First day of `week`.
    #[must_use]
    pub fn week_start(&self, week: i64) -> NaiveDate {
        self.start + Duration::weeks(week - START_WEEK)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{current_week, SemesterCalendar};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_date_is_week_two() {
        let start = date(2024, 8, 30);
        assert_eq!(current_week(start, start), 2);
    }

    #[test]
    fn weeks_roll_over_every_seven_days() {
        let start = date(2024, 8, 30);

        assert_eq!(current_week(date(2024, 9, 5), start), 2);
        assert_eq!(current_week(date(2024, 9, 6), start), 3);
        assert_eq!(current_week(date(2024, 12, 31), start), 19);
    }

    #[test]
    fn before_start_rounds_down() {
        let start = date(2024, 8, 30);

        assert_eq!(current_week(date(2024, 8, 29), start), 1);
        assert_eq!(current_week(date(2024, 8, 23), start), 1);
        assert_eq!(current_week(date(2024, 8, 22), start), 0);
    }

    #[test]
    fn target_week_is_next_week() {
        let calendar = SemesterCalendar::new(date(2025, 2, 17));
        let today = date(2025, 3, 3);

        assert_eq!(calendar.current_week(today), 4);
        assert_eq!(calendar.target_week(today), 5);
    }

    #[test]
    fn week_start() {
        let calendar = SemesterCalendar::new(date(2024, 8, 30));

        assert_eq!(calendar.week_start(2), date(2024, 8, 30));
        assert_eq!(calendar.week_start(3), date(2024, 9, 6));
        assert_eq!(calendar.current_week(calendar.week_start(10)), 10);
    }
}
