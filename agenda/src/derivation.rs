use chrono::Weekday;
use thiserror::Error;

use crate::{entry::parse_decimal, HalfDay, LocationGrid, TimetableEntry};

/// The timetable contained a record that cannot be placed in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    /// The day field is not a number.
    #[error("invalid day of week {0:?}")]
    InvalidDay(String),

    /// The day field is a number outside `1..=7`.
    #[error("day of week {0} is out of range (expected 1-7)")]
    DayOutOfRange(i64),
}

/// Map a day number (1 = Monday) to a [`Weekday`].
///
/// # Errors
///
/// Fails if `day` is not a number in `1..=7`. ASCII and full-width digits
/// are accepted, with an optional sign.
pub fn weekday(day: &str) -> Result<Weekday, DeriveError> {
    let trimmed = day.trim();
    let n = match trimmed.strip_prefix('-') {
        Some(digits) => parse_decimal(digits).map(|n| -n),
        None => parse_decimal(trimmed.strip_prefix('+').unwrap_or(trimmed)),
    }
    .ok_or_else(|| DeriveError::InvalidDay(day.to_owned()))?;

    match n {
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        7 => Ok(Weekday::Sun),
        n => Err(DeriveError::DayOutOfRange(n)),
    }
}

/// Work out where the student should be during `week`.
///
/// Entries for other weeks, entries whose week is not a plain number and
/// entries without a day are skipped. Every half day that has at least one
/// period in a remaining entry is on site; everything else is remote.
///
/// # Errors
///
/// Fails on the first entry for `week` whose day is not in `1..=7`. No
/// partial grid is returned.
pub fn derive<'a, I>(entries: I, week: i64) -> Result<LocationGrid, DeriveError>
where
    I: IntoIterator<Item = &'a TimetableEntry>,
{
    let mut grid = LocationGrid::default();

    for entry in entries {
        if entry.week_number() != Some(week) {
            continue;
        }
        let Some(day) = entry.day_field() else {
            continue;
        };
        let day = weekday(day)?;

        for token in entry.periods() {
            for half in HalfDay::ALL {
                if half.touched_by(token) {
                    grid.mark_on_site(day, half);
                }
            }
        }
    }

    Ok(grid)
}
