use std::{fmt, ops::RangeInclusive};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Days in a [`LocationGrid`], Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Half of a school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDay {
    /// Periods 1 through 4.
    Morning,
    /// Periods 5 through 8.
    Afternoon,
}

impl HalfDay {
    /// Both halves, in form order.
    pub const ALL: [HalfDay; 2] = [HalfDay::Morning, HalfDay::Afternoon];

    /// Column of this half in a [`LocationGrid`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            HalfDay::Morning => 0,
            HalfDay::Afternoon => 1,
        }
    }

    /// Periods belonging to this half.
    #[must_use]
    pub const fn periods(self) -> RangeInclusive<u8> {
        match self {
            HalfDay::Morning => 1..=4,
            HalfDay::Afternoon => 5..=8,
        }
    }

    /// Whether a period token belongs to this half.
    ///
    /// Any single digit of the token counts, so this is not a number
    /// parse: `"10"` is a morning period and `"15"` touches both halves.
    #[must_use]
    pub fn touched_by(self, token: &str) -> bool {
        let periods = self.periods();

        token
            .chars()
            .filter_map(|c| c.to_digit(10))
            .filter_map(|d| u8::try_from(d).ok())
            .any(|d| periods.contains(&d))
    }
}

impl fmt::Display for HalfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalfDay::Morning => f.write_str("morning"),
            HalfDay::Afternoon => f.write_str("afternoon"),
        }
    }
}

/// On-site (`true`) or remote (`false`) for every half day of a week.
///
/// The default grid is all remote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationGrid([[bool; 2]; 7]);

impl LocationGrid {
    /// Number of slots, i.e. selections on the weekly report form.
    pub const SLOTS: usize = 14;

    /// Whether the student is expected on site.
    #[must_use]
    pub fn is_on_site(&self, day: Weekday, half: HalfDay) -> bool {
        self.0[day.num_days_from_monday() as usize][half.index()]
    }

    pub(crate) fn mark_on_site(&mut self, day: Weekday, half: HalfDay) {
        self.0[day.num_days_from_monday() as usize][half.index()] = true;
    }

    /// All slots in form order: Monday morning, Monday afternoon, Tuesday
    /// morning, and so on.
    pub fn slots(&self) -> impl Iterator<Item = (Weekday, HalfDay, bool)> + '_ {
        WEEKDAYS.into_iter().flat_map(move |day| {
            HalfDay::ALL
                .into_iter()
                .map(move |half| (day, half, self.is_on_site(day, half)))
        })
    }

    /// Build a grid from slot values in form order.
    ///
    /// Returns `None` unless exactly [`Self::SLOTS`] values are given.
    pub fn from_slots(values: impl IntoIterator<Item = bool>) -> Option<Self> {
        let values = values.into_iter().collect::<Vec<_>>();

        if values.len() != Self::SLOTS {
            return None;
        }

        let mut grid = Self::default();
        for (i, on_site) in values.into_iter().enumerate() {
            grid.0[i / 2][i % 2] = on_site;
        }

        Some(grid)
    }

    /// Number of on-site half days.
    #[must_use]
    pub fn on_site_count(&self) -> usize {
        self.0.iter().flatten().filter(|on_site| **on_site).count()
    }
}

impl fmt::Display for LocationGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |on_site| if on_site { "on-site" } else { "remote" };

        for (i, day) in WEEKDAYS.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{day}  {:<7}  {}",
                cell(self.is_on_site(day, HalfDay::Morning)),
                cell(self.is_on_site(day, HalfDay::Afternoon)),
            )?;
        }

        Ok(())
    }
}
