use serde::{Deserialize, Serialize};

/// A single scheduled class, as reported by the timetable source.
///
/// Fields are kept as the raw strings the source hands out. Interpreting
/// them is left to the accessors below and to [`derive`](crate::derive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// Academic week number, e.g. `"5"`.
    #[serde(default)]
    pub week: String,

    /// Day of week, `"1"` (Monday) through `"7"` (Sunday).
    #[serde(default)]
    pub day: Option<String>,

    /// Comma separated period numbers, e.g. `"1,2"`.
    #[serde(default)]
    pub periods: String,
}

impl TimetableEntry {
    /// Create an entry from its raw fields.
    pub fn new(
        week: impl Into<String>,
        day: Option<impl Into<String>>,
        periods: impl Into<String>,
    ) -> Self {
        Self {
            week: week.into(),
            day: day.map(Into::into),
            periods: periods.into(),
        }
    }

    /// The week number, if the week field is made up of digits only.
    ///
    /// Full-width digits count. Anything else (blank, signed, non-numeric,
    /// too large) yields `None`.
    #[must_use]
    pub fn week_number(&self) -> Option<i64> {
        parse_decimal(self.week.trim())
    }

    /// The trimmed day field, or `None` if it is absent or blank.
    #[must_use]
    pub fn day_field(&self) -> Option<&str> {
        self.day.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    /// Period tokens, trimmed.
    pub fn periods(&self) -> impl Iterator<Item = &str> {
        self.periods.split(',').map(str::trim)
    }
}

/// Value of an ASCII or full-width (`０`-`９`) decimal digit.
fn decimal_digit(c: char) -> Option<u32> {
    match c {
        '０'..='９' => Some(c as u32 - '０' as u32),
        _ => c.to_digit(10),
    }
}

/// Parse an unsigned number written in ASCII or full-width digits.
pub(crate) fn parse_decimal(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }

    s.chars().try_fold(0_i64, |n, c| {
        n.checked_mul(10)?.checked_add(decimal_digit(c)?.into())
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_decimal, TimetableEntry};

    #[test]
    fn week_number() {
        let week = |w: &str| TimetableEntry::new(w, Some("1"), "1").week_number();

        assert_eq!(week("5"), Some(5));
        assert_eq!(week(" 12 "), Some(12));
        assert_eq!(week(""), None);
        assert_eq!(week("+5"), None);
        assert_eq!(week("-1"), None);
        assert_eq!(week("五"), None);
        assert_eq!(week("99999999999999999999999"), None);
        assert_eq!(week("５"), Some(5));
        assert_eq!(week("１２"), Some(12));
    }

    #[test]
    fn decimal_digits() {
        assert_eq!(parse_decimal("０７"), Some(7));
        assert_eq!(parse_decimal("1２"), Some(12));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("3 "), None);
    }

    #[test]
    fn day_field() {
        assert_eq!(TimetableEntry::new("1", Some(" 3 "), "").day_field(), Some("3"));
        assert_eq!(TimetableEntry::new("1", Some("  "), "").day_field(), None);
        assert_eq!(TimetableEntry::new("1", None::<String>, "").day_field(), None);
    }

    #[test]
    fn periods_are_trimmed() {
        let entry = TimetableEntry::new("1", Some("1"), "1, 2 ,6");
        assert_eq!(entry.periods().collect::<Vec<_>>(), ["1", "2", "6"]);
    }

    #[test]
    fn deserialize_with_missing_fields() {
        let entry: TimetableEntry = serde_json::from_str(r#"{"week": "3"}"#).unwrap();
        assert_eq!(entry, TimetableEntry::new("3", None::<String>, ""));
    }
}
