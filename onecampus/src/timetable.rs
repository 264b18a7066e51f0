//! The timetable payload served to the portal's timetable app.
use campus_agenda::TimetableEntry;
use serde::Deserialize;
use serde_json::Value;

use crate::Result;

/// One record of the payload. Values are usually strings but numbers and
/// nulls show up too.
#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "週次", default)]
    week: Value,
    #[serde(rename = "星期", default)]
    day: Value,
    #[serde(rename = "節次", default)]
    periods: Value,
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl From<Record> for TimetableEntry {
    fn from(record: Record) -> Self {
        Self {
            week: text(record.week).unwrap_or_default(),
            day: text(record.day),
            periods: text(record.periods).unwrap_or_default(),
        }
    }
}

/// Decode a captured timetable response body.
///
/// # Errors
///
/// Fails if the body is not a JSON array of objects.
pub fn decode(body: &[u8]) -> Result<Vec<TimetableEntry>> {
    let records: Vec<Record> = serde_json::from_slice(body)?;

    Ok(records.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use campus_agenda::TimetableEntry;

    use crate::Error;

    #[test]
    fn decode() {
        let body = r#"[
            {"週次": "5", "星期": "3", "節次": "2,6", "科目": "數學"},
            {"週次": 6, "星期": 1, "節次": "1"},
            {"週次": "5", "星期": "", "節次": "3"},
            {"週次": "5", "星期": null},
            {}
        ]"#;

        let entries = super::decode(body.as_bytes()).unwrap();

        assert_eq!(
            entries,
            [
                TimetableEntry::new("5", Some("3"), "2,6"),
                TimetableEntry::new("6", Some("1"), "1"),
                TimetableEntry::new("5", Some(""), "3"),
                TimetableEntry::new("5", None::<String>, ""),
                TimetableEntry::default(),
            ]
        );
    }

    #[test]
    fn decode_empty() {
        assert!(super::decode(b"[]").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_non_arrays() {
        assert!(matches!(
            super::decode(br#"{"error": "unauthorized"}"#),
            Err(Error::Payload(_))
        ));
        assert!(matches!(super::decode(b"<html>"), Err(Error::Payload(_))));
    }
}
