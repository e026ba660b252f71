//! Parsing of the many date encodings the Cloud 9 API emits.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;

static ISO_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date pattern is valid"));

const DAY_FIRST_FORMATS: [&str; 2] = ["%d/%m/%Y", "%d-%m-%Y"];

/// Parse a date-bearing JSON value. Only strings can carry dates here;
/// anything else degrades to `None` and is skipped by the caller.
pub(crate) fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    parse_date_str(value.as_str()?)
}

/// Parse a raw date string in any of the known encodings.
///
/// Tries, in order: a full RFC 3339 timestamp (normalizing a trailing `Z`
/// to an explicit zero offset first), an embedded `YYYY-MM-DD` run, and
/// the day-first regional formats. Total: every failure yields `None`.
pub(crate) fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return None;
    }

    let rfc3339 = match candidate.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => candidate.to_owned(),
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&rfc3339) {
        return Some(timestamp.date_naive());
    }

    if let Some(run) = ISO_DATE_PATTERN.find(candidate)
        && let Ok(date) = NaiveDate::parse_from_str(run.as_str(), "%Y-%m-%d")
    {
        return Some(date);
    }

    DAY_FIRST_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::{parse_date_str, parse_date_value};

    fn march_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
    }

    #[test]
    fn equivalent_encodings_parse_to_the_same_date() {
        assert_eq!(parse_date_str("2024-03-01T00:00:00Z"), Some(march_first()));
        assert_eq!(
            parse_date_str("2024-03-01T10:30:00+01:00"),
            Some(march_first())
        );
        assert_eq!(parse_date_str("2024-03-01"), Some(march_first()));
        assert_eq!(parse_date_str("01/03/2024"), Some(march_first()));
        assert_eq!(parse_date_str("01-03-2024"), Some(march_first()));
    }

    #[test]
    fn embedded_iso_runs_are_found() {
        assert_eq!(
            parse_date_str("Collection due 2024-03-01 (rescheduled)"),
            Some(march_first())
        );
    }

    #[test]
    fn parser_is_total() {
        assert_eq!(parse_date_str(""), None);
        assert_eq!(parse_date_str("   "), None);
        assert_eq!(parse_date_str("not a date"), None);
        assert_eq!(parse_date_str("99/99/2024"), None);
        assert_eq!(parse_date_str("2024-13-45"), None);
        assert_eq!(parse_date_value(&json!(null)), None);
        assert_eq!(parse_date_value(&json!(42)), None);
        assert_eq!(parse_date_value(&json!({ "date": "2024-03-01" })), None);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(parse_date_str("  2024-03-01  "), Some(march_first()));
    }
}
