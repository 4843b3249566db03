//! Backend timestamp parsing and display.
//!
//! The backend emits dates in three shapes depending on the endpoint:
//! `YYYY-MM-DD HH:MM:SS` (admin list, results), RFC 2822 from its JSON
//! encoder (history), and occasionally RFC 3339.

use chrono::{DateTime, NaiveDateTime};

/// Shown in the admin list when a patient has no diagnoses.
pub const NO_RECORDS: &str = "Sin registros";

const PLAIN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse any of the backend date shapes into a naive (wall clock) value.
#[must_use]
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, PLAIN_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_utc());
    }
    // Some encoders spell the zone as "GMT" which rfc2822 accepts; others use "UTC".
    if let Some(stripped) = raw.strip_suffix(" UTC") {
        if let Ok(dt) = DateTime::parse_from_rfc2822(&format!("{stripped} GMT")) {
            return Some(dt.naive_utc());
        }
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local())
}

/// Full date and time, e.g. `15/10/2024 10:30:00`.
///
/// Unparseable input is returned verbatim.
#[must_use]
pub fn format_full(raw: &str) -> String {
    match parse(raw) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}

/// Date with hours and minutes, for table cells. `None` means no records.
#[must_use]
pub fn format_short(raw: Option<&str>) -> String {
    match raw {
        None => NO_RECORDS.to_string(),
        Some(s) if s.trim().is_empty() => NO_RECORDS.to_string(),
        Some(s) => match parse(s) {
            Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
            None => s.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_format() {
        assert_eq!(format_full("2024-10-15 10:30:05"), "15/10/2024 10:30:05");
        assert_eq!(format_short(Some("2024-10-15 10:30:05")), "15/10/2024 10:30");
    }

    #[test]
    fn test_rfc2822_format() {
        assert_eq!(
            format_full("Tue, 15 Oct 2024 10:30:05 GMT"),
            "15/10/2024 10:30:05"
        );
    }

    #[test]
    fn test_rfc3339_format() {
        assert!(parse("2024-10-15T10:30:05+00:00").is_some());
    }

    #[test]
    fn test_missing_and_garbage() {
        assert_eq!(format_short(None), NO_RECORDS);
        assert_eq!(format_short(Some("")), NO_RECORDS);
        assert_eq!(format_full("ayer"), "ayer");
    }
}
