// Parsing of user-supplied target dates

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::models::countdown_event::EventError;

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Accepts RFC 3339, `YYYY-MM-DD[T| ]HH:MM[:SS]` in local time, or a bare
/// `YYYY-MM-DD` meaning local midnight.
pub fn parse_target_date(input: &str) -> Result<DateTime<Local>, EventError> {
    let input = input.trim();
    let invalid = || EventError::InvalidDate(input.to_string());

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Local));
    }

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(invalid)?;

    // Times skipped by a DST jump do not exist locally
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(invalid)
}
