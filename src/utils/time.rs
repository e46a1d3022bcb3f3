//! Time utilities: parsing the timestamp shapes found in day-files and in
//! CLI input, plus duration helpers.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a day-file timestamp. Rows written by the admin tool carry a full
/// `YYYY-MM-DD HH:MM:SS`; rows written by the readers carry a bare
/// `HH:MM:SS` that is combined with the file's date.
pub fn parse_record_timestamp(raw: &str, file_date: NaiveDate) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    if let Ok(t) = NaiveTime::parse_from_str(raw, "%H:%M:%S") {
        return Some(file_date.and_time(t));
    }

    None
}

/// Parse CLI time input, `HH:MM` or `HH:MM:SS`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

pub fn parse_time_or_err(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// Hours (fractional) between two instants of the same day, never negative.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let secs = (end - start).num_seconds();
    if secs <= 0 {
        0.0
    } else {
        secs as f64 / 3600.0
    }
}
