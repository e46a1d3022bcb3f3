//! Local archive export of one worker's raw events over a date range.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::Writer;

use crate::errors::{AppError, AppResult};
use crate::models::AttendanceEvent;

/// Keep letters, digits, spaces, dashes and underscores; everything else
/// would make a questionable filename.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn archive_file_name(worker_name: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "archive_{}_{}_{}.csv",
        sanitize_name(worker_name),
        start.format("%Y%m%d"),
        end.format("%Y%m%d")
    )
}

/// Write the worker's events, sorted by timestamp, to a CSV file in `dir`.
/// Returns the path of the written file.
pub fn archive_events(
    dir: &Path,
    worker_name: &str,
    events: &[AttendanceEvent],
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<PathBuf> {
    if events.is_empty() {
        return Err(AppError::Export(format!(
            "No events for {worker_name} between {start} and {end}"
        )));
    }

    let mut sorted = events.to_vec();
    sorted.sort_by_key(|ev| ev.timestamp);

    let path = dir.join(archive_file_name(worker_name, start, end));
    let mut wtr = Writer::from_path(&path).map_err(|e| AppError::Export(e.to_string()))?;

    wtr.write_record(["CardID", "Timestamp", "Status"])?;
    for ev in &sorted {
        wtr.write_record([
            ev.card_id.as_str(),
            &ev.timestamp_str(),
            ev.kind.as_label(),
        ])?;
    }
    wtr.flush()?;

    Ok(path)
}
