//! Day-file codec: `time_records_YYYYMMDD.csv`, one row per event,
//! `cardId,timestamp,label`, no header. The format predates this tool and
//! is shared with the reader hardware, so parsing is best-effort and
//! serialization always writes the full timestamp form.

use chrono::NaiveDate;

use crate::models::{AttendanceEvent, CardId, EventKind};
use crate::utils::time::parse_record_timestamp;

pub const FILE_PREFIX: &str = "time_records_";
pub const FILE_SUFFIX: &str = ".csv";

pub fn file_name(date: NaiveDate) -> String {
    format!("{}{}{}", FILE_PREFIX, date.format("%Y%m%d"), FILE_SUFFIX)
}

pub fn temp_file_name(name: &str) -> String {
    format!("temp_{name}")
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("backup_{}", file_name(date))
}

pub fn is_day_file(name: &str) -> bool {
    name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX)
}

/// Parse a day-file. Malformed rows are skipped, not fatal; the second
/// element of the result is how many rows were dropped so the caller can
/// log the degradation.
pub fn parse(date: NaiveDate, data: &[u8]) -> (Vec<AttendanceEvent>, usize) {
    let mut events = Vec::new();
    let mut skipped = 0;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        let (raw_card, raw_ts, raw_label) = match (record.get(0), record.get(1), record.get(2)) {
            (Some(a), Some(b), Some(c)) => (a, b, c),
            _ => {
                skipped += 1;
                continue;
            }
        };

        let card_id = match CardId::parse(raw_card) {
            Ok(c) => c,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let timestamp = match parse_record_timestamp(raw_ts, date) {
            Some(ts) => ts,
            None => {
                skipped += 1;
                continue;
            }
        };
        let kind = match EventKind::from_label(raw_label) {
            Some(k) => k,
            None => {
                skipped += 1;
                continue;
            }
        };

        events.push(AttendanceEvent::new(card_id, timestamp, kind));
    }

    (events, skipped)
}

/// Serialize a complete replacement document for one day.
pub fn serialize(events: &[AttendanceEvent]) -> Vec<u8> {
    let mut out = Vec::new();
    for ev in events {
        out.extend_from_slice(
            format!(
                "{},{},{}\n",
                ev.card_id.as_str(),
                ev.timestamp_str(),
                ev.kind.as_label()
            )
            .as_bytes(),
        );
    }
    out
}
