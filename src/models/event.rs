use super::{card::CardId, event_kind::EventKind};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// One clock-in or clock-out record, as stored in a day-file.
/// Immutable once recorded; identity for deletion is the whole triple
/// (card_id, timestamp, kind) since the share knows no surrogate keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceEvent {
    pub card_id: CardId,
    pub timestamp: NaiveDateTime,
    pub kind: EventKind,
}

impl AttendanceEvent {
    pub fn new(card_id: CardId, timestamp: NaiveDateTime, kind: EventKind) -> Self {
        Self {
            card_id,
            timestamp,
            kind,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// Identity match for delete operations. Events parsed from bare-time
    /// rows have already been combined with the file's date, so comparing
    /// the full timestamp covers both on-disk conventions.
    pub fn matches(&self, card_id: &CardId, timestamp: NaiveDateTime, kind: EventKind) -> bool {
        self.card_id == *card_id && self.timestamp == timestamp && self.kind == kind
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
