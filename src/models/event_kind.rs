use serde::{Deserialize, Serialize};

/// Labels used in the day-files on the share. The reader hardware writes
/// these exact strings; they must not be localized or reworded.
const LABEL_ARRIVAL: &str = "Prihod na delo";
const LABEL_DEPARTURE: &str = "Izhod iz dela";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Arrival,
    Departure,
}

impl EventKind {
    /// Convert enum → day-file label
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::Arrival => LABEL_ARRIVAL,
            EventKind::Departure => LABEL_DEPARTURE,
        }
    }

    /// Convert day-file label → enum
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            LABEL_ARRIVAL => Some(EventKind::Arrival),
            LABEL_DEPARTURE => Some(EventKind::Departure),
            _ => None,
        }
    }

    /// Parse CLI input ("arrival" / "departure", case-insensitive).
    pub fn from_cli(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arrival" | "in" => Some(EventKind::Arrival),
            "departure" | "out" => Some(EventKind::Departure),
            _ => None,
        }
    }

    pub fn is_arrival(&self) -> bool {
        matches!(self, EventKind::Arrival)
    }

    pub fn is_departure(&self) -> bool {
        matches!(self, EventKind::Departure)
    }
}
