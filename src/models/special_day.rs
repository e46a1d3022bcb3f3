use super::card::CardId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialDayKind {
    #[serde(rename = "sick_leave")]
    SickLeave,
    #[serde(rename = "vacation")]
    Vacation,
}

impl SpecialDayKind {
    /// Parse CLI input.
    pub fn from_cli(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sick" | "sick-leave" | "sick_leave" => Some(SpecialDayKind::SickLeave),
            "vacation" => Some(SpecialDayKind::Vacation),
            _ => None,
        }
    }
}

impl fmt::Display for SpecialDayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialDayKind::SickLeave => f.write_str("Sick leave"),
            SpecialDayKind::Vacation => f.write_str("Vacation"),
        }
    }
}

/// Administrative non-working day for one card. Unique per (card_id, date);
/// setting a new kind for an already-special date replaces the old entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialDay {
    pub card_id: CardId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: SpecialDayKind,
}
