use super::card::CardId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily schedule of an employee. The wire format (snapshot and reader
/// hardware config) encodes "flexible" as -1, so the enum serializes to a
/// plain float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum DailyHours {
    Fixed(f64),
    Flexible,
}

impl DailyHours {
    pub fn is_flexible(&self) -> bool {
        matches!(self, DailyHours::Flexible)
    }

    pub fn fixed(&self) -> Option<f64> {
        match self {
            DailyHours::Fixed(h) => Some(*h),
            DailyHours::Flexible => None,
        }
    }
}

impl From<f64> for DailyHours {
    fn from(value: f64) -> Self {
        if value < 0.0 {
            DailyHours::Flexible
        } else {
            DailyHours::Fixed(value)
        }
    }
}

impl From<DailyHours> for f64 {
    fn from(value: DailyHours) -> Self {
        match value {
            DailyHours::Fixed(h) => h,
            DailyHours::Flexible => -1.0,
        }
    }
}

impl fmt::Display for DailyHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailyHours::Fixed(h) => write!(f, "{h}"),
            DailyHours::Flexible => f.write_str("flexible"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub card_id: CardId,
    pub daily_hours: DailyHours,
    pub group_id: Option<i64>,
}
