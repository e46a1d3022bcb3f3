use super::special_day::SpecialDayKind;
use crate::utils::formatting::round2;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt;

/// Classification of one calendar day for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DayStatus {
    /// No closed interval was derived from the day's events.
    Incomplete,
    /// Flexible schedule: hours recorded, no target to compare against.
    Flexible,
    Normal,
    /// Worked more than the scheduled hours; payload is the excess,
    /// rounded to two decimals.
    Overtime(f64),
    /// Worked less than the scheduled hours; payload is the deficit,
    /// rounded to two decimals.
    Shortfall(f64),
    /// Administrative override; supersedes whatever the events say.
    Special(SpecialDayKind),
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayStatus::Incomplete => f.write_str("Incomplete"),
            DayStatus::Flexible => f.write_str("Flexible schedule"),
            DayStatus::Normal => f.write_str("Normal"),
            DayStatus::Overtime(h) => write!(f, "Overtime ({h} h)"),
            DayStatus::Shortfall(h) => write!(f, "Shortfall ({h} h)"),
            DayStatus::Special(kind) => write!(f, "{kind}"),
        }
    }
}

/// Derived per-day result. Never persisted; safe to discard and recompute.
/// `hours_worked` is kept unrounded so range totals can sum exact per-day
/// values; round only for display.
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub first_arrival: Option<NaiveTime>,
    pub last_departure: Option<NaiveTime>,
    pub hours_worked: f64,
    pub status: DayStatus,
}

impl DailySummary {
    pub fn hours_display(&self) -> f64 {
        round2(self.hours_worked)
    }
}
