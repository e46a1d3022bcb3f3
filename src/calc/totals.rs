//! Period totals over per-day summaries.
//!
//! Totals are accumulated from the unrounded per-day hours and rounded
//! only for display; rounding each day first would drift the aggregate.

use crate::models::{DailyHours, DailySummary, DayStatus, SpecialDayKind};
use crate::utils::round2;

#[derive(Debug, Default, Clone)]
pub struct PeriodTotals {
    pub days: usize,
    pub total_hours: f64,
    pub overtime_days: usize,
    pub shortfall_days: usize,
    pub sick_leave_days: usize,
    pub vacation_days: usize,
    /// Unrounded sums; round for display.
    pub overtime_hours: f64,
    pub shortfall_hours: f64,
}

impl PeriodTotals {
    pub fn net_hours(&self) -> f64 {
        round2(self.overtime_hours - self.shortfall_hours)
    }
}

pub fn period_totals(summaries: &[DailySummary], daily_hours: DailyHours) -> PeriodTotals {
    let mut totals = PeriodTotals {
        days: summaries.len(),
        ..Default::default()
    };

    for day in summaries {
        totals.total_hours += day.hours_worked;

        match day.status {
            DayStatus::Special(SpecialDayKind::SickLeave) => totals.sick_leave_days += 1,
            DayStatus::Special(SpecialDayKind::Vacation) => totals.vacation_days += 1,
            _ => {
                // Deltas come from the unrounded per-day figure, not from
                // the rounded status payload.
                if let DailyHours::Fixed(target) = daily_hours {
                    if day.hours_worked > target {
                        totals.overtime_days += 1;
                        totals.overtime_hours += day.hours_worked - target;
                    } else if day.hours_worked > 0.0 && day.hours_worked < target {
                        totals.shortfall_days += 1;
                        totals.shortfall_hours += target - day.hours_worked;
                    }
                }
            }
        }
    }

    totals
}
