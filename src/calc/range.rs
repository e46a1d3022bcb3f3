//! Range aggregation: one summary per day with events, plus one per
//! special day that has no events, chronologically sorted.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::daily::compute_day;
use crate::models::{AttendanceEvent, CardId, DailyHours, DailySummary, SpecialDay, SpecialDayKind};

pub fn compute_range(
    card_id: &CardId,
    daily_hours: DailyHours,
    events: &[AttendanceEvent],
    special_days: &[SpecialDay],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailySummary> {
    let overrides: BTreeMap<NaiveDate, SpecialDayKind> = special_days
        .iter()
        .filter(|sd| sd.card_id == *card_id && sd.date >= start && sd.date <= end)
        .map(|sd| (sd.date, sd.kind))
        .collect();

    // Group this card's events by the date of their timestamp.
    let mut by_date: BTreeMap<NaiveDate, Vec<AttendanceEvent>> = BTreeMap::new();
    for ev in events.iter().filter(|ev| ev.card_id == *card_id) {
        by_date.entry(ev.date()).or_default().push(ev.clone());
    }

    let mut summaries: Vec<DailySummary> = by_date
        .iter()
        .map(|(date, day_events)| {
            compute_day(
                *date,
                daily_hours,
                day_events,
                overrides.get(date).copied(),
            )
        })
        .collect();

    // Special days without any recorded events still get a row.
    for (date, kind) in &overrides {
        if !by_date.contains_key(date) {
            summaries.push(compute_day(*date, daily_hours, &[], Some(*kind)));
        }
    }

    summaries.sort_by_key(|s| s.date);
    summaries
}
