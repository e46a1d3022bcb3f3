//! Per-day working-hours derivation.

use chrono::NaiveDate;

use crate::models::{
    AttendanceEvent, DailyHours, DailySummary, DayStatus, EventKind, SpecialDayKind,
};
use crate::ui::messages;
use crate::utils::round2;
use crate::utils::time::hours_between;

/// Turn one day's raw events into hours worked and a status.
///
/// Events are sorted by timestamp and run through an open/closed interval
/// state machine: an Arrival opens an interval only if none is open (a
/// repeated Arrival neither reopens nor restarts); a Departure closes the
/// open interval and adds its length to the total (a Departure with no
/// open interval is ignored). An interval still open at the end of the day
/// contributes nothing.
///
/// A special-day override wins over everything: hours are forced to zero
/// and the status carries the override kind.
pub fn compute_day(
    date: NaiveDate,
    daily_hours: DailyHours,
    events: &[AttendanceEvent],
    special: Option<SpecialDayKind>,
) -> DailySummary {
    let mut sorted: Vec<&AttendanceEvent> = events.iter().collect();
    sorted.sort_by_key(|ev| ev.timestamp);

    let mut total_hours = 0.0_f64;
    let mut open_arrival = None;
    let mut first_arrival = None;
    let mut last_departure = None;

    for ev in sorted {
        match ev.kind {
            EventKind::Arrival => {
                if open_arrival.is_none() {
                    open_arrival = Some(ev.timestamp);
                    if first_arrival.is_none() {
                        first_arrival = Some(ev.time());
                    }
                }
            }
            EventKind::Departure => {
                if let Some(arrival) = open_arrival.take() {
                    if ev.timestamp < arrival {
                        // Out-of-order clock data; count nothing rather
                        // than a negative interval.
                        messages::warning(format!(
                            "{}: departure {} precedes arrival {}, interval ignored",
                            date,
                            ev.time(),
                            arrival.time()
                        ));
                    } else {
                        total_hours += hours_between(arrival, ev.timestamp);
                    }
                    last_departure = Some(ev.time());
                }
            }
        }
    }

    if let Some(kind) = special {
        return DailySummary {
            date,
            first_arrival,
            last_departure,
            hours_worked: 0.0,
            status: DayStatus::Special(kind),
        };
    }

    let status = classify(total_hours, daily_hours);

    DailySummary {
        date,
        first_arrival,
        last_departure,
        hours_worked: total_hours,
        status,
    }
}

fn classify(total_hours: f64, daily_hours: DailyHours) -> DayStatus {
    if total_hours == 0.0 {
        return DayStatus::Incomplete;
    }

    match daily_hours {
        DailyHours::Flexible => DayStatus::Flexible,
        DailyHours::Fixed(target) => {
            if total_hours > target {
                DayStatus::Overtime(round2(total_hours - target))
            } else if total_hours == target {
                DayStatus::Normal
            } else {
                DayStatus::Shortfall(round2(target - total_hours))
            }
        }
    }
}
