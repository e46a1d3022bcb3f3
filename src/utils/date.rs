use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Inclusive list of days between two dates.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;
    while d <= end {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }
    out
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return out,
    };

    while d.month() == month {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}

/// Resolve a period expression into an inclusive (start, end) pair.
///
/// Accepted forms:
/// - `YYYY-MM-DD`            one day
/// - `YYYY-MM`               whole month
/// - `YYYY-MM-DD:YYYY-MM-DD` explicit range (also works with months)
pub fn resolve_period(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some((a, b)) = p.split_once(':') {
        let (start, _) = resolve_period(a)?;
        let (_, end) = resolve_period(b)?;
        if start > end {
            return Err(format!("Start {start} is after end {end}"));
        }
        return Ok((start, end));
    }

    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        let days = all_days_of_month(first.year(), first.month());
        if let (Some(s), Some(e)) = (days.first(), days.last()) {
            return Ok((*s, *e));
        }
    }

    Err(format!("Invalid period: {p}"))
}
