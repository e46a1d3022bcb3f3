//! Formatting utilities used for CLI outputs.

use chrono::NaiveTime;

/// Round to two decimal places. Status payloads and displayed hour figures
/// use this; range totals must be summed before rounding.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_hours(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// `HH:MM:SS`, or a placeholder when the field is absent.
pub fn format_optional_time(t: Option<NaiveTime>) -> String {
    match t {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{s:>width$}")
}
