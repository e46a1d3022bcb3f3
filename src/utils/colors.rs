/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

use crate::models::DayStatus;

/// Status color:
/// overtime → green, shortfall/incomplete → red, special days → cyan.
pub fn color_for_status(status: &DayStatus) -> &'static str {
    match status {
        DayStatus::Overtime(_) => GREEN,
        DayStatus::Shortfall(_) | DayStatus::Incomplete => RED,
        DayStatus::Special(_) => CYAN,
        DayStatus::Normal | DayStatus::Flexible => RESET,
    }
}

pub fn colorize_status(status: &DayStatus) -> String {
    format!("{}{}{}", color_for_status(status), status, RESET)
}
