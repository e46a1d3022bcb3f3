//! Worker roster file on the share: `worker_id.csv`, one `name;cardId`
//! line per employee, no header. External readers resolve card swipes to
//! names through this file, so it is rewritten after every employee add,
//! delete or card-id change.

use crate::errors::{AppError, AppResult};
use crate::models::Employee;
use crate::store::ShareClient;

pub const ROSTER_FILE: &str = "worker_id.csv";

pub fn write_roster(share: &dyn ShareClient, employees: &[Employee]) -> AppResult<()> {
    let mut sorted: Vec<&Employee> = employees.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let content = sorted
        .iter()
        .map(|e| format!("{};{}", e.name, e.card_id))
        .collect::<Vec<_>>()
        .join("\n");

    share
        .store(ROSTER_FILE, content.as_bytes())
        .map_err(|e| AppError::ConnectionUnavailable(format!("{ROSTER_FILE}: {e}")))
}
