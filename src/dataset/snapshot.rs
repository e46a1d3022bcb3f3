//! Wire snapshot of the dataset: one JSON document per deployment plus a
//! tiny companion artifact holding only the version number, cheap to read
//! during polling.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::SyncedDataset;
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, Group, SpecialDay};

pub const SNAPSHOT_FILE: &str = "shared_data.json";
pub const VERSION_FILE: &str = "data_version.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub employees: Vec<Employee>,
    pub groups: Vec<Group>,
    pub special_days: Vec<SpecialDay>,
    pub version: u64,
    pub last_updated: String,
}

impl Snapshot {
    pub fn encode(&self) -> AppResult<Vec<u8>> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json.into_bytes())
    }

    pub fn decode(data: &[u8]) -> AppResult<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| AppError::MalformedRecord(format!("snapshot is not UTF-8: {e}")))?;
        Ok(serde_json::from_str(text)?)
    }
}

/// Parse the version artifact. Both an absent artifact and an unreadable
/// one read as version 1, so a fresh share triggers exactly one full
/// fetch attempt.
pub fn parse_version(data: &[u8]) -> u64 {
    std::str::from_utf8(data)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

impl SyncedDataset {
    /// Full serialized copy with an explicit version stamp.
    pub fn to_snapshot(&self, version: u64) -> Snapshot {
        Snapshot {
            employees: self.employees.clone(),
            groups: self.groups.clone(),
            special_days: self.special_days.clone(),
            version,
            last_updated: self
                .last_updated
                .unwrap_or_else(Local::now)
                .to_rfc3339(),
        }
    }

    /// Rebuild a dataset from a snapshot (wholesale, no merging).
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let last_updated = DateTime::parse_from_rfc3339(&snapshot.last_updated)
            .ok()
            .map(|dt| dt.with_timezone(&Local));

        Self {
            employees: snapshot.employees,
            groups: snapshot.groups,
            special_days: snapshot.special_days,
            version: snapshot.version,
            last_updated,
        }
    }
}
