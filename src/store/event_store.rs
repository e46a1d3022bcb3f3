//! Attendance event store over the remote share: per-day files with read,
//! append and compacting-delete operations that tolerate partial failures
//! and permission-restricted writes.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use super::day_file;
use super::share::{ShareClient, ShareError};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, CardId, EventKind};
use crate::ui::messages;
use crate::utils::date::days_between;

pub struct EventStore {
    share: Arc<dyn ShareClient>,
    backup_dir: PathBuf,
}

impl EventStore {
    pub fn new(share: Arc<dyn ShareClient>, backup_dir: PathBuf) -> Self {
        Self { share, backup_dir }
    }

    // ------------------------------------------------
    // Read path: connectivity failures degrade to an
    // empty day so calculations keep working.
    // ------------------------------------------------

    /// Events of a single day. A missing file is an empty day; a file with
    /// malformed rows yields the parsable rows.
    pub fn read_day(&self, date: NaiveDate) -> Vec<AttendanceEvent> {
        let name = day_file::file_name(date);

        let data = match self.share.retrieve(&name) {
            Ok(data) => data,
            Err(ShareError::NotFound) => return Vec::new(),
            Err(e) => {
                messages::warning(format!("Could not read {name}: {e}; treating day as empty"));
                return Vec::new();
            }
        };

        let (events, skipped) = day_file::parse(date, &data);
        if skipped > 0 {
            messages::warning(format!("{name}: skipped {skipped} malformed row(s)"));
        }
        events
    }

    /// All events in the inclusive date range, one file per day.
    pub fn read_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<AttendanceEvent> {
        let mut all = Vec::new();
        for date in days_between(start, end) {
            all.extend(self.read_day(date));
        }
        all
    }

    // ------------------------------------------------
    // Write path: failures are fatal to the operation
    // but never leave a half-written file behind.
    // ------------------------------------------------

    /// Append one event to its day-file (full rewrite of the document).
    pub fn append_event(
        &self,
        card_id: &CardId,
        timestamp: NaiveDateTime,
        kind: EventKind,
    ) -> AppResult<()> {
        let date = timestamp.date();
        let mut events = self.read_day(date);
        events.push(AttendanceEvent::new(card_id.clone(), timestamp, kind));
        events.sort_by_key(|ev| ev.timestamp);
        self.write_day(date, &events)
    }

    /// Remove every event matching the identity triple. Returns how many
    /// rows were removed; zero is a successful no-op.
    pub fn delete_event(
        &self,
        card_id: &CardId,
        timestamp: NaiveDateTime,
        kind: EventKind,
    ) -> AppResult<usize> {
        let date = timestamp.date();
        let events = self.read_day(date);
        if events.is_empty() {
            return Ok(0);
        }

        let remaining: Vec<AttendanceEvent> = events
            .iter()
            .filter(|ev| !ev.matches(card_id, timestamp, kind))
            .cloned()
            .collect();

        let removed = events.len() - remaining.len();
        if removed == 0 {
            return Ok(0);
        }

        self.write_day(date, &remaining)?;
        Ok(removed)
    }

    /// Remove every event of one card over a date range, file by file.
    /// Returns the number of removed events.
    pub fn delete_all_for_card(
        &self,
        card_id: &CardId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<usize> {
        let mut removed_total = 0;

        for date in days_between(start, end) {
            let events = self.read_day(date);
            if events.is_empty() {
                continue;
            }

            let remaining: Vec<AttendanceEvent> = events
                .iter()
                .filter(|ev| ev.card_id != *card_id)
                .cloned()
                .collect();

            let removed = events.len() - remaining.len();
            if removed == 0 {
                continue;
            }

            self.write_day(date, &remaining)?;
            removed_total += removed;
        }

        Ok(removed_total)
    }

    /// Replace an old card id with a new one in every day-file that
    /// mentions it. Best-effort per file: one unreadable or unwritable file
    /// does not stop the rest. Returns the number of files updated.
    pub fn replace_card_id(&self, old: &CardId, new: &CardId) -> AppResult<usize> {
        let names = self
            .share
            .list()
            .map_err(|e| AppError::ConnectionUnavailable(e.to_string()))?;

        let mut updated = 0;
        for name in names.iter().filter(|n| day_file::is_day_file(n)) {
            let data = match self.share.retrieve(name) {
                Ok(data) => data,
                Err(e) => {
                    messages::warning(format!("Skipping {name}: {e}"));
                    continue;
                }
            };

            let content = String::from_utf8_lossy(&data);
            if !content.contains(old.as_str()) {
                continue;
            }

            let replaced = content.replace(old.as_str(), new.as_str());
            match self.write_with_strategies(name, replaced.as_bytes()) {
                Ok(()) => updated += 1,
                Err(e) => messages::warning(format!("Could not update {name}: {e}")),
            }
        }

        Ok(updated)
    }

    /// Rewrite-or-delete rule: a day with no events must not exist as a
    /// file on the share.
    fn write_day(&self, date: NaiveDate, events: &[AttendanceEvent]) -> AppResult<()> {
        let name = day_file::file_name(date);

        if events.is_empty() {
            return match self.share.delete(&name) {
                Ok(()) | Err(ShareError::NotFound) => Ok(()),
                Err(e) => Err(AppError::ConnectionUnavailable(format!("delete {name}: {e}"))),
            };
        }

        let data = day_file::serialize(events);
        match self.write_with_strategies(&name, &data) {
            Ok(()) => Ok(()),
            Err(_) => self.backup_locally(date, &name, &data),
        }
    }

    /// Ordered write strategies; the operation succeeds as soon as one
    /// does. Each strategy writes a complete replacement document.
    fn write_with_strategies(&self, name: &str, data: &[u8]) -> Result<(), ShareError> {
        // 1) direct overwrite
        let direct_err = match self.share.store(name, data) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        // 2) delete the target first, then create it
        let _ = self.share.delete(name);
        if self.share.store(name, data).is_ok() {
            return Ok(());
        }

        // 3) temp file, then best-effort swap; a surviving temp file is an
        //    accepted fallback when the copy-back step is also rejected
        let temp = day_file::temp_file_name(name);
        self.share.store(&temp, data)?;

        let _ = self.share.delete(name);
        match self.share.retrieve(&temp) {
            Ok(temp_data) => {
                if self.share.store(name, &temp_data).is_ok() {
                    let _ = self.share.delete(&temp);
                    return Ok(());
                }
                messages::warning(format!(
                    "Copy-back of {temp} to {name} rejected; keeping {temp} on the share"
                ));
                Ok(())
            }
            Err(_) => Err(direct_err),
        }
    }

    /// Last resort: preserve the replacement document locally and tell the
    /// operator where it is. Losing attendance rows silently is the one
    /// unacceptable outcome.
    fn backup_locally(&self, date: NaiveDate, name: &str, data: &[u8]) -> AppResult<()> {
        fs::create_dir_all(&self.backup_dir)?;
        let backup = self.backup_dir.join(day_file::backup_file_name(date));
        fs::write(&backup, data)?;

        Err(AppError::PermissionDenied {
            file: name.to_string(),
            backup,
        })
    }
}
