//! Library-level tests of the day-file store: read degradation, the
//! rewrite-or-delete rule, the ordered write strategies and the local
//! emergency backup.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use timeclock_admin::models::{CardId, EventKind};
use timeclock_admin::store::{DirShare, EventStore, ShareClient, ShareError};

fn setup_dirs(name: &str) -> (PathBuf, PathBuf) {
    let mut root: PathBuf = env::temp_dir();
    root.push(format!("{}_timeclock_store", name));
    let _ = fs::remove_dir_all(&root);

    let share = root.join("share");
    let backup = root.join("backup");
    fs::create_dir_all(&share).expect("share dir");
    fs::create_dir_all(&backup).expect("backup dir");
    (share, backup)
}

fn store_at(share: &PathBuf, backup: &PathBuf) -> EventStore {
    EventStore::new(Arc::new(DirShare::new(share)), backup.clone())
}

fn card_a() -> CardId {
    CardId::parse("aaaa0000000001").expect("card")
}

fn card_b() -> CardId {
    CardId::parse("bbbb0000000002").expect("card")
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).expect("date")
}

const DAY_FILE: &str = "time_records_20250901.csv";

#[test]
fn test_append_then_read_roundtrip() {
    let (share, backup) = setup_dirs("roundtrip");
    let store = store_at(&share, &backup);

    let ts = date().and_hms_opt(8, 0, 0).expect("time");
    store
        .append_event(&card_a(), ts, EventKind::Arrival)
        .expect("append");

    let events = store.read_day(date());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].card_id, card_a());
    assert_eq!(events[0].timestamp, ts);
    assert!(events[0].kind.is_arrival());

    // The on-disk row uses the full timestamp form and the fixed label.
    let content = fs::read_to_string(share.join(DAY_FILE)).expect("day file");
    assert!(content.contains("aaaa0000000001,2025-09-01 08:00:00,Prihod na delo"));
}

#[test]
fn test_missing_file_reads_as_empty_day() {
    let (share, backup) = setup_dirs("missing");
    let store = store_at(&share, &backup);

    assert!(store.read_day(date()).is_empty());
    assert!(
        store
            .read_range(date(), date().succ_opt().expect("date"))
            .is_empty()
    );
}

#[test]
fn test_malformed_rows_are_skipped() {
    let (share, backup) = setup_dirs("malformed");
    fs::write(
        share.join(DAY_FILE),
        "aaaa0000000001,2025-09-01 08:00:00,Prihod na delo\n\
         not-a-card,2025-09-01 09:00:00,Prihod na delo\n\
         aaaa0000000001,whenever,Prihod na delo\n\
         aaaa0000000001,2025-09-01 10:00:00,Unknown label\n\
         aaaa0000000001,2025-09-01 16:00:00,Izhod iz dela\n",
    )
    .expect("write day file");

    let store = store_at(&share, &backup);
    let events = store.read_day(date());

    assert_eq!(events.len(), 2);
    assert!(events[0].kind.is_arrival());
    assert!(events[1].kind.is_departure());
}

#[test]
fn test_bare_time_rows_combine_with_file_date() {
    let (share, backup) = setup_dirs("bare_time");
    fs::write(
        share.join(DAY_FILE),
        "aaaa0000000001,07:12:30,Prihod na delo\n",
    )
    .expect("write day file");

    let store = store_at(&share, &backup);
    let events = store.read_day(date());

    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].timestamp,
        date().and_hms_opt(7, 12, 30).expect("time")
    );
}

#[test]
fn test_delete_matches_rows_written_as_bare_time() {
    let (share, backup) = setup_dirs("delete_bare");
    fs::write(
        share.join(DAY_FILE),
        "aaaa0000000001,07:12:30,Prihod na delo\n\
         bbbb0000000002,07:15:00,Prihod na delo\n",
    )
    .expect("write day file");

    let store = store_at(&share, &backup);
    let removed = store
        .delete_event(
            &card_a(),
            date().and_hms_opt(7, 12, 30).expect("time"),
            EventKind::Arrival,
        )
        .expect("delete");

    assert_eq!(removed, 1);
    let events = store.read_day(date());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].card_id, card_b());
}

#[test]
fn test_deleting_last_event_removes_the_file() {
    let (share, backup) = setup_dirs("delete_last");
    let store = store_at(&share, &backup);

    let ts = date().and_hms_opt(8, 0, 0).expect("time");
    store
        .append_event(&card_a(), ts, EventKind::Arrival)
        .expect("append");
    assert!(share.join(DAY_FILE).exists());

    let removed = store
        .delete_event(&card_a(), ts, EventKind::Arrival)
        .expect("delete");

    assert_eq!(removed, 1);
    // Absence, not an empty file.
    assert!(!share.join(DAY_FILE).exists());
}

#[test]
fn test_deleting_nonexistent_event_is_a_noop() {
    let (share, backup) = setup_dirs("delete_noop");
    let store = store_at(&share, &backup);

    let ts = date().and_hms_opt(8, 0, 0).expect("time");
    store
        .append_event(&card_a(), ts, EventKind::Arrival)
        .expect("append");
    let before = fs::read_to_string(share.join(DAY_FILE)).expect("day file");

    let removed = store
        .delete_event(
            &card_a(),
            date().and_hms_opt(9, 0, 0).expect("time"),
            EventKind::Arrival,
        )
        .expect("delete");

    assert_eq!(removed, 0);
    let after = fs::read_to_string(share.join(DAY_FILE)).expect("day file");
    assert_eq!(before, after);
}

#[test]
fn test_delete_all_for_card_counts_and_compacts() {
    let (share, backup) = setup_dirs("delete_all");
    let store = store_at(&share, &backup);

    let d1 = date();
    let d2 = d1.succ_opt().expect("date");

    for (d, h) in [(d1, 8), (d1, 16), (d2, 8)] {
        store
            .append_event(
                &card_a(),
                d.and_hms_opt(h, 0, 0).expect("time"),
                if h == 8 {
                    EventKind::Arrival
                } else {
                    EventKind::Departure
                },
            )
            .expect("append");
    }
    store
        .append_event(
            &card_b(),
            d1.and_hms_opt(9, 0, 0).expect("time"),
            EventKind::Arrival,
        )
        .expect("append");

    let removed = store
        .delete_all_for_card(&card_a(), d1, d2)
        .expect("delete all");
    assert_eq!(removed, 3);

    // Day 1 keeps the other card's record; day 2 had only card A, so the
    // file is gone.
    let day1 = store.read_day(d1);
    assert_eq!(day1.len(), 1);
    assert_eq!(day1[0].card_id, card_b());
    assert!(!share.join("time_records_20250902.csv").exists());
}

#[test]
fn test_replace_card_id_rewrites_only_matching_files() {
    let (share, backup) = setup_dirs("replace_card");
    fs::write(
        share.join(DAY_FILE),
        "aaaa0000000001,2025-09-01 08:00:00,Prihod na delo\n",
    )
    .expect("day file 1");
    fs::write(
        share.join("time_records_20250902.csv"),
        "bbbb0000000002,2025-09-02 08:00:00,Prihod na delo\n",
    )
    .expect("day file 2");
    // Not a day-file; must be left alone even though it mentions the card.
    fs::write(share.join("worker_id.csv"), "Ana;aaaa0000000001")
        .expect("roster file");

    let store = store_at(&share, &backup);
    let new_card = CardId::parse("cccc0000000003").expect("card");
    let updated = store
        .replace_card_id(&card_a(), &new_card)
        .expect("replace");

    assert_eq!(updated, 1);
    let content = fs::read_to_string(share.join(DAY_FILE)).expect("day file");
    assert!(content.contains("cccc0000000003"));
    assert!(!content.contains("aaaa0000000001"));

    let untouched = fs::read_to_string(share.join("worker_id.csv")).expect("roster");
    assert!(untouched.contains("aaaa0000000001"));
}

// ------------------------------------------------
// Write-strategy fallbacks, driven by purpose-built
// share clients.
// ------------------------------------------------

type Files = Arc<Mutex<HashMap<String, Vec<u8>>>>;

fn get(files: &Files, name: &str) -> Result<Vec<u8>, ShareError> {
    files
        .lock()
        .expect("lock")
        .get(name)
        .cloned()
        .ok_or(ShareError::NotFound)
}

/// Rejects overwrites of existing files; create-after-delete succeeds.
/// Exercises strategy 2 (delete first, then store).
struct NoOverwriteShare {
    files: Files,
}

impl ShareClient for NoOverwriteShare {
    fn retrieve(&self, name: &str) -> Result<Vec<u8>, ShareError> {
        get(&self.files, name)
    }

    fn store(&self, name: &str, data: &[u8]) -> Result<(), ShareError> {
        let mut files = self.files.lock().expect("lock");
        if files.contains_key(name) {
            return Err(ShareError::Denied("overwrite rejected".into()));
        }
        files.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), ShareError> {
        self.files
            .lock()
            .expect("lock")
            .remove(name)
            .map(|_| ())
            .ok_or(ShareError::NotFound)
    }

    fn list(&self) -> Result<Vec<String>, ShareError> {
        Ok(self.files.lock().expect("lock").keys().cloned().collect())
    }
}

/// Accepts only `temp_`-prefixed names and rejects deletes, so the
/// copy-back step fails and the temp file survives as the accepted
/// fallback (strategy 3).
struct TempOnlyShare {
    files: Files,
}

impl ShareClient for TempOnlyShare {
    fn retrieve(&self, name: &str) -> Result<Vec<u8>, ShareError> {
        get(&self.files, name)
    }

    fn store(&self, name: &str, data: &[u8]) -> Result<(), ShareError> {
        if !name.starts_with("temp_") {
            return Err(ShareError::Denied("write rejected".into()));
        }
        self.files
            .lock()
            .expect("lock")
            .insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn delete(&self, _name: &str) -> Result<(), ShareError> {
        Err(ShareError::Denied("delete rejected".into()))
    }

    fn list(&self) -> Result<Vec<String>, ShareError> {
        Ok(self.files.lock().expect("lock").keys().cloned().collect())
    }
}

/// Rejects every write and delete. All three strategies fail and the
/// rewrite must land in the local backup directory.
struct ReadOnlyShare {
    files: Files,
}

impl ShareClient for ReadOnlyShare {
    fn retrieve(&self, name: &str) -> Result<Vec<u8>, ShareError> {
        get(&self.files, name)
    }

    fn store(&self, _name: &str, _data: &[u8]) -> Result<(), ShareError> {
        Err(ShareError::Denied("read-only share".into()))
    }

    fn delete(&self, _name: &str) -> Result<(), ShareError> {
        Err(ShareError::Denied("read-only share".into()))
    }

    fn list(&self) -> Result<Vec<String>, ShareError> {
        Ok(self.files.lock().expect("lock").keys().cloned().collect())
    }
}

#[test]
fn test_write_falls_back_to_delete_then_create() {
    let files: Files = Arc::new(Mutex::new(HashMap::new()));
    files.lock().expect("lock").insert(
        DAY_FILE.to_string(),
        b"aaaa0000000001,2025-09-01 08:00:00,Prihod na delo\n".to_vec(),
    );

    let (_, backup) = setup_dirs("strategy2");
    let store = EventStore::new(
        Arc::new(NoOverwriteShare {
            files: Arc::clone(&files),
        }),
        backup,
    );

    store
        .append_event(
            &card_a(),
            date().and_hms_opt(16, 0, 0).expect("time"),
            EventKind::Departure,
        )
        .expect("append via delete-first strategy");

    let content = get(&files, DAY_FILE).expect("day file");
    let text = String::from_utf8(content).expect("utf8");
    assert!(text.contains("08:00:00"));
    assert!(text.contains("16:00:00"));
}

#[test]
fn test_write_accepts_surviving_temp_file() {
    let files: Files = Arc::new(Mutex::new(HashMap::new()));

    let (_, backup) = setup_dirs("strategy3");
    let store = EventStore::new(
        Arc::new(TempOnlyShare {
            files: Arc::clone(&files),
        }),
        backup,
    );

    store
        .append_event(
            &card_a(),
            date().and_hms_opt(8, 0, 0).expect("time"),
            EventKind::Arrival,
        )
        .expect("append via temp-file strategy");

    let temp_name = format!("temp_{DAY_FILE}");
    let content = get(&files, &temp_name).expect("temp file kept");
    assert!(String::from_utf8(content).expect("utf8").contains("08:00:00"));
}

#[test]
fn test_all_strategies_failing_backs_up_locally() {
    let files: Files = Arc::new(Mutex::new(HashMap::new()));

    let (_, backup) = setup_dirs("backup");
    let store = EventStore::new(
        Arc::new(ReadOnlyShare {
            files: Arc::clone(&files),
        }),
        backup.clone(),
    );

    let err = store
        .append_event(
            &card_a(),
            date().and_hms_opt(8, 0, 0).expect("time"),
            EventKind::Arrival,
        )
        .expect_err("write must fail");

    let backup_file = backup.join(format!("backup_{DAY_FILE}"));
    assert!(backup_file.exists(), "backup file must exist");

    let message = err.to_string();
    assert!(message.contains("preserved locally"));
    assert!(message.contains("backup_time_records_20250901.csv"));

    let content = fs::read_to_string(backup_file).expect("backup content");
    assert!(content.contains("aaaa0000000001"));
}
