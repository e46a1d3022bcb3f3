//! Library-level tests of the snapshot-and-poll synchronizer: publish,
//! background polls, the single-poll guard, retry exhaustion and the
//! documented last-writer-wins race.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use timeclock_admin::dataset::SyncedDataset;
use timeclock_admin::dataset::snapshot::{SNAPSHOT_FILE, VERSION_FILE};
use timeclock_admin::errors::AppError;
use timeclock_admin::models::{CardId, DailyHours};
use timeclock_admin::store::{DirShare, ShareClient, ShareError};
use timeclock_admin::sync::{SyncMessage, Synchronizer};

fn setup_share(name: &str) -> PathBuf {
    let mut share: PathBuf = env::temp_dir();
    share.push(format!("{}_timeclock_sync", name));
    let _ = fs::remove_dir_all(&share);
    fs::create_dir_all(&share).expect("share dir");
    share
}

fn sync_at(share: &PathBuf) -> Synchronizer {
    Synchronizer::new(Arc::new(DirShare::new(share)))
}

fn card(raw: &str) -> CardId {
    CardId::parse(raw).expect("valid card")
}

fn dataset_with(name: &str, raw_card: &str) -> SyncedDataset {
    let mut ds = SyncedDataset::new();
    ds.add_employee(name, card(raw_card), DailyHours::Fixed(8.0), None)
        .expect("employee");
    ds
}

#[test]
fn test_publish_writes_snapshot_and_version_artifact() {
    let share = setup_share("publish");
    let sync = sync_at(&share);
    let mut ds = dataset_with("Ana", "aaaa0000000001");

    let version = sync.publish(&mut ds).expect("publish");

    assert_eq!(version, 1);
    assert_eq!(ds.version(), 1);
    assert!(share.join(SNAPSHOT_FILE).exists());
    let marker = fs::read_to_string(share.join(VERSION_FILE)).expect("version file");
    assert_eq!(marker.trim(), "1");
}

#[test]
fn test_poll_fetches_and_foreground_applies_newer_snapshot() {
    let share = setup_share("poll_apply");

    // Instance A publishes.
    let sync_a = sync_at(&share);
    let mut ds_a = dataset_with("Ana", "aaaa0000000001");
    sync_a.publish(&mut ds_a).expect("publish");

    // Instance B polls in the background and applies on the foreground.
    let mut sync_b = sync_at(&share);
    let mut ds_b = SyncedDataset::new();

    assert!(sync_b.poll());
    let message = sync_b
        .wait_message(Duration::from_secs(5))
        .expect("poll result");

    let applied = sync_b.handle_message(&mut ds_b, message);
    assert_eq!(applied, Some(1));
    assert_eq!(ds_b.version(), 1);
    assert_eq!(ds_b.employees().len(), 1);
    assert_eq!(ds_b.employees()[0].name, "Ana");
    assert_eq!(sync_b.last_known_version(), 1);
}

#[test]
fn test_poll_reports_up_to_date_when_remote_is_not_newer() {
    let share = setup_share("poll_uptodate");

    let sync_a = sync_at(&share);
    let mut ds_a = dataset_with("Ana", "aaaa0000000001");
    sync_a.publish(&mut ds_a).expect("publish");

    let mut sync_b = sync_at(&share);
    sync_b.set_last_known_version(1);

    assert!(sync_b.poll());
    match sync_b.wait_message(Duration::from_secs(5)) {
        Some(SyncMessage::UpToDate(1)) => {}
        other => panic!("expected UpToDate(1), got {:?}", other),
    }
}

#[test]
fn test_last_writer_wins_without_merge() {
    let share = setup_share("last_writer");

    // A publishes version 1 with one employee.
    let sync_a = sync_at(&share);
    let mut ds_a = dataset_with("Ana", "aaaa0000000001");
    sync_a.publish(&mut ds_a).expect("publish v1");

    // B starts from version 1 and publishes version 2 with its own edit.
    let sync_b = sync_at(&share);
    let mut ds_b = SyncedDataset::new();
    sync_b.refresh(&mut ds_b).expect("refresh");
    ds_b.add_employee("Bor", card("bbbb0000000002"), DailyHours::Fixed(8.0), None)
        .expect("employee");
    sync_b.publish(&mut ds_b).expect("publish v2 from B");

    // A, unaware of B's publish, also publishes version 2. The later
    // write wins wholesale; B's edit is gone.
    ds_a.add_employee("Cilka", card("cccc0000000003"), DailyHours::Fixed(8.0), None)
        .expect("employee");
    sync_a.publish(&mut ds_a).expect("publish v2 from A");

    let sync_c = sync_at(&share);
    let mut ds_c = SyncedDataset::new();
    let applied = sync_c.refresh(&mut ds_c).expect("refresh");

    assert_eq!(applied, Some(2));
    let names: Vec<&str> = ds_c.employees().iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"Ana"));
    assert!(names.contains(&"Cilka"));
    assert!(!names.contains(&"Bor"), "no merge of the losing edit set");
}

#[test]
fn test_refresh_on_empty_share_keeps_local_data() {
    let share = setup_share("refresh_empty");
    let sync = sync_at(&share);
    let mut ds = dataset_with("Ana", "aaaa0000000001");

    let applied = sync.refresh(&mut ds).expect("refresh");

    assert_eq!(applied, None);
    assert_eq!(ds.employees().len(), 1);
}

/// Share that always refuses writes.
struct DownShare;

impl ShareClient for DownShare {
    fn retrieve(&self, _name: &str) -> Result<Vec<u8>, ShareError> {
        Err(ShareError::Unavailable("down".into()))
    }

    fn store(&self, _name: &str, _data: &[u8]) -> Result<(), ShareError> {
        Err(ShareError::Unavailable("down".into()))
    }

    fn delete(&self, _name: &str) -> Result<(), ShareError> {
        Err(ShareError::Unavailable("down".into()))
    }

    fn list(&self) -> Result<Vec<String>, ShareError> {
        Err(ShareError::Unavailable("down".into()))
    }
}

#[test]
fn test_publish_exhausts_retries_and_keeps_local_state() {
    let sync = Synchronizer::new(Arc::new(DownShare));
    let mut ds = dataset_with("Ana", "aaaa0000000001");

    let err = sync.publish(&mut ds).expect_err("publish must fail");

    assert!(matches!(err, AppError::SyncFailure(_)));
    // The local mutation is not rolled back; the version was never bumped.
    assert_eq!(ds.employees().len(), 1);
    assert_eq!(ds.version(), 0);
    assert_eq!(sync.last_known_version(), 0);
}

/// Share whose reads block long enough to hold a poll in flight.
struct SlowShare {
    delay: Duration,
}

impl ShareClient for SlowShare {
    fn retrieve(&self, _name: &str) -> Result<Vec<u8>, ShareError> {
        thread::sleep(self.delay);
        Err(ShareError::NotFound)
    }

    fn store(&self, _name: &str, _data: &[u8]) -> Result<(), ShareError> {
        Ok(())
    }

    fn delete(&self, _name: &str) -> Result<(), ShareError> {
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, ShareError> {
        Ok(Vec::new())
    }
}

#[test]
fn test_at_most_one_poll_in_flight() {
    let mut sync = Synchronizer::new(Arc::new(SlowShare {
        delay: Duration::from_millis(500),
    }));

    assert!(sync.poll(), "first poll starts");
    assert!(!sync.poll(), "second poll is refused while one is in flight");

    // Once the first poll finishes, polling is possible again.
    assert!(sync.wait_message(Duration::from_secs(5)).is_some());
    assert!(sync.poll());
    sync.shutdown();
}

#[test]
fn test_periodic_poller_delivers_updates_and_shuts_down() {
    let share = setup_share("periodic");

    let sync_a = sync_at(&share);
    let mut ds_a = dataset_with("Ana", "aaaa0000000001");
    sync_a.publish(&mut ds_a).expect("publish");

    let mut sync_b = sync_at(&share);
    let mut ds_b = SyncedDataset::new();
    sync_b.start_periodic(Duration::from_millis(100));

    let mut applied = None;
    for _ in 0..50 {
        if let Some(message) = sync_b.wait_message(Duration::from_millis(200)) {
            applied = sync_b.handle_message(&mut ds_b, message);
            if applied.is_some() {
                break;
            }
        }
    }

    assert_eq!(applied, Some(1));
    assert_eq!(ds_b.employees().len(), 1);

    // Shutdown stops the scheduler before the channel goes away.
    sync_b.shutdown();
}
