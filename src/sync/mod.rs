//! Versioned snapshot-and-poll synchronization between instances.
//!
//! Each instance keeps the last remote version it has seen. A poll reads
//! the cheap version artifact first and fetches the full snapshot only
//! when the remote is ahead; the snapshot then crosses back to the
//! foreground over a channel and is applied wholesale there. Publishing
//! writes the full snapshot followed by the version artifact, with a
//! bounded retry. Concurrent publishers race: the later write wins in its
//! entirety, which is the accepted policy of this protocol.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::dataset::SyncedDataset;
use crate::dataset::snapshot::{SNAPSHOT_FILE, Snapshot, VERSION_FILE, parse_version};
use crate::errors::{AppError, AppResult};
use crate::store::{ShareClient, ShareError};
use crate::ui::messages;

pub const PUBLISH_ATTEMPTS: u32 = 3;
pub const PUBLISH_RETRY_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// How long shutdown waits for an in-flight poll before detaching it.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);
const TICK: Duration = Duration::from_millis(50);

/// What a background poll reports back to the foreground.
#[derive(Debug)]
pub enum SyncMessage {
    /// The remote is ahead; here is its snapshot. The foreground decides
    /// to apply it — the poll thread never touches the dataset.
    SnapshotFetched(Snapshot),
    UpToDate(u64),
    PollFailed(String),
}

struct Shared {
    share: Arc<dyn ShareClient>,
    last_known_version: AtomicU64,
    poll_in_flight: AtomicBool,
}

pub struct Synchronizer {
    shared: Arc<Shared>,
    tx: Sender<SyncMessage>,
    rx: Receiver<SyncMessage>,
    poll_handle: Option<JoinHandle<()>>,
    ticker_stop: Option<Arc<AtomicBool>>,
    ticker_handle: Option<JoinHandle<()>>,
}

impl Synchronizer {
    pub fn new(share: Arc<dyn ShareClient>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            shared: Arc::new(Shared {
                share,
                last_known_version: AtomicU64::new(0),
                poll_in_flight: AtomicBool::new(false),
            }),
            tx,
            rx,
            poll_handle: None,
            ticker_stop: None,
            ticker_handle: None,
        }
    }

    pub fn last_known_version(&self) -> u64 {
        self.shared.last_known_version.load(Ordering::SeqCst)
    }

    /// Seed the version bookkeeping from locally cached state, typically
    /// right after loading the cache at startup.
    pub fn set_last_known_version(&self, version: u64) {
        self.shared.last_known_version.store(version, Ordering::SeqCst);
    }

    // ------------------------------------------------
    // Remote reads
    // ------------------------------------------------

    /// Current remote version. An absent or unreadable artifact reads as
    /// version 1 so a fresh share triggers one full fetch attempt.
    pub fn remote_version(&self) -> u64 {
        match self.shared.share.retrieve(VERSION_FILE) {
            Ok(data) => parse_version(&data),
            Err(_) => 1,
        }
    }

    /// Full snapshot from the share; `None` when no snapshot has ever
    /// been published there.
    pub fn fetch_snapshot(&self) -> AppResult<Option<Snapshot>> {
        match self.shared.share.retrieve(SNAPSHOT_FILE) {
            Ok(data) => Ok(Some(Snapshot::decode(&data)?)),
            Err(ShareError::NotFound) => Ok(None),
            Err(e) => Err(AppError::ConnectionUnavailable(format!(
                "{SNAPSHOT_FILE}: {e}"
            ))),
        }
    }

    // ------------------------------------------------
    // Foreground operations
    // ------------------------------------------------

    /// Synchronous, user-initiated refresh. Follows the same protocol as a
    /// background poll: version check first, full fetch only when the
    /// remote is ahead. Returns the applied version, if any.
    pub fn refresh(&self, dataset: &mut SyncedDataset) -> AppResult<Option<u64>> {
        let remote = self.remote_version();
        if remote <= self.last_known_version() {
            return Ok(None);
        }

        match self.fetch_snapshot()? {
            Some(snapshot) => Ok(Some(self.apply(dataset, snapshot))),
            // Nothing published yet; keep working from local data.
            None => Ok(None),
        }
    }

    /// Wholesale replacement of the local dataset; no field-level merging.
    pub fn apply(&self, dataset: &mut SyncedDataset, snapshot: Snapshot) -> u64 {
        let version = snapshot.version;
        *dataset = SyncedDataset::from_snapshot(snapshot);
        self.shared.last_known_version.store(version, Ordering::SeqCst);
        version
    }

    /// Serialize the dataset as `last known remote version + 1` and write
    /// snapshot plus version artifact, with a bounded retry. Exhausting
    /// the retries fails the call but leaves the local mutation in place:
    /// local state stays ahead of remote until a later publish or poll.
    pub fn publish(&self, dataset: &mut SyncedDataset) -> AppResult<u64> {
        let version = self.last_known_version() + 1;
        let payload = dataset.to_snapshot(version).encode()?;

        let mut last_err = String::new();
        for attempt in 1..=PUBLISH_ATTEMPTS {
            match self.store_snapshot(&payload, version) {
                Ok(()) => {
                    self.shared.last_known_version.store(version, Ordering::SeqCst);
                    dataset.set_version(version);
                    return Ok(version);
                }
                Err(e) => {
                    last_err = e.to_string();
                    if attempt < PUBLISH_ATTEMPTS {
                        thread::sleep(PUBLISH_RETRY_DELAY);
                    }
                }
            }
        }

        Err(AppError::SyncFailure(format!(
            "publish of version {version} failed after {PUBLISH_ATTEMPTS} attempts: {last_err}"
        )))
    }

    fn store_snapshot(&self, payload: &[u8], version: u64) -> Result<(), ShareError> {
        self.shared.share.store(SNAPSHOT_FILE, payload)?;
        self.shared
            .share
            .store(VERSION_FILE, version.to_string().as_bytes())
    }

    // ------------------------------------------------
    // Background polling
    // ------------------------------------------------

    /// Start one background poll. Refused (returns false, logs a skip)
    /// when a poll is already in flight — at most one per process.
    pub fn poll(&mut self) -> bool {
        if !self.acquire_poll_slot() {
            return false;
        }

        let shared = Arc::clone(&self.shared);
        let tx = self.tx.clone();
        self.poll_handle = Some(thread::spawn(move || {
            poll_once(&shared, &tx);
        }));
        true
    }

    /// Non-blocking read of the next background-poll result.
    pub fn try_message(&self) -> Option<SyncMessage> {
        self.rx.try_recv().ok()
    }

    /// Blocking read with a deadline, for callers that just started a poll.
    pub fn wait_message(&self, timeout: Duration) -> Option<SyncMessage> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Foreground half of a completed poll: applies a fetched snapshot if
    /// it is still newer than what we know. Returns the applied version.
    pub fn handle_message(
        &self,
        dataset: &mut SyncedDataset,
        message: SyncMessage,
    ) -> Option<u64> {
        match message {
            SyncMessage::SnapshotFetched(snapshot) => {
                if snapshot.version > self.last_known_version() {
                    Some(self.apply(dataset, snapshot))
                } else {
                    None
                }
            }
            SyncMessage::UpToDate(_) => None,
            SyncMessage::PollFailed(err) => {
                messages::warning(format!("Background poll failed: {err}"));
                None
            }
        }
    }

    /// Start the periodic poll scheduler. The ticker thread performs the
    /// poll inline and honors the same single-poll guard as `poll()`.
    pub fn start_periodic(&mut self, interval: Duration) {
        if self.ticker_handle.is_some() {
            return;
        }

        let stop = Arc::new(AtomicBool::new(false));
        let shared = Arc::clone(&self.shared);
        let tx = self.tx.clone();
        let stop_flag = Arc::clone(&stop);

        self.ticker_handle = Some(thread::spawn(move || {
            loop {
                let deadline = Instant::now() + interval;
                while Instant::now() < deadline {
                    if stop_flag.load(Ordering::SeqCst) {
                        return;
                    }
                    thread::sleep(TICK);
                }

                if stop_flag.load(Ordering::SeqCst) {
                    return;
                }

                if shared
                    .poll_in_flight
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
                {
                    poll_once(&shared, &tx);
                } else {
                    messages::info("Poll already in progress, skipping this tick");
                }
            }
        }));
        self.ticker_stop = Some(stop);
    }

    /// Stop the scheduler first, then give any in-flight poll a bounded
    /// window to finish before detaching it. The notification channel
    /// outlives both, so no poll ever reports into a torn-down receiver.
    pub fn shutdown(&mut self) {
        if let Some(stop) = self.ticker_stop.take() {
            stop.store(true, Ordering::SeqCst);
        }
        if let Some(handle) = self.ticker_handle.take() {
            join_with_grace(handle);
        }
        if let Some(handle) = self.poll_handle.take() {
            join_with_grace(handle);
        }
    }

    fn acquire_poll_slot(&self) -> bool {
        let acquired = self
            .shared
            .poll_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if !acquired {
            messages::info("Poll already in progress, skipping");
        }
        acquired
    }
}

impl Drop for Synchronizer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Blocking poll body, shared by one-shot polls and the ticker. Releases
/// the in-flight guard when done.
fn poll_once(shared: &Shared, tx: &Sender<SyncMessage>) {
    let remote = match shared.share.retrieve(VERSION_FILE) {
        Ok(data) => parse_version(&data),
        Err(_) => 1,
    };

    let message = if remote > shared.last_known_version.load(Ordering::SeqCst) {
        match shared.share.retrieve(SNAPSHOT_FILE) {
            Ok(data) => match Snapshot::decode(&data) {
                Ok(snapshot) => SyncMessage::SnapshotFetched(snapshot),
                Err(e) => SyncMessage::PollFailed(e.to_string()),
            },
            Err(e) => SyncMessage::PollFailed(format!("{SNAPSHOT_FILE}: {e}")),
        }
    } else {
        SyncMessage::UpToDate(remote)
    };

    // Release the slot before reporting, so a caller reacting to the
    // message can immediately start the next poll.
    shared.poll_in_flight.store(false, Ordering::SeqCst);
    // The receiver may already be gone during shutdown.
    let _ = tx.send(message);
}

fn join_with_grace(handle: JoinHandle<()>) {
    let deadline = Instant::now() + SHUTDOWN_GRACE;
    while Instant::now() < deadline {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(TICK);
    }
    // Still blocked on share I/O; detach rather than hang shutdown.
    drop(handle);
}
