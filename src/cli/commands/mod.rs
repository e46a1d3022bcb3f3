pub mod calc;
pub mod config;
pub mod employee;
pub mod group;
pub mod init;
pub mod log;
pub mod record;
pub mod special;
pub mod sync;

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::CacheDb;
use crate::cache::log::oplog;
use crate::config::Config;
use crate::dataset::SyncedDataset;
use crate::errors::{AppError, AppResult};
use crate::store::{DirShare, EventStore, ShareClient};
use crate::sync::Synchronizer;
use crate::ui::messages;

/// Everything a command handler needs: config, local cache, share client,
/// the loaded dataset and its synchronizer.
pub struct AdminCtx {
    pub cfg: Config,
    pub cache: CacheDb,
    pub share: Arc<dyn ShareClient>,
    pub dataset: SyncedDataset,
    pub sync: Synchronizer,
}

impl AdminCtx {
    /// Open the cache, load the dataset and seed the synchronizer. Also
    /// performs a best-effort refresh from the share: if the remote cannot
    /// be read we keep working from the cache (new records can still be
    /// added while current data is invisible).
    pub fn open(cfg: &Config) -> AppResult<Self> {
        cfg.check()?;

        let cache = CacheDb::open(&cfg.database)?;
        let dataset = cache.load_dataset()?;
        let share: Arc<dyn ShareClient> = Arc::new(DirShare::new(&cfg.share_path));
        let sync = Synchronizer::new(Arc::clone(&share));
        sync.set_last_known_version(dataset.version());

        let mut ctx = Self {
            cfg: cfg.clone(),
            cache,
            share,
            dataset,
            sync,
        };

        match ctx.sync.refresh(&mut ctx.dataset) {
            Ok(Some(version)) => {
                ctx.cache.replace_dataset(&ctx.dataset)?;
                messages::info(format!("Dataset updated to version {version}"));
            }
            Ok(None) => {}
            Err(e) => {
                messages::warning(format!("Could not refresh from the share: {e}"));
            }
        }

        Ok(ctx)
    }

    pub fn event_store(&self) -> EventStore {
        EventStore::new(Arc::clone(&self.share), PathBuf::from(&self.cfg.backup_dir))
    }

    /// Persist a local mutation: mirror to the cache, log it, publish to
    /// the share. A failed publish keeps the local state (it is ahead of
    /// remote until the next successful publish or poll) and surfaces the
    /// failure to the operator.
    pub fn commit(&mut self, operation: &str, target: &str) -> AppResult<u64> {
        self.cache.replace_dataset(&self.dataset)?;
        oplog(&self.cache.conn, operation, target, "applied locally")?;

        match self.sync.publish(&mut self.dataset) {
            Ok(version) => {
                // Mirror again so the cache carries the published version.
                self.cache.replace_dataset(&self.dataset)?;
                Ok(version)
            }
            Err(e) => {
                messages::warning(
                    "Publish failed; the change is saved locally and will be ahead of the share",
                );
                Err(e)
            }
        }
    }

    /// Resolve a group CLI argument (by name) to its id.
    pub fn resolve_group(&self, name: &str) -> AppResult<i64> {
        self.dataset
            .group_by_name(name)
            .map(|g| g.id)
            .ok_or_else(|| AppError::Validation(format!("No group named '{name}'")))
    }
}
