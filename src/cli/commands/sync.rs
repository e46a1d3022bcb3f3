use std::time::Duration;

use crate::cli::commands::AdminCtx;
use crate::cli::parser::SyncCmd;
use crate::config::Config;
use crate::errors::AppResult;
use crate::sync::SyncMessage;
use crate::ui::messages;

pub fn handle(cmd: &SyncCmd, cfg: &Config) -> AppResult<()> {
    match cmd {
        SyncCmd::Refresh => {
            // AdminCtx::open already refreshed best-effort; do it strictly
            // here so failures are visible.
            let mut ctx = AdminCtx::open(cfg)?;
            match ctx.sync.refresh(&mut ctx.dataset)? {
                Some(version) => {
                    ctx.cache.replace_dataset(&ctx.dataset)?;
                    messages::success(format!("Dataset refreshed to version {version}"));
                }
                None => messages::info(format!(
                    "Already up to date (version {})",
                    ctx.sync.last_known_version()
                )),
            }
            Ok(())
        }

        SyncCmd::Publish => {
            let mut ctx = AdminCtx::open(cfg)?;
            let version = ctx.sync.publish(&mut ctx.dataset)?;
            ctx.cache.replace_dataset(&ctx.dataset)?;
            messages::success(format!("Published dataset version {version}"));
            Ok(())
        }

        SyncCmd::Status => {
            let ctx = AdminCtx::open(cfg)?;
            println!("local version:  {}", ctx.dataset.version());
            println!("remote version: {}", ctx.sync.remote_version());
            Ok(())
        }

        SyncCmd::Watch { interval, count } => {
            let mut ctx = AdminCtx::open(cfg)?;
            let interval =
                Duration::from_secs(interval.unwrap_or(ctx.cfg.poll_interval_secs).max(1));

            messages::info(format!(
                "Watching for updates every {}s (Ctrl-C to stop)",
                interval.as_secs()
            ));
            ctx.sync.start_periodic(interval);

            let mut polls_seen = 0u32;
            loop {
                if let Some(message) = ctx.sync.wait_message(interval * 2) {
                    match message {
                        SyncMessage::SnapshotFetched(snapshot) => {
                            let version = snapshot.version;
                            let applied = ctx.sync.handle_message(
                                &mut ctx.dataset,
                                SyncMessage::SnapshotFetched(snapshot),
                            );
                            if applied.is_some() {
                                ctx.cache.replace_dataset(&ctx.dataset)?;
                                messages::success(format!(
                                    "Dataset updated to version {version}"
                                ));
                            }
                        }
                        SyncMessage::UpToDate(version) => {
                            messages::info(format!("Up to date (remote version {version})"));
                        }
                        SyncMessage::PollFailed(err) => {
                            messages::warning(format!("Poll failed: {err}"));
                        }
                    }
                    polls_seen += 1;
                }

                if let Some(limit) = count
                    && polls_seen >= *limit
                {
                    break;
                }
            }

            ctx.sync.shutdown();
            Ok(())
        }
    }
}
