use crate::cache::CacheDb;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages;

pub fn handle(cli: &Cli) -> AppResult<()> {
    if let Commands::Init {
        share,
        db,
        backup,
        address,
        share_name,
        username,
        password,
        poll_interval,
    } = &cli.command
    {
        let mut cfg = Config::default();
        cfg.share_path = share.clone();

        if let Some(db) = db {
            cfg.database = db.clone();
        }
        if let Some(backup) = backup {
            cfg.backup_dir = backup.clone();
        }
        if let Some(address) = address {
            cfg.remote_address = address.clone();
        }
        if let Some(name) = share_name {
            cfg.share_name = name.clone();
        }
        if let Some(username) = username {
            cfg.username = username.clone();
        }
        if let Some(password) = password {
            cfg.password = password.clone();
        }
        if let Some(secs) = poll_interval {
            cfg.poll_interval_secs = *secs;
        }

        let path = cfg.save(cli.config.as_deref())?;
        messages::success(format!("Config file: {}", path.display()));

        // Create the cache database with its schema.
        CacheDb::open(&cfg.database)?;
        messages::success(format!("Cache database: {}", cfg.database));
    }
    Ok(())
}
