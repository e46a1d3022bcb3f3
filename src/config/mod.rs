use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};

/// Connection and storage settings. The share is reached through a mounted
/// path; the address/share/credential fields describe the mount for the
/// operator and for external tooling, they are not used to authenticate
/// from this process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory where the share is mounted (day-files, snapshot, roster).
    pub share_path: String,
    #[serde(default)]
    pub remote_address: String,
    #[serde(default)]
    pub share_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Local SQLite mirror of the administrative dataset.
    pub database: String,
    /// Directory for emergency backups of rejected day-file writes.
    pub backup_dir: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        let dir = Self::config_dir();
        Self {
            share_path: String::new(),
            remote_address: String::new(),
            share_name: String::new(),
            username: String::new(),
            password: String::new(),
            database: dir.join("timeclock-admin.sqlite").to_string_lossy().to_string(),
            backup_dir: dir.join("backups").to_string_lossy().to_string(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("timeclock-admin")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".timeclock-admin")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timeclock-admin.conf")
    }

    /// Load configuration from the given file, or the standard location.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)
    }

    /// Write the configuration to the given file (or the standard location)
    /// and make sure the backup directory exists.
    pub fn save(&self, path: Option<&str>) -> AppResult<PathBuf> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_file);

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::create_dir_all(&self.backup_dir)?;

        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(&path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;

        Ok(path)
    }

    /// Basic sanity check on the loaded settings.
    pub fn check(&self) -> AppResult<()> {
        if self.share_path.trim().is_empty() {
            return Err(AppError::Config(
                "share_path is not set; run `init --share <dir>` first".to_string(),
            ));
        }
        if !Path::new(&self.share_path).is_dir() {
            return Err(AppError::Config(format!(
                "share_path '{}' is not an accessible directory",
                self.share_path
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(AppError::Config(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
