//! Unified application error type.
//! All modules (store, calc, dataset, sync, cache, cli) return AppError to
//! keep the error handling consistent and easy to manage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Local cache database
    // ---------------------------
    #[error("Cache database error: {0}")]
    Cache(#[from] rusqlite::Error),

    // ---------------------------
    // Remote share
    // ---------------------------
    #[error("Remote share unavailable: {0}")]
    ConnectionUnavailable(String),

    #[error("Write to '{file}' denied by the share; data preserved locally at {backup}")]
    PermissionDenied { file: String, backup: PathBuf },

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid card id: {0} (expected 14 hexadecimal digits)")]
    InvalidCardId(String),

    #[error("Invalid daily hours: {0}")]
    InvalidDailyHours(String),

    // ---------------------------
    // Dataset validation
    // ---------------------------
    #[error("An employee with card id {0} already exists")]
    DuplicateCardId(String),

    #[error("A group named '{0}' already exists")]
    DuplicateGroupName(String),

    #[error("No employee with card id {0}")]
    UnknownCardId(String),

    #[error("No group with id {0}")]
    UnknownGroup(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    // ---------------------------
    // Synchronization
    // ---------------------------
    #[error("Synchronization failed: {0}")]
    SyncFailure(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
