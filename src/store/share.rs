//! Transport seam for the remote share.
//!
//! The production deployment reaches the share through an operating-system
//! mount, so [`DirShare`] is a thin `std::fs` wrapper; tests substitute
//! their own [`ShareClient`] impls to exercise failure paths the mount
//! rarely produces on demand.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("file not found")]
    NotFound,

    #[error("share unavailable: {0}")]
    Unavailable(String),

    #[error("access denied: {0}")]
    Denied(String),
}

/// Minimal file operations the share must support. Every write replaces a
/// whole file; there is no in-place patching and no locking on the share.
pub trait ShareClient: Send + Sync {
    fn retrieve(&self, name: &str) -> Result<Vec<u8>, ShareError>;
    fn store(&self, name: &str, data: &[u8]) -> Result<(), ShareError>;
    fn delete(&self, name: &str) -> Result<(), ShareError>;
    fn list(&self) -> Result<Vec<String>, ShareError>;
}

/// Share reached through a mounted directory (UNC path or local mount).
pub struct DirShare {
    root: PathBuf,
}

impl DirShare {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn classify(e: io::Error) -> ShareError {
        match e.kind() {
            io::ErrorKind::NotFound => ShareError::NotFound,
            io::ErrorKind::PermissionDenied => ShareError::Denied(e.to_string()),
            _ => ShareError::Unavailable(e.to_string()),
        }
    }
}

impl ShareClient for DirShare {
    fn retrieve(&self, name: &str) -> Result<Vec<u8>, ShareError> {
        fs::read(self.root.join(name)).map_err(Self::classify)
    }

    fn store(&self, name: &str, data: &[u8]) -> Result<(), ShareError> {
        if !self.root.is_dir() {
            return Err(ShareError::Unavailable(format!(
                "mount point {} is not a directory",
                self.root.display()
            )));
        }
        fs::write(self.root.join(name), data).map_err(Self::classify)
    }

    fn delete(&self, name: &str) -> Result<(), ShareError> {
        fs::remove_file(self.root.join(name)).map_err(Self::classify)
    }

    fn list(&self) -> Result<Vec<String>, ShareError> {
        let entries = fs::read_dir(&self.root).map_err(Self::classify)?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(Self::classify)?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
