use crate::models::error::BackupError;
use std::path::PathBuf;

/// Outcome of making sure the backup folder exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    Created,
    AlreadyExisted,
}

#[derive(Debug)]
pub struct FailedRelocation {
    pub source: PathBuf,
    pub error: BackupError,
}

/// Result of moving the candidates into the backup folder.
/// A failed move never aborts the run, it only lands in `failed`.
#[derive(Debug, Default)]
pub struct RelocationReport {
    pub moved: Vec<PathBuf>,
    pub failed: Vec<FailedRelocation>,
}

impl RelocationReport {
    pub fn attempted(&self) -> usize {
        self.moved.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
