use crate::models::relocation::{FolderStatus, RelocationReport};
use crate::utils::progress::format_bytes;
use log::{info, warn};
use std::path::PathBuf;

/// Counters collected while writing the archive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    pub entries: u64,
    pub directories: u64,
    pub files: u64,
    pub file_bytes: u64,
}

#[derive(Debug)]
pub struct BackupSummary {
    pub candidates: usize,
    pub folder_status: FolderStatus,
    pub backup_folder: PathBuf,
    pub relocation: RelocationReport,
    pub archive_path: PathBuf,
    pub archive: ArchiveStats,
}

impl BackupSummary {
    pub fn log(&self) {
        let folder = match self.folder_status {
            FolderStatus::Created => "new",
            FolderStatus::AlreadyExisted => "existing",
        };
        info!(
            "Collected {} candidates, moved {} of {} into {} folder {}",
            self.candidates,
            self.relocation.moved.len(),
            self.relocation.attempted(),
            folder,
            self.backup_folder.display()
        );
        if self.relocation.has_failures() {
            warn!(
                "{} item(s) could not be moved:",
                self.relocation.failed.len()
            );
            for failure in &self.relocation.failed {
                warn!("  {}: {}", failure.source.display(), failure.error);
            }
        }
        info!(
            "Archive {} holds {} entries ({} directories, {} files, {})",
            self.archive_path.display(),
            self.archive.entries,
            self.archive.directories,
            self.archive.files,
            format_bytes(self.archive.file_bytes)
        );
    }
}
