use crate::models::error::{BackupError, Result};
use crate::utils::directory::get_direct_children;
use log::{debug, info};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Lists the entries directly under `source_dir` that should go into the backup folder.
///
/// Entries come back in file-name order. An entry named `exclude_name` (the running
/// binary) is always dropped; subdirectories are dropped when `exclude_dirs` is set.
/// Nothing on disk is modified.
pub fn collect_candidates(
    source_dir: &Path,
    exclude_dirs: bool,
    exclude_name: Option<&OsStr>,
) -> Result<Vec<PathBuf>> {
    let entries = get_direct_children(source_dir).map_err(|cause| BackupError::DirectoryRead {
        path: source_dir.to_path_buf(),
        cause,
    })?;

    info!("Fetching files in {}...", source_dir.display());

    let mut candidates = Vec::with_capacity(entries.len());
    for entry in entries {
        if exclude_dirs && entry.file_type().is_dir() {
            info!("Skipping directory: {}", entry.file_name().to_string_lossy());
            continue;
        }
        if exclude_name == Some(entry.file_name()) {
            debug!("Skipping running executable: {}", entry.path().display());
            continue;
        }

        candidates.push(source_dir.join(entry.file_name()));
    }

    info!("Collected {} candidates", candidates.len());
    Ok(candidates)
}
