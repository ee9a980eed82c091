use crate::models::backup_summary::BackupSummary;
use crate::models::config::RunConfig;
use crate::models::error::Result;
use crate::service::archive::write_archive;
use crate::service::collect::collect_candidates;
use crate::service::relocate::{ensure_backup_folder, relocate_candidates};
use crate::utils::progress::{create_progress_bar, create_spinner};
use indicatif::MultiProgress;
use log::{debug, info};
use std::ffi::OsStr;

/// Runs one backup: collect, make the backup folder, move the candidates in, archive it.
///
/// Collection, folder creation and archiving abort the run on failure. A candidate
/// that cannot be moved is only reported in the returned summary.
pub fn run_backup(
    config: &RunConfig,
    exclude_name: Option<&OsStr>,
    quiet: bool,
) -> Result<BackupSummary> {
    let multi_progress = if !quiet {
        Some(MultiProgress::new())
    } else {
        None
    };

    let candidates = collect_candidates(&config.source_dir, config.exclude_dirs, exclude_name)?;
    let candidate_count = candidates.len();

    info!(
        "Backup folder name --> {}, source directory --> {}",
        config.backup_folder_name,
        config.source_dir.display()
    );
    let backup_folder = config.backup_folder_path();
    debug!("Full path for backup folder --> {}", backup_folder.display());
    let folder_status = ensure_backup_folder(&backup_folder)?;

    let move_progress = multi_progress.as_ref().map(|mp| {
        mp.add(create_progress_bar(
            candidate_count as u64,
            "[1/2] Moving into backup folder",
        ))
    });
    let relocation = relocate_candidates(candidates, &backup_folder, move_progress.as_ref());
    if let Some(progress) = move_progress {
        progress.finish();
    }

    let archive_progress = multi_progress
        .as_ref()
        .map(|mp| mp.add(create_spinner("[2/2] Writing archive...")));
    let archive = write_archive(&backup_folder, &config.archive_path, archive_progress.as_ref());
    if let Some(progress) = archive_progress {
        progress.finish_and_clear();
    }
    let archive = archive?;

    Ok(BackupSummary {
        candidates: candidate_count,
        folder_status,
        backup_folder,
        relocation,
        archive_path: config.archive_path.clone(),
        archive,
    })
}
