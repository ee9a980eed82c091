use crate::models::error::{BackupError, Result};
use crate::models::relocation::{FailedRelocation, FolderStatus, RelocationReport};
use indicatif::ProgressBar;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Makes sure `path` exists as a directory. An existing directory is left untouched.
pub fn ensure_backup_folder(path: &Path) -> Result<FolderStatus> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            info!("Backup directory already exists, skipping creation...");
            return Ok(FolderStatus::AlreadyExisted);
        }
        Ok(_) => {
            return Err(BackupError::FolderCreate {
                path: path.to_path_buf(),
                cause: io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "a file with that name already exists",
                ),
            });
        }
        Err(_) => {}
    }

    create_dir(path).map_err(|cause| BackupError::FolderCreate {
        path: path.to_path_buf(),
        cause,
    })?;
    info!("Directory created successfully --> {}", path.display());
    Ok(FolderStatus::Created)
}

#[cfg(unix)]
fn create_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_dir(path: &Path) -> io::Result<()> {
    fs::DirBuilder::new().create(path)
}

/// Renames every candidate into `backup_folder`, keeping its base name.
/// A failed rename is logged and recorded; the remaining candidates are still moved.
pub fn relocate_candidates(
    candidates: Vec<PathBuf>,
    backup_folder: &Path,
    progress: Option<&ProgressBar>,
) -> RelocationReport {
    let mut report = RelocationReport::default();

    for candidate in candidates {
        info!("Moving item ---> {}", candidate.display());
        if let Some(pb) = progress {
            pb.set_message(candidate.display().to_string());
        }

        let destination = match candidate.file_name() {
            Some(name) => backup_folder.join(name),
            None => {
                let error = BackupError::Relocate {
                    from: candidate.clone(),
                    to: backup_folder.to_path_buf(),
                    cause: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
                };
                warn!("{}", error);
                report.failed.push(FailedRelocation {
                    source: candidate,
                    error,
                });
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                continue;
            }
        };

        match fs::rename(&candidate, &destination) {
            Ok(()) => report.moved.push(destination),
            Err(cause) => {
                let error = BackupError::Relocate {
                    from: candidate.clone(),
                    to: destination,
                    cause,
                };
                warn!("{}", error);
                report.failed.push(FailedRelocation {
                    source: candidate,
                    error,
                });
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_folder() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("bak");

        let status = ensure_backup_folder(&folder).unwrap();

        assert_eq!(status, FolderStatus::Created);
        assert!(folder.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_created_folder_has_standard_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("bak");
        ensure_backup_folder(&folder).unwrap();

        let mode = fs::metadata(&folder).unwrap().permissions().mode() & 0o777;
        // umask can only take bits away
        assert_eq!(mode & !0o755, 0);
        assert_eq!(mode & 0o700, 0o700);
    }

    #[test]
    fn test_existing_folder_is_left_alone() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("bak");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("keep.txt"), "keep").unwrap();

        assert_eq!(ensure_backup_folder(&folder).unwrap(), FolderStatus::AlreadyExisted);
        assert_eq!(ensure_backup_folder(&folder).unwrap(), FolderStatus::AlreadyExisted);

        assert_eq!(fs::read_to_string(folder.join("keep.txt")).unwrap(), "keep");
        assert_eq!(fs::read_dir(&folder).unwrap().count(), 1);
    }

    #[test]
    fn test_error_when_file_occupies_folder_path() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("bak");
        fs::write(&folder, "not a dir").unwrap();

        match ensure_backup_folder(&folder) {
            Err(BackupError::FolderCreate { path, .. }) => assert_eq!(path, folder),
            other => panic!("Expected FolderCreate error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_when_parent_is_missing() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("missing").join("bak");

        assert!(matches!(
            ensure_backup_folder(&folder),
            Err(BackupError::FolderCreate { .. })
        ));
    }

    #[test]
    fn test_relocates_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("bak");
        fs::create_dir(&folder).unwrap();
        fs::write(temp.path().join("report.txt"), "0123456789").unwrap();
        fs::create_dir(temp.path().join("notes")).unwrap();
        fs::write(temp.path().join("notes").join("a.txt"), "a").unwrap();

        let candidates = vec![temp.path().join("notes"), temp.path().join("report.txt")];
        let report = relocate_candidates(candidates, &folder, None);

        assert!(!report.has_failures());
        assert_eq!(report.moved, vec![folder.join("notes"), folder.join("report.txt")]);
        assert!(!temp.path().join("report.txt").exists());
        assert_eq!(fs::read_to_string(folder.join("report.txt")).unwrap(), "0123456789");
        assert_eq!(fs::read_to_string(folder.join("notes").join("a.txt")).unwrap(), "a");
    }

    #[test]
    fn test_one_failure_does_not_stop_the_others() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("bak");
        fs::create_dir(&folder).unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("c.txt"), "c").unwrap();

        let candidates = vec![
            temp.path().join("a.txt"),
            temp.path().join("vanished.txt"),
            temp.path().join("c.txt"),
        ];
        let report = relocate_candidates(candidates, &folder, None);

        assert_eq!(report.attempted(), 3);
        assert_eq!(report.moved, vec![folder.join("a.txt"), folder.join("c.txt")]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].source, temp.path().join("vanished.txt"));
        assert!(matches!(report.failed[0].error, BackupError::Relocate { .. }));
    }

    #[test]
    fn test_moving_backup_folder_into_itself_fails_softly() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("bak");
        fs::create_dir(&folder).unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let candidates = vec![temp.path().join("a.txt"), folder.clone()];
        let report = relocate_candidates(candidates, &folder, None);

        assert_eq!(report.moved, vec![folder.join("a.txt")]);
        assert_eq!(report.failed.len(), 1);
        assert!(folder.is_dir());
    }

    #[test]
    fn test_progress_ticks_once_per_candidate() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("bak");
        fs::create_dir(&folder).unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let pb = ProgressBar::hidden();
        relocate_candidates(
            vec![temp.path().join("a.txt"), temp.path().join("gone.txt")],
            &folder,
            Some(&pb),
        );

        assert_eq!(pb.position(), 2);
    }
}
