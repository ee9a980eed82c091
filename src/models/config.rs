use crate::models::error::{BackupError, Result};
use log::info;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_BACKUP_FOLDER: &str = "default_dir";
pub const DEFAULT_ARCHIVE_NAME: &str = "archive.tar.gz";

/// The four parameters of a backup run. Built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source_dir: PathBuf,
    pub backup_folder_name: String,
    pub exclude_dirs: bool,
    pub archive_path: PathBuf,
}

impl RunConfig {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        backup_folder_name: impl Into<String>,
        exclude_dirs: bool,
        archive_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let config = RunConfig {
            source_dir: source_dir.into(),
            backup_folder_name: backup_folder_name.into(),
            exclude_dirs,
            archive_path: archive_path.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Location of the backup folder: always a direct child of the source directory.
    pub fn backup_folder_path(&self) -> PathBuf {
        self.source_dir.join(&self.backup_folder_name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(BackupError::InvalidConfig(
                "source directory must not be empty".to_string(),
            ));
        }

        validate_folder_name(&self.backup_folder_name)?;

        if self.archive_path.as_os_str().is_empty() {
            return Err(BackupError::InvalidConfig(
                "archive name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn log_parameters(&self) {
        info!("Directory: {}", self.source_dir.display());
        info!("Generate Folder: {}", self.backup_folder_name);
        info!("NoDirs: {}", self.exclude_dirs);
        info!("Archive Name: {}", self.archive_path.display());
    }
}

fn validate_folder_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BackupError::InvalidConfig(
            "backup folder name must not be empty".to_string(),
        ));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.ends_with(std::path::is_separator) => Ok(()),
        _ => Err(BackupError::InvalidConfig(format!(
            "backup folder name '{}' must be a single folder name, not a path",
            name
        ))),
    }
}
