use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read directory '{path}': {cause}")]
    DirectoryRead { path: PathBuf, cause: io::Error },

    #[error("Failed to create backup folder '{path}': {cause}")]
    FolderCreate { path: PathBuf, cause: io::Error },

    #[error("Failed to move '{from}' to '{to}': {cause}")]
    Relocate {
        from: PathBuf,
        to: PathBuf,
        cause: io::Error,
    },

    #[error("Failed to create archive file '{path}': {cause}")]
    ArchiveCreate { path: PathBuf, cause: io::Error },

    #[error("Failed to compress '{path}': {cause}")]
    Compression { path: PathBuf, cause: io::Error },
}

pub type Result<T> = std::result::Result<T, BackupError>;
