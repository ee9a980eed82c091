pub mod backup_summary;
pub mod config;
pub mod error;
pub mod relocation;
