pub mod archive;
pub mod backup;
pub mod collect;
pub mod relocate;
