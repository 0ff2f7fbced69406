//! remote-sync - database and storage sync with remote environments
//!
//! Pulls and pushes database snapshots and storage directories between a
//! local project and named remotes over ssh + rsync, with cleanup of every
//! artifact a failed or interrupted sync leaves behind.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use config::Config;
pub use error::{SyncError, SyncResult};
