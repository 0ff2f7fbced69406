//! Snapshot Store Port
//!
//! The local directory holding snapshot files.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{snapshot_file_name, Snapshot};
use crate::error::SyncResult;

pub trait SnapshotStore: Send + Sync {
    /// Directory the snapshot tool reads from and writes to
    fn directory(&self) -> &Path;

    /// Create the directory if missing
    fn ensure_directory(&self) -> SyncResult<()>;

    /// Snapshots on disk, most recent first
    fn list(&self) -> SyncResult<Vec<Snapshot>>;

    /// Remove a snapshot file; a missing file is not an error
    fn delete(&self, path: &Path) -> SyncResult<()>;

    /// Path of a snapshot file by name
    fn file_path(&self, name: &str) -> PathBuf {
        self.directory().join(snapshot_file_name(name))
    }
}
