//! File System Snapshot Store
//!
//! Snapshot files in a local directory, dated by modification time.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::domain::ports::SnapshotStore;
use crate::domain::services::sort_by_recency;
use crate::domain::value_objects::{Snapshot, SnapshotLocation, SNAPSHOT_EXTENSION};
use crate::error::SyncResult;

/// Local snapshot directory
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    directory: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn directory(&self) -> &Path {
        &self.directory
    }

    fn ensure_directory(&self) -> SyncResult<()> {
        fs::create_dir_all(&self.directory)?;
        Ok(())
    }

    fn list(&self) -> SyncResult<Vec<Snapshot>> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut snapshots = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let is_snapshot = path
                .file_name()
                .map(|n| n.to_string_lossy().ends_with(SNAPSHOT_EXTENSION))
                .unwrap_or(false);
            if !is_snapshot {
                continue;
            }

            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let created_at = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0);

            snapshots.push(Snapshot::from_path(
                SnapshotLocation::Local,
                path.display().to_string(),
                created_at,
            ));
        }

        sort_by_recency(&mut snapshots);
        Ok(snapshots)
    }

    fn delete(&self, path: &Path) -> SyncResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
