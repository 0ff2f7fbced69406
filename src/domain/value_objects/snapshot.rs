//! Snapshot Value Objects
//!
//! A snapshot is a compressed, point-in-time dump of a database referenced by
//! a unique name. The file on disk is `<name>.sql.gz`.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Local};

/// File extension of snapshot dumps
pub const SNAPSHOT_EXTENSION: &str = ".sql.gz";

const NAME_PREFIX: &str = "remote-sync";
const LOCAL_BACKUP_PREFIX: &str = "local-before-sync";
const REMOTE_BACKUP_PREFIX: &str = "pre-push-backup";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Where a snapshot lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotLocation {
    Local,
    Remote,
}

impl fmt::Display for SnapshotLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotLocation::Local => write!(f, "local"),
            SnapshotLocation::Remote => write!(f, "remote"),
        }
    }
}

/// An existing snapshot file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub name: String,
    pub location: SnapshotLocation,
    pub created_at: i64,
    pub path: String,
}

impl Snapshot {
    /// Build from a file path, deriving the name from the file stem
    pub fn from_path(location: SnapshotLocation, path: impl Into<String>, created_at: i64) -> Self {
        let path = path.into();
        let name = snapshot_name_from_path(&path);
        Self {
            name,
            location,
            created_at,
            path,
        }
    }

    /// Local time of creation for display
    pub fn created_at_display(&self) -> String {
        DateTime::from_timestamp(self.created_at, 0)
            .map(|utc| {
                utc.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| self.created_at.to_string())
    }
}

/// Strip directories and the `.sql.gz` extension
pub fn snapshot_name_from_path(path: &str) -> String {
    let file = Path::new(path)
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());
    file.strip_suffix(SNAPSHOT_EXTENSION)
        .map(str::to_string)
        .unwrap_or(file)
}

/// File name for a snapshot name
pub fn snapshot_file_name(name: &str) -> String {
    format!("{}{}", name, SNAPSHOT_EXTENSION)
}

/// Unique transfer snapshot name: time-based with a random suffix
pub fn generate_snapshot_name(now: DateTime<Local>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        NAME_PREFIX,
        now.format(TIMESTAMP_FORMAT),
        &suffix[..8]
    )
}

/// Name of the local backup taken before a pull
pub fn local_backup_name(now: DateTime<Local>) -> String {
    format!("{}-{}", LOCAL_BACKUP_PREFIX, now.format(TIMESTAMP_FORMAT))
}

/// Name of the remote backup taken before a push
pub fn remote_backup_name(now: DateTime<Local>) -> String {
    format!("{}-{}", REMOTE_BACKUP_PREFIX, now.format(TIMESTAMP_FORMAT))
}
