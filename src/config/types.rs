//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::services::RemoteCommands;
use crate::domain::value_objects::RemoteTarget;
use crate::error::{SyncError, SyncResult};

use super::loader::{self, ConfigWarning};

/// A remote registry entry as written in the config file
///
/// `host` and `path` are optional here so that a half-written entry loads
/// and fails later, at [`Config::remote`], with a message naming the remote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub push_allowed: bool,
}

/// Per-operation timeouts, in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutsConfig {
    pub snapshot_create: u64,
    pub snapshot_download: u64,
    pub snapshot_upload: u64,
    pub snapshot_cleanup: u64,
    pub file_sync: u64,
    pub probe: u64,
    pub dry_run: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            snapshot_create: 300,
            snapshot_download: 600,
            snapshot_upload: 600,
            snapshot_cleanup: 60,
            file_sync: 1800,
            probe: 30,
            dry_run: 120,
        }
    }
}

impl TimeoutsConfig {
    pub fn snapshot_create(&self) -> Duration {
        Duration::from_secs(self.snapshot_create)
    }

    pub fn snapshot_download(&self) -> Duration {
        Duration::from_secs(self.snapshot_download)
    }

    pub fn snapshot_upload(&self) -> Duration {
        Duration::from_secs(self.snapshot_upload)
    }

    pub fn snapshot_cleanup(&self) -> Duration {
        Duration::from_secs(self.snapshot_cleanup)
    }

    pub fn file_sync(&self) -> Duration {
        Duration::from_secs(self.file_sync)
    }

    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe)
    }

    pub fn dry_run(&self) -> Duration {
        Duration::from_secs(self.dry_run)
    }
}

/// The local environment this tool runs in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Environment class; "production" blocks every sync command
    pub environment: String,
    /// Driver of the local default database connection
    pub driver: String,
    pub project_root: PathBuf,
    /// Storage root, relative to `project_root`
    pub storage_path: PathBuf,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            driver: "mysql".to_string(),
            project_root: PathBuf::from("."),
            storage_path: PathBuf::from("storage"),
        }
    }
}

impl LocalConfig {
    pub fn is_production(&self) -> bool {
        self.environment.trim().eq_ignore_ascii_case("production")
    }

    pub fn storage_root(&self) -> PathBuf {
        self.project_root.join(&self.storage_path)
    }
}

/// Snapshot tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotsConfig {
    /// Command prefix of the snapshot tool, run in the project root
    pub tool: String,
    /// Local snapshot directory, relative to the project root
    pub directory: PathBuf,
    /// Remote snapshot directory, relative to the remote storage root
    pub subdirectory: String,
    /// Retention count for `cleanup-snapshots`
    pub keep: usize,
    pub compress: bool,
}

impl Default for SnapshotsConfig {
    fn default() -> Self {
        Self {
            tool: "php artisan".to_string(),
            directory: PathBuf::from("storage/snapshots"),
            subdirectory: "snapshots".to_string(),
            keep: 5,
            compress: true,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote used when none is named on the command line
    #[serde(default = "default_remote_name")]
    pub default: String,

    #[serde(default)]
    pub remotes: BTreeMap<String, RemoteConfig>,

    /// Storage-relative paths synced by the file commands
    #[serde(default = "default_paths")]
    pub paths: Vec<String>,

    /// rsync exclude patterns applied to every file transfer
    #[serde(default)]
    pub exclude_paths: Vec<String>,

    /// Tables left out of standard snapshots
    #[serde(default = "default_exclude_tables")]
    pub exclude_tables: Vec<String>,

    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    #[serde(default)]
    pub local: LocalConfig,

    #[serde(default)]
    pub snapshots: SnapshotsConfig,
}

fn default_remote_name() -> String {
    "production".to_string()
}

fn default_paths() -> Vec<String> {
    vec!["app".to_string()]
}

fn default_exclude_tables() -> Vec<String> {
    [
        "cache",
        "cache_locks",
        "health_cache",
        "health_cache_locks",
        "pulse_aggregates",
        "pulse_entries",
        "pulse_values",
        "telescope_entries",
        "telescope_entries_tags",
        "telescope_monitoring",
        "sessions",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default: default_remote_name(),
            remotes: BTreeMap::new(),
            paths: default_paths(),
            exclude_paths: Vec::new(),
            exclude_tables: default_exclude_tables(),
            timeouts: TimeoutsConfig::default(),
            local: LocalConfig::default(),
            snapshots: SnapshotsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> SyncResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SyncResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit file, the working directory, the user config or defaults
    pub fn load_or_default(explicit: Option<&Path>) -> SyncResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit)
    }

    /// Apply `REMOTE_SYNC_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, std::env::vars())
    }

    /// Validate a registry entry into a [`RemoteTarget`]
    ///
    /// `None` selects the configured default remote.
    pub fn remote(&self, name: Option<&str>) -> SyncResult<RemoteTarget> {
        let name = name.unwrap_or(&self.default);
        let entry = self
            .remotes
            .get(name)
            .ok_or_else(|| SyncError::UnknownRemote {
                name: name.to_string(),
            })?;

        RemoteTarget::new(
            name,
            entry.host.clone().unwrap_or_default(),
            entry.path.clone().unwrap_or_default(),
            entry.push_allowed,
        )
    }

    /// Remote command builder for the configured snapshot tool
    pub fn remote_commands(&self) -> RemoteCommands {
        RemoteCommands::new(&self.snapshots.tool, &self.snapshots.subdirectory)
    }

    /// Local snapshot directory
    pub fn snapshot_directory(&self) -> PathBuf {
        self.local.project_root.join(&self.snapshots.directory)
    }
}
