//! Database Sync Options

use crate::config::TimeoutsConfig;
use crate::domain::value_objects::{Direction, ImportMode, RemoteTarget};

/// Everything one database pull or push needs, fixed before it starts
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub remote: RemoteTarget,
    pub direction: Direction,
    /// How a pulled snapshot is applied locally (ignored for push)
    pub import_mode: ImportMode,
    /// Keep the downloaded snapshot file after a pull
    pub keep_snapshot: bool,
    /// Take a local backup before pulling
    pub backup: bool,
    /// Treat every confirmation as granted
    pub skip_confirmation: bool,
    /// The local environment is classified as production
    pub local_is_production: bool,
    pub excluded_tables: Vec<String>,
    pub compress: bool,
    pub timeouts: TimeoutsConfig,
}

impl SyncRequest {
    pub fn new(remote: RemoteTarget, direction: Direction) -> Self {
        Self {
            remote,
            direction,
            import_mode: ImportMode::default(),
            keep_snapshot: false,
            backup: true,
            skip_confirmation: false,
            local_is_production: false,
            excluded_tables: Vec::new(),
            compress: true,
            timeouts: TimeoutsConfig::default(),
        }
    }

    pub fn pull(remote: RemoteTarget) -> Self {
        Self::new(remote, Direction::Pull)
    }

    pub fn push(remote: RemoteTarget) -> Self {
        Self::new(remote, Direction::Push)
    }

    pub fn with_import_mode(mut self, mode: ImportMode) -> Self {
        self.import_mode = mode;
        self
    }

    pub fn with_keep_snapshot(mut self, keep: bool) -> Self {
        self.keep_snapshot = keep;
        self
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn with_skip_confirmation(mut self, skip: bool) -> Self {
        self.skip_confirmation = skip;
        self
    }

    pub fn with_local_production(mut self, production: bool) -> Self {
        self.local_is_production = production;
        self
    }

    pub fn with_excluded_tables(mut self, tables: Vec<String>) -> Self {
        self.excluded_tables = tables;
        self
    }

    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutsConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Tables the transfer snapshot leaves out
    pub fn snapshot_exclusions(&self) -> &[String] {
        match self.direction {
            Direction::Pull if self.import_mode.is_full() => &[],
            _ => &self.excluded_tables,
        }
    }
}
