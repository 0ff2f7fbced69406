//! File Sync Options

use std::path::PathBuf;

use crate::config::TimeoutsConfig;
use crate::domain::value_objects::{Direction, RemoteTarget};

/// Everything one file pull or push needs, fixed before it starts
#[derive(Debug, Clone)]
pub struct FileSyncRequest {
    pub remote: RemoteTarget,
    pub direction: Direction,
    /// Storage-relative paths, unvalidated user input
    pub paths: Vec<String>,
    /// Local storage root every path must stay inside
    pub storage_root: PathBuf,
    /// rsync exclude patterns
    pub excludes: Vec<String>,
    /// Mirror mode: remove destination files missing from the source
    pub delete: bool,
    /// Preview only
    pub dry_run: bool,
    pub skip_confirmation: bool,
    pub local_is_production: bool,
    pub timeouts: TimeoutsConfig,
}

impl FileSyncRequest {
    pub fn new(
        remote: RemoteTarget,
        direction: Direction,
        storage_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            remote,
            direction,
            paths: Vec::new(),
            storage_root: storage_root.into(),
            excludes: Vec::new(),
            delete: false,
            dry_run: false,
            skip_confirmation: false,
            local_is_production: false,
            timeouts: TimeoutsConfig::default(),
        }
    }

    pub fn with_paths(mut self, paths: Vec<String>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    pub fn with_delete(mut self, delete: bool) -> Self {
        self.delete = delete;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
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

    pub fn with_timeouts(mut self, timeouts: TimeoutsConfig) -> Self {
        self.timeouts = timeouts;
        self
    }
}
