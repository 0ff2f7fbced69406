//! Snapshot Cleanup Options

use crate::config::TimeoutsConfig;
use crate::domain::value_objects::RemoteTarget;

/// Which collections to trim and how far
#[derive(Debug, Clone)]
pub struct CleanupRequest {
    /// Trim the local snapshot directory
    pub local: bool,
    /// Trim the snapshot directory of this remote
    pub remote: Option<RemoteTarget>,
    /// Most recent snapshots kept per collection
    pub keep: usize,
    /// List what would be deleted and stop
    pub dry_run: bool,
    pub skip_confirmation: bool,
    pub timeouts: TimeoutsConfig,
}

impl CleanupRequest {
    /// Local-only cleanup keeping `keep` snapshots
    pub fn new(keep: usize) -> Self {
        Self {
            local: true,
            remote: None,
            keep,
            dry_run: false,
            skip_confirmation: false,
            timeouts: TimeoutsConfig::default(),
        }
    }

    pub fn with_local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    pub fn with_remote(mut self, remote: Option<RemoteTarget>) -> Self {
        self.remote = remote;
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

    pub fn with_timeouts(mut self, timeouts: TimeoutsConfig) -> Self {
        self.timeouts = timeouts;
        self
    }
}
