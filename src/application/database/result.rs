//! Database Sync Result

use std::path::PathBuf;

use crate::domain::value_objects::LifecycleState;

/// How a database sync ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed,
    /// The confirmation gate declined; nothing was touched
    Cancelled,
}

/// Result of a database pull or push that did not fail
#[derive(Debug, Clone)]
pub struct DatabaseSyncResult {
    pub outcome: SyncOutcome,
    pub final_state: LifecycleState,
    pub snapshot_name: String,
    /// Local backup taken before a pull, or remote backup taken before a push
    pub backup_name: Option<String>,
    /// Downloaded snapshot file left in place on request
    pub kept_snapshot: Option<PathBuf>,
    /// Non-fatal problems, including demoted cleanup failures
    pub warnings: Vec<String>,
}

impl DatabaseSyncResult {
    pub(crate) fn new(snapshot_name: String) -> Self {
        Self {
            outcome: SyncOutcome::Completed,
            final_state: LifecycleState::Idle,
            snapshot_name,
            backup_name: None,
            kept_snapshot: None,
            warnings: Vec::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.outcome == SyncOutcome::Cancelled
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
