//! Snapshot Cleanup Result

use crate::domain::value_objects::Snapshot;

/// How a cleanup ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// Every selected snapshot was attempted
    Completed,
    /// Nothing exceeded the keep count
    NothingToDelete,
    /// Selection listed, nothing deleted
    DryRun,
    Cancelled,
}

/// A selected snapshot that could not be removed
#[derive(Debug, Clone)]
pub struct FailedDeletion {
    pub snapshot: Snapshot,
    pub reason: String,
}

/// Result of a cleanup run
#[derive(Debug, Clone)]
pub struct CleanupResult {
    pub outcome: CleanupOutcome,
    /// Local snapshots beyond the keep count
    pub local_selected: Vec<Snapshot>,
    /// Remote snapshots beyond the keep count
    pub remote_selected: Vec<Snapshot>,
    pub deleted: Vec<Snapshot>,
    pub failed: Vec<FailedDeletion>,
}

impl CleanupResult {
    pub(crate) fn new() -> Self {
        Self {
            outcome: CleanupOutcome::Completed,
            local_selected: Vec::new(),
            remote_selected: Vec::new(),
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn selected_count(&self) -> usize {
        self.local_selected.len() + self.remote_selected.len()
    }

    /// True when at least one deletion failed
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
