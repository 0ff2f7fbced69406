//! File Sync Result

use crate::domain::services::TransferPlan;

/// How a file sync ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSyncOutcome {
    Completed,
    /// Preview computed, nothing transferred
    DryRun,
    /// A confirmation was declined before any transfer
    Cancelled,
}

/// Result of a file pull or push that did not fail
#[derive(Debug, Clone)]
pub struct FileSyncResult {
    pub outcome: FileSyncOutcome,
    /// Aggregated preview over every previewed path
    pub plan: TransferPlan,
    /// Paths transferred, in order
    pub synced: Vec<String>,
    /// Paths skipped (missing local directory on push)
    pub skipped: Vec<String>,
    pub warnings: Vec<String>,
}

impl FileSyncResult {
    pub(crate) fn new() -> Self {
        Self {
            outcome: FileSyncOutcome::Completed,
            plan: TransferPlan::default(),
            synced: Vec::new(),
            skipped: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.outcome == FileSyncOutcome::Cancelled
    }
}
