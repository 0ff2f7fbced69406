//! Snapshot lifecycle states

use std::fmt;

/// Steps of a database pull or push
///
/// `Failed` and `Cancelled` are absorbing and reachable from any step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Idle,
    CompatibilityChecked,
    NameGenerated,
    Confirmed,
    RemoteSnapshotCreated,
    LocalSnapshotCreated,
    Downloaded,
    Uploaded,
    Loaded,
    CleanedUp,
    Done,
    Failed,
    Cancelled,
}

impl LifecycleState {
    fn rank(self) -> Option<u8> {
        use LifecycleState::*;
        match self {
            Idle => Some(0),
            CompatibilityChecked => Some(1),
            NameGenerated => Some(2),
            Confirmed => Some(3),
            RemoteSnapshotCreated | LocalSnapshotCreated => Some(4),
            Downloaded | Uploaded => Some(5),
            Loaded => Some(6),
            CleanedUp => Some(7),
            Done => Some(8),
            Failed | Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LifecycleState::Done | LifecycleState::Failed | LifecycleState::Cancelled
        )
    }

    /// Whether `next` may follow `self`
    pub fn can_advance_to(self, next: LifecycleState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), next.rank()) {
            (_, None) => true,
            (Some(current), Some(next)) => next > current,
            (None, Some(_)) => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        use LifecycleState::*;
        match self {
            Idle => "idle",
            CompatibilityChecked => "compatibility_checked",
            NameGenerated => "name_generated",
            Confirmed => "confirmed",
            RemoteSnapshotCreated => "remote_snapshot_created",
            LocalSnapshotCreated => "local_snapshot_created",
            Downloaded => "downloaded",
            Uploaded => "uploaded",
            Loaded => "loaded",
            CleanedUp => "cleaned_up",
            Done => "done",
            Failed => "failed",
            Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
