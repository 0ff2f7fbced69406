//! Sync Event Port
//!
//! Observable progress of sync operations, for terminal output, NDJSON
//! streams and tests.

use crate::domain::services::TransferPlan;
use crate::domain::value_objects::{Direction, LifecycleState, SnapshotLocation};

/// Event emitted during sync operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Snapshot lifecycle moved to a new state
    StateChanged { state: LifecycleState },

    /// A step started or finished
    Progress { message: String },

    /// Non-fatal condition (undetected driver, failed cleanup)
    Warning { message: String },

    /// Dry-run analysis finished
    PreviewReady { plan: TransferPlan },

    /// A storage path transfer started
    PathStarted { path: String, direction: Direction },

    /// A snapshot was removed
    SnapshotDeleted {
        name: String,
        location: SnapshotLocation,
    },
}

impl SyncEvent {
    pub fn progress(message: impl Into<String>) -> Self {
        SyncEvent::Progress {
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        SyncEvent::Warning {
            message: message.into(),
        }
    }
}

/// Trait for receiving sync events
pub trait SyncEventSink: Send + Sync {
    fn on_event(&self, event: SyncEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl SyncEventSink for NoopEventSink {
    fn on_event(&self, _event: SyncEvent) {}
}
