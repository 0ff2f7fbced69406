//! Confirmation Port
//!
//! The yes/no gate in front of destructive steps. Rendering is up to the
//! implementation; the core only sees the answer.

use crate::domain::value_objects::{Direction, SyncTarget};

/// What the user is asked to approve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationRequest {
    /// Replace local or remote data with the other side's
    Overwrite {
        remote: String,
        direction: Direction,
        target: SyncTarget,
    },
    /// Mirror-deletion push: remote files missing locally are removed
    MirrorDelete { remote: String },
    /// Retention cleanup
    DeleteSnapshots { local: usize, remote: usize },
}

pub trait Confirmer: Send + Sync {
    /// True only on explicit affirmative confirmation
    fn confirm(&self, request: &ConfirmationRequest) -> bool;
}

/// Confirmer that always declines
pub struct DeclineAll;

impl Confirmer for DeclineAll {
    fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        false
    }
}
