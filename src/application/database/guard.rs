//! Cleanup Guard
//!
//! Tracks snapshot artifacts created mid-sync and removes them if the sync
//! never reaches its own cleanup step: on an early error return, while a
//! panic unwinds, or from the interrupt handler. Only artifacts confirmed
//! created are tracked, so an empty guard issues no delete calls.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::ports::{
    InterruptHook, SnapshotStore, SyncEvent, SyncEventSink, TransportGateway,
};
use crate::domain::services::RemoteCommands;
use crate::domain::value_objects::{RemoteTarget, SnapshotLocation};

#[derive(Debug, Default)]
struct PendingCleanup {
    remote_snapshot: Option<String>,
    local_file: Option<PathBuf>,
}

impl PendingCleanup {
    fn is_empty(&self) -> bool {
        self.remote_snapshot.is_none() && self.local_file.is_none()
    }
}

/// Take and sweep without releasing the lock in between
///
/// A second caller (interrupt action or drop) blocks until the sweep in
/// flight is done and then finds nothing left to remove.
fn sweep_pending<T, S>(pending: &Mutex<PendingCleanup>, janitor: &Janitor<T, S>) -> Vec<String>
where
    T: TransportGateway,
    S: SnapshotStore,
{
    let mut slot = match pending.lock() {
        Ok(slot) => slot,
        Err(poisoned) => poisoned.into_inner(),
    };
    let taken = std::mem::take(&mut *slot);
    if taken.is_empty() {
        return Vec::new();
    }
    tracing::debug!("cleaning up tracked snapshots");
    janitor.sweep(taken)
}

/// Removes tracked artifacts; shared with the interrupt action
pub(crate) struct Janitor<T, S> {
    pub transport: Arc<T>,
    pub store: Arc<S>,
    pub remote: RemoteTarget,
    pub commands: RemoteCommands,
    pub timeout: Duration,
    pub events: Arc<dyn SyncEventSink>,
}

impl<T, S> Janitor<T, S>
where
    T: TransportGateway,
    S: SnapshotStore,
{
    /// Best-effort removal; failures come back as warnings
    fn sweep(&self, pending: PendingCleanup) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(path) = pending.local_file {
            match self.store.delete(&path) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "local snapshot removed");
                    self.events
                        .on_event(SyncEvent::progress("Local snapshot file removed"));
                }
                Err(e) => warnings.push(format!(
                    "failed to remove local snapshot {}: {}",
                    path.display(),
                    e
                )),
            }
        }

        if let Some(name) = pending.remote_snapshot {
            let command = self.commands.delete_snapshot(&self.remote, &name);
            tracing::debug!(%command, "deleting remote snapshot");
            let output = self
                .transport
                .run_remote_command(&self.remote, &command, self.timeout);
            if output.success {
                self.events.on_event(SyncEvent::SnapshotDeleted {
                    name,
                    location: SnapshotLocation::Remote,
                });
            } else {
                warnings.push(format!(
                    "failed to delete remote snapshot ({}); manual cleanup needed: {}",
                    output.diagnostic(),
                    name
                ));
            }
        }

        for warning in &warnings {
            tracing::warn!("{warning}");
            self.events.on_event(SyncEvent::warning(warning.clone()));
        }

        warnings
    }
}

pub(crate) struct CleanupGuard<T, S>
where
    T: TransportGateway + 'static,
    S: SnapshotStore + 'static,
{
    pending: Arc<Mutex<PendingCleanup>>,
    janitor: Arc<Janitor<T, S>>,
    hook: Arc<dyn InterruptHook>,
}

impl<T, S> CleanupGuard<T, S>
where
    T: TransportGateway + 'static,
    S: SnapshotStore + 'static,
{
    /// Start tracking and register the interrupt action
    pub(crate) fn arm(janitor: Janitor<T, S>, hook: Arc<dyn InterruptHook>) -> Self {
        let pending = Arc::new(Mutex::new(PendingCleanup::default()));
        let janitor = Arc::new(janitor);

        let action_pending = Arc::clone(&pending);
        let action_janitor = Arc::clone(&janitor);
        hook.arm(Box::new(move || {
            sweep_pending(&action_pending, &action_janitor);
        }));

        Self {
            pending,
            janitor,
            hook,
        }
    }

    pub(crate) fn track_remote_snapshot(&self, name: &str) {
        self.with_pending(|p| p.remote_snapshot = Some(name.to_string()));
    }

    pub(crate) fn track_local_file(&self, path: PathBuf) {
        self.with_pending(|p| p.local_file = Some(path));
    }

    /// Forget the local file (it is being kept or was already removed)
    pub(crate) fn untrack_local_file(&self) {
        self.with_pending(|p| p.local_file = None);
    }

    /// Run the cleanup now and stand down
    ///
    /// The interrupt action stays armed until the sweep is over, so a signal
    /// arriving mid-sweep waits for it instead of exiting underneath it.
    pub(crate) fn release(self) -> Vec<String> {
        let warnings = sweep_pending(&self.pending, &self.janitor);
        self.hook.disarm();
        warnings
    }

    fn with_pending(&self, f: impl FnOnce(&mut PendingCleanup)) {
        match self.pending.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl<T, S> Drop for CleanupGuard<T, S>
where
    T: TransportGateway + 'static,
    S: SnapshotStore + 'static,
{
    fn drop(&mut self) {
        sweep_pending(&self.pending, &self.janitor);
        self.hook.disarm();
    }
}
