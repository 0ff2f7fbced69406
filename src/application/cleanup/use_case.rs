//! Snapshot Cleanup Use Case
//!
//! 1. List local and/or remote snapshots
//! 2. Select everything beyond the keep count
//! 3. Confirm (skipped for dry runs and `--yes`)
//! 4. Delete each selected snapshot independently

use std::path::Path;
use std::sync::Arc;

use crate::application::layout::resolve_layout;
use crate::domain::ports::{
    ConfirmationRequest, Confirmer, DeclineAll, NoopEventSink, SnapshotStore, SyncEvent,
    SyncEventSink, TransportGateway,
};
use crate::domain::services::{parse_snapshot_listing, select_for_deletion, RemoteCommands};
use crate::domain::value_objects::{RemoteTarget, Snapshot, SnapshotLocation};
use crate::error::{SyncError, SyncResult};

use super::options::CleanupRequest;
use super::result::{CleanupOutcome, CleanupResult, FailedDeletion};

/// Retention cleanup use case
pub struct CleanupUseCase<T, S>
where
    T: TransportGateway,
    S: SnapshotStore,
{
    transport: Arc<T>,
    store: Arc<S>,
    commands: RemoteCommands,
    confirmer: Arc<dyn Confirmer>,
    events: Arc<dyn SyncEventSink>,
}

impl<T, S> CleanupUseCase<T, S>
where
    T: TransportGateway,
    S: SnapshotStore,
{
    pub fn new(transport: Arc<T>, store: Arc<S>, commands: RemoteCommands) -> Self {
        Self {
            transport,
            store,
            commands,
            confirmer: Arc::new(DeclineAll),
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_confirmer(mut self, confirmer: Arc<dyn Confirmer>) -> Self {
        self.confirmer = confirmer;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn SyncEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Listing failures abort; deletion failures are collected in the result
    pub fn execute(&self, request: &CleanupRequest) -> SyncResult<CleanupResult> {
        let mut result = CleanupResult::new();

        if request.local {
            result.local_selected = select_for_deletion(self.store.list()?, request.keep);
        }

        let remote = match &request.remote {
            Some(remote) => {
                let remote = resolve_layout(
                    self.transport.as_ref(),
                    &self.commands,
                    remote,
                    request.timeouts.probe(),
                )?;
                result.remote_selected =
                    select_for_deletion(self.list_remote(&remote, request)?, request.keep);
                Some(remote)
            }
            None => None,
        };

        if result.selected_count() == 0 {
            self.progress(format!(
                "No snapshots to clean up (keeping {} most recent)",
                request.keep
            ));
            result.outcome = CleanupOutcome::NothingToDelete;
            return Ok(result);
        }

        for snapshot in result.local_selected.iter().chain(&result.remote_selected) {
            self.progress(format!(
                "[{}] {} ({})",
                snapshot.location,
                snapshot.name,
                snapshot.created_at_display()
            ));
        }

        if request.dry_run {
            self.progress("Dry run: no snapshots were deleted");
            result.outcome = CleanupOutcome::DryRun;
            return Ok(result);
        }

        let approved = request.skip_confirmation
            || self.confirmer.confirm(&ConfirmationRequest::DeleteSnapshots {
                local: result.local_selected.len(),
                remote: result.remote_selected.len(),
            });
        if !approved {
            self.progress("Operation cancelled");
            result.outcome = CleanupOutcome::Cancelled;
            return Ok(result);
        }

        let selected: Vec<Snapshot> = result
            .local_selected
            .iter()
            .chain(&result.remote_selected)
            .cloned()
            .collect();

        for snapshot in selected {
            let attempt = match snapshot.location {
                SnapshotLocation::Local => self.store.delete(Path::new(&snapshot.path)),
                SnapshotLocation::Remote => match &remote {
                    Some(remote) => self.delete_remote(remote, &snapshot, request),
                    None => continue,
                },
            };

            match attempt {
                Ok(()) => {
                    tracing::debug!(
                        name = %snapshot.name,
                        location = %snapshot.location,
                        "snapshot deleted"
                    );
                    self.events.on_event(SyncEvent::SnapshotDeleted {
                        name: snapshot.name.clone(),
                        location: snapshot.location,
                    });
                    result.deleted.push(snapshot);
                }
                Err(e) => {
                    let reason = e.to_string();
                    tracing::warn!(name = %snapshot.name, %reason, "snapshot deletion failed");
                    self.events.on_event(SyncEvent::warning(format!(
                        "failed to delete {} snapshot {}: {}",
                        snapshot.location, snapshot.name, reason
                    )));
                    result.failed.push(FailedDeletion { snapshot, reason });
                }
            }
        }

        Ok(result)
    }

    fn list_remote(
        &self,
        remote: &RemoteTarget,
        request: &CleanupRequest,
    ) -> SyncResult<Vec<Snapshot>> {
        let command = self.commands.list_snapshots(remote);
        tracing::debug!(remote = %remote, %command, "listing remote snapshots");
        let output = self
            .transport
            .run_remote_command(remote, &command, request.timeouts.snapshot_cleanup());
        if !output.success {
            return Err(SyncError::transport(
                "list remote snapshots",
                output.diagnostic(),
            ));
        }
        Ok(parse_snapshot_listing(&output.stdout))
    }

    fn delete_remote(
        &self,
        remote: &RemoteTarget,
        snapshot: &Snapshot,
        request: &CleanupRequest,
    ) -> SyncResult<()> {
        let command = self.commands.delete_snapshot(remote, &snapshot.name);
        tracing::debug!(remote = %remote, %command, "deleting remote snapshot");
        let output = self
            .transport
            .run_remote_command(remote, &command, request.timeouts.snapshot_cleanup());
        if output.success {
            Ok(())
        } else {
            Err(SyncError::transport(
                format!("delete remote snapshot '{}'", snapshot.name),
                output.diagnostic(),
            ))
        }
    }

    fn progress(&self, message: impl Into<String>) {
        self.events.on_event(SyncEvent::progress(message));
    }
}
