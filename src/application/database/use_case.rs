//! Database Sync Use Case
//!
//! Drives a database snapshot from one side to the other:
//! 1. Pre-flight: production guard, push permission, layout probe, driver gate
//! 2. Name the transfer snapshot and ask for confirmation
//! 3. Create, move and load the snapshot
//! 4. Clean up both sides
//!
//! Steps run strictly in order. Every failure after an artifact exists
//! leaves cleanup to the [`CleanupGuard`], which also answers interrupts.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use crate::application::layout::resolve_layout;
use crate::domain::ports::{
    CommandOutput, ConfirmationRequest, Confirmer, DeclineAll, Endpoint, InterruptHook,
    LocalDatabase, NoopEventSink, NoopInterruptHook, SnapshotStore, SyncEvent, SyncEventSink,
    TransferOptions, TransportGateway,
};
use crate::domain::services::{check_drivers, DriverCheck, RemoteCommands};
use crate::domain::value_objects::{
    generate_snapshot_name, local_backup_name, remote_backup_name, Direction, LifecycleState,
    RemoteTarget, SyncTarget,
};
use crate::error::{SyncError, SyncResult};

use super::guard::{CleanupGuard, Janitor};
use super::options::SyncRequest;
use super::result::{DatabaseSyncResult, SyncOutcome};

/// Current lifecycle state, mirrored to the event sink
struct Lifecycle<'a> {
    state: LifecycleState,
    events: &'a dyn SyncEventSink,
}

impl<'a> Lifecycle<'a> {
    fn new(events: &'a dyn SyncEventSink) -> Self {
        Self {
            state: LifecycleState::Idle,
            events,
        }
    }

    fn advance(&mut self, next: LifecycleState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(from = %self.state, to = %next, "lifecycle transition");
        self.state = next;
        self.events.on_event(SyncEvent::StateChanged { state: next });
    }
}

/// Database pull/push use case
pub struct DatabaseSyncUseCase<T, D, S>
where
    T: TransportGateway + 'static,
    D: LocalDatabase,
    S: SnapshotStore + 'static,
{
    transport: Arc<T>,
    database: D,
    store: Arc<S>,
    commands: RemoteCommands,
    confirmer: Arc<dyn Confirmer>,
    events: Arc<dyn SyncEventSink>,
    interrupt: Arc<dyn InterruptHook>,
}

impl<T, D, S> DatabaseSyncUseCase<T, D, S>
where
    T: TransportGateway + 'static,
    D: LocalDatabase,
    S: SnapshotStore + 'static,
{
    pub fn new(transport: Arc<T>, database: D, store: Arc<S>, commands: RemoteCommands) -> Self {
        Self {
            transport,
            database,
            store,
            commands,
            confirmer: Arc::new(DeclineAll),
            events: Arc::new(NoopEventSink),
            interrupt: Arc::new(NoopInterruptHook),
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

    pub fn with_interrupt_hook(mut self, hook: Arc<dyn InterruptHook>) -> Self {
        self.interrupt = hook;
        self
    }

    #[cfg(test)]
    pub(super) fn database(&self) -> &D {
        &self.database
    }

    /// Run one pull or push
    ///
    /// A declined confirmation is `Ok` with [`SyncOutcome::Cancelled`].
    pub fn execute(&self, request: &SyncRequest) -> SyncResult<DatabaseSyncResult> {
        let mut lifecycle = Lifecycle::new(self.events.as_ref());

        let outcome = match request.direction {
            Direction::Pull => self.pull(request, &mut lifecycle),
            Direction::Push => self.push(request, &mut lifecycle),
        };

        match outcome {
            Ok(mut result) => {
                result.final_state = lifecycle.state;
                Ok(result)
            }
            Err(err) => {
                tracing::debug!(error = %err, state = %lifecycle.state, "database sync failed");
                lifecycle.advance(LifecycleState::Failed);
                Err(err)
            }
        }
    }

    fn pull(
        &self,
        request: &SyncRequest,
        lifecycle: &mut Lifecycle<'_>,
    ) -> SyncResult<DatabaseSyncResult> {
        let mut warnings = Vec::new();
        let remote = self.preflight(request, lifecycle, &mut warnings)?;

        let name = generate_snapshot_name(Local::now());
        lifecycle.advance(LifecycleState::NameGenerated);
        let mut result = DatabaseSyncResult::new(name.clone());

        if !self.confirmed(request, &remote) {
            return Ok(self.cancelled(result, warnings, lifecycle));
        }
        lifecycle.advance(LifecycleState::Confirmed);

        let guard = self.arm_guard(&remote, request);
        self.store.ensure_directory()?;

        if request.backup {
            result.backup_name = self.create_local_backup(request, &mut warnings);
        }

        self.progress(format!("Creating snapshot on [{}]", remote.name()));
        let command = self.commands.create_snapshot(
            &remote,
            &name,
            request.snapshot_exclusions(),
            request.compress,
        );
        let output = self.run_remote(&remote, &command, request.timeouts.snapshot_create());
        if !output.success {
            return Err(SyncError::transport(
                "create remote snapshot",
                output.diagnostic(),
            ));
        }
        guard.track_remote_snapshot(&name);
        lifecycle.advance(LifecycleState::RemoteSnapshotCreated);

        self.progress(format!("Downloading snapshot from [{}]", remote.name()));
        let local_file = self.store.file_path(&name);
        let output = self.transport.transfer_files(
            &Endpoint::remote(&remote, self.commands.snapshot_file(&remote, &name)),
            &Endpoint::Local(local_file.clone()),
            &TransferOptions::snapshot(),
            request.timeouts.snapshot_download(),
        );
        if !output.success {
            return Err(SyncError::transport("download snapshot", output.diagnostic()));
        }
        lifecycle.advance(LifecycleState::Downloaded);

        self.progress("Loading snapshot into the local database");
        self.load_locally(&name, request, &mut warnings)?;
        lifecycle.advance(LifecycleState::Loaded);

        if request.keep_snapshot {
            result.kept_snapshot = Some(local_file);
        } else {
            self.remove_local_file(&local_file, &mut warnings);
        }
        warnings.extend(guard.release());
        lifecycle.advance(LifecycleState::CleanedUp);

        self.progress(format!("Database pulled from [{}]", remote.name()));
        lifecycle.advance(LifecycleState::Done);
        result.warnings = warnings;
        Ok(result)
    }

    fn push(
        &self,
        request: &SyncRequest,
        lifecycle: &mut Lifecycle<'_>,
    ) -> SyncResult<DatabaseSyncResult> {
        let mut warnings = Vec::new();
        let remote = self.preflight(request, lifecycle, &mut warnings)?;

        let name = generate_snapshot_name(Local::now());
        lifecycle.advance(LifecycleState::NameGenerated);
        let mut result = DatabaseSyncResult::new(name.clone());

        if !self.confirmed(request, &remote) {
            return Ok(self.cancelled(result, warnings, lifecycle));
        }
        lifecycle.advance(LifecycleState::Confirmed);

        let guard = self.arm_guard(&remote, request);

        // The backup is kept on purpose, so the guard never tracks it
        let backup = remote_backup_name(Local::now());
        self.progress(format!("Creating backup on [{}]: {}", remote.name(), backup));
        let command = self.commands.create_snapshot(
            &remote,
            &backup,
            &request.excluded_tables,
            request.compress,
        );
        let output = self.run_remote(&remote, &command, request.timeouts.snapshot_create());
        if !output.success {
            return Err(SyncError::transport(
                "create remote backup",
                output.diagnostic(),
            ));
        }
        result.backup_name = Some(backup);

        self.store.ensure_directory()?;
        self.progress(format!("Creating local snapshot: {name}"));
        let output = self.database.create_snapshot(
            &name,
            request.snapshot_exclusions(),
            request.compress,
        );
        if !output.success {
            return Err(SyncError::transport(
                "create local snapshot",
                output.diagnostic(),
            ));
        }
        let local_file = self.store.file_path(&name);
        guard.track_local_file(local_file.clone());
        lifecycle.advance(LifecycleState::LocalSnapshotCreated);

        self.progress(format!("Uploading snapshot to [{}]", remote.name()));
        let output = self.transport.transfer_files(
            &Endpoint::Local(local_file),
            &Endpoint::remote(&remote, format!("{}/", self.commands.snapshot_dir(&remote))),
            &TransferOptions::snapshot(),
            request.timeouts.snapshot_upload(),
        );
        if !output.success {
            return Err(SyncError::transport("upload snapshot", output.diagnostic()));
        }
        guard.track_remote_snapshot(&name);
        lifecycle.advance(LifecycleState::Uploaded);

        self.progress(format!("Loading snapshot on [{}]", remote.name()));
        let command = self.commands.load_snapshot(&remote, &name);
        let output = self.run_remote(&remote, &command, request.timeouts.snapshot_create());
        if !output.success {
            return Err(SyncError::LoadFailure {
                snapshot: name,
                diagnostic: output.diagnostic(),
            });
        }
        lifecycle.advance(LifecycleState::Loaded);

        warnings.extend(guard.release());
        lifecycle.advance(LifecycleState::CleanedUp);

        self.progress(format!("Database pushed to [{}]", remote.name()));
        lifecycle.advance(LifecycleState::Done);
        result.warnings = warnings;
        Ok(result)
    }

    /// Checks that run before anything is created
    fn preflight(
        &self,
        request: &SyncRequest,
        lifecycle: &mut Lifecycle<'_>,
        warnings: &mut Vec<String>,
    ) -> SyncResult<RemoteTarget> {
        if request.local_is_production {
            return Err(SyncError::ProductionEnvironment);
        }
        if request.direction == Direction::Push && !request.remote.push_allowed() {
            return Err(SyncError::PushNotAllowed {
                name: request.remote.name().to_string(),
            });
        }

        let remote = resolve_layout(
            self.transport.as_ref(),
            &self.commands,
            &request.remote,
            request.timeouts.probe(),
        )?;
        self.check_compatibility(&remote, request, warnings)?;
        lifecycle.advance(LifecycleState::CompatibilityChecked);
        Ok(remote)
    }

    fn check_compatibility(
        &self,
        remote: &RemoteTarget,
        request: &SyncRequest,
        warnings: &mut Vec<String>,
    ) -> SyncResult<()> {
        let output = self.run_remote(
            remote,
            &self.commands.detect_driver(remote),
            request.timeouts.probe(),
        );
        let detected = if output.success {
            output
                .stdout
                .lines()
                .map(str::trim)
                .rev()
                .find(|line| !line.is_empty())
                .map(str::to_string)
        } else {
            None
        };

        let local = self.database.driver();
        match check_drivers(&local, detected.as_deref())? {
            DriverCheck::Compatible => {
                tracing::debug!(%local, remote = ?detected, "database drivers compatible");
            }
            DriverCheck::RemoteUndetected => self.warn(
                warnings,
                format!(
                    "could not detect the database driver on [{}]; proceeding optimistically",
                    remote.name()
                ),
            ),
        }
        Ok(())
    }

    fn confirmed(&self, request: &SyncRequest, remote: &RemoteTarget) -> bool {
        request.skip_confirmation
            || self.confirmer.confirm(&ConfirmationRequest::Overwrite {
                remote: remote.name().to_string(),
                direction: request.direction,
                target: SyncTarget::Database,
            })
    }

    fn cancelled(
        &self,
        mut result: DatabaseSyncResult,
        warnings: Vec<String>,
        lifecycle: &mut Lifecycle<'_>,
    ) -> DatabaseSyncResult {
        self.progress("Operation cancelled");
        lifecycle.advance(LifecycleState::Cancelled);
        result.outcome = SyncOutcome::Cancelled;
        result.warnings = warnings;
        result
    }

    fn arm_guard(&self, remote: &RemoteTarget, request: &SyncRequest) -> CleanupGuard<T, S> {
        let janitor = Janitor {
            transport: Arc::clone(&self.transport),
            store: Arc::clone(&self.store),
            remote: remote.clone(),
            commands: self.commands.clone(),
            timeout: request.timeouts.snapshot_cleanup(),
            events: Arc::clone(&self.events),
        };
        CleanupGuard::arm(janitor, Arc::clone(&self.interrupt))
    }

    /// Local safety net before a pull; failure is surfaced but not fatal
    fn create_local_backup(
        &self,
        request: &SyncRequest,
        warnings: &mut Vec<String>,
    ) -> Option<String> {
        let backup = local_backup_name(Local::now());
        self.progress(format!("Creating local backup: {backup}"));

        let output = self.database.create_snapshot(&backup, &[], request.compress);
        if output.success {
            return Some(backup);
        }

        self.warn(
            warnings,
            format!("local backup failed: {}", output.diagnostic()),
        );
        None
    }

    fn load_locally(
        &self,
        name: &str,
        request: &SyncRequest,
        warnings: &mut Vec<String>,
    ) -> SyncResult<()> {
        let load_failure = |diagnostic: String| SyncError::LoadFailure {
            snapshot: name.to_string(),
            diagnostic,
        };

        // With nothing excluded the tool can drop everything itself; otherwise
        // only the non-excluded tables go and the excluded ones stay untouched.
        let tool_drops = request.import_mode.is_full() && request.excluded_tables.is_empty();

        if request.import_mode.is_full() && !tool_drops {
            let doomed: Vec<String> = self
                .database
                .table_names()
                .map_err(|e| load_failure(e.to_string()))?
                .into_iter()
                .filter(|table| !request.excluded_tables.contains(table))
                .collect();

            if !doomed.is_empty() {
                tracing::debug!(count = doomed.len(), "dropping local tables before full import");
                let output = self.database.drop_tables(&doomed);
                if !output.success {
                    return Err(load_failure(output.diagnostic()));
                }
            }
        }

        let output = self.database.load_snapshot(name, tool_drops);
        if !output.success {
            return Err(load_failure(output.diagnostic()));
        }

        if !request.import_mode.is_full() {
            self.truncate_excluded(request, warnings);
        }
        Ok(())
    }

    /// Empty excluded tables so they exist without stale rows
    fn truncate_excluded(&self, request: &SyncRequest, warnings: &mut Vec<String>) {
        if request.excluded_tables.is_empty() {
            return;
        }

        let existing = match self.database.table_names() {
            Ok(tables) => tables,
            Err(e) => {
                self.warn(warnings, format!("could not list local tables: {e}"));
                return;
            }
        };

        let targets: Vec<String> = request
            .excluded_tables
            .iter()
            .filter(|table| existing.contains(table))
            .cloned()
            .collect();
        if targets.is_empty() {
            return;
        }

        let output = self.database.truncate_tables(&targets);
        if !output.success {
            self.warn(
                warnings,
                format!("failed to truncate excluded tables: {}", output.diagnostic()),
            );
        }
    }

    fn remove_local_file(&self, path: &Path, warnings: &mut Vec<String>) {
        match self.store.delete(path) {
            Ok(()) => self.progress("Local snapshot file removed"),
            Err(e) => self.warn(
                warnings,
                format!("failed to remove local snapshot {}: {}", path.display(), e),
            ),
        }
    }

    fn run_remote(&self, remote: &RemoteTarget, command: &str, timeout: Duration) -> CommandOutput {
        tracing::debug!(remote = %remote, %command, "running remote command");
        self.transport.run_remote_command(remote, command, timeout)
    }

    fn progress(&self, message: impl Into<String>) {
        self.events.on_event(SyncEvent::progress(message));
    }

    fn warn(&self, warnings: &mut Vec<String>, message: String) {
        tracing::warn!("{message}");
        self.events.on_event(SyncEvent::warning(message.clone()));
        warnings.push(message);
    }
}
