//! File Sync Use Case
//!
//! Pulls or pushes storage directories:
//! 1. Validate every requested path against the storage root
//! 2. Preview the changes with a dry run
//! 3. Confirm (twice for a mirror-deletion push)
//! 4. Transfer path by path, stopping at the first failure

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::layout::resolve_layout;
use crate::domain::ports::{
    ConfirmationRequest, Confirmer, DeclineAll, Endpoint, NoopEventSink, SyncEvent,
    SyncEventSink, TransferOptions, TransportGateway,
};
use crate::domain::services::{RemoteCommands, TransferPlan};
use crate::domain::value_objects::{Direction, RemoteTarget, StoragePath, SyncTarget};
use crate::error::{SyncError, SyncResult};

use super::options::FileSyncRequest;
use super::result::{FileSyncOutcome, FileSyncResult};

/// File pull/push use case
pub struct FileSyncUseCase<T>
where
    T: TransportGateway,
{
    transport: Arc<T>,
    commands: RemoteCommands,
    confirmer: Arc<dyn Confirmer>,
    events: Arc<dyn SyncEventSink>,
}

impl<T> FileSyncUseCase<T>
where
    T: TransportGateway,
{
    pub fn new(transport: Arc<T>, commands: RemoteCommands) -> Self {
        Self {
            transport,
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

    pub fn execute(&self, request: &FileSyncRequest) -> SyncResult<FileSyncResult> {
        if request.local_is_production {
            return Err(SyncError::ProductionEnvironment);
        }
        if request.direction == Direction::Push && !request.remote.push_allowed() {
            return Err(SyncError::PushNotAllowed {
                name: request.remote.name().to_string(),
            });
        }

        let mut result = FileSyncResult::new();
        if request.paths.is_empty() {
            self.warn(&mut result, "no paths configured for file sync".to_string());
            return Ok(result);
        }

        let remote = resolve_layout(
            self.transport.as_ref(),
            &self.commands,
            &request.remote,
            request.timeouts.probe(),
        )?;

        let targets = self.validate(request, &mut result)?;
        if targets.is_empty() {
            return Ok(result);
        }

        result.plan = self.preview(request, &remote, &targets, &mut result.warnings)?;
        self.events
            .on_event(SyncEvent::PreviewReady { plan: result.plan });

        if request.dry_run {
            self.progress("Dry run: no files were changed");
            result.outcome = FileSyncOutcome::DryRun;
            return Ok(result);
        }

        if !self.confirmed(request, &remote) {
            self.progress("Operation cancelled");
            result.outcome = FileSyncOutcome::Cancelled;
            return Ok(result);
        }

        for path in &targets {
            self.events.on_event(SyncEvent::PathStarted {
                path: path.relative().to_string(),
                direction: request.direction,
            });

            let (source, destination) = endpoints(&remote, path, request.direction);
            let output = self.transport.transfer_files(
                &source,
                &destination,
                &TransferOptions::tree(&request.excludes, request.delete),
                request.timeouts.file_sync(),
            );
            if !output.success {
                return Err(SyncError::transport(
                    format!("{} of '{}'", request.direction, path),
                    output.diagnostic(),
                ));
            }

            tracing::debug!(path = %path, direction = %request.direction, "path synced");
            result.synced.push(path.relative().to_string());
        }

        self.progress(match request.direction {
            Direction::Pull => format!("Files pulled from [{}]", remote.name()),
            Direction::Push => format!("Files pushed to [{}]", remote.name()),
        });
        Ok(result)
    }

    /// Resolve every path before anything is transferred
    ///
    /// Pull creates missing local directories (outside dry runs); push skips
    /// paths with no local directory.
    fn validate(
        &self,
        request: &FileSyncRequest,
        result: &mut FileSyncResult,
    ) -> SyncResult<Vec<StoragePath>> {
        let mut targets = Vec::with_capacity(request.paths.len());

        for raw in &request.paths {
            let path = StoragePath::resolve(&request.storage_root, raw)?;

            match request.direction {
                Direction::Pull => {
                    if !request.dry_run {
                        fs::create_dir_all(path.local_path())?;
                    }
                }
                Direction::Push => {
                    if !path.local_path().is_dir() {
                        self.warn(result, format!("local path does not exist: {path}"));
                        result.skipped.push(path.relative().to_string());
                        continue;
                    }
                }
            }

            targets.push(path);
        }

        Ok(targets)
    }

    /// Sum the dry-run reports of every path
    ///
    /// In dry-run mode the preview is the whole operation, so a failed report
    /// is an error; otherwise it only costs accuracy and is a warning.
    fn preview(
        &self,
        request: &FileSyncRequest,
        remote: &RemoteTarget,
        targets: &[StoragePath],
        warnings: &mut Vec<String>,
    ) -> SyncResult<TransferPlan> {
        let mut plan = TransferPlan::default();
        let options = TransferOptions::tree(&request.excludes, request.delete).with_dry_run(true);

        for path in targets {
            let (source, destination) = endpoints(remote, path, request.direction);
            let output = self.transport.transfer_files(
                &source,
                &destination,
                &options,
                request.timeouts.dry_run(),
            );

            if output.success {
                plan += TransferPlan::from_report(&output.stdout);
            } else if request.dry_run {
                return Err(SyncError::transport(
                    format!("dry run of '{path}'"),
                    output.diagnostic(),
                ));
            } else {
                let message = format!("could not preview '{}': {}", path, output.diagnostic());
                tracing::warn!("{message}");
                self.events.on_event(SyncEvent::warning(message.clone()));
                warnings.push(message);
            }
        }

        Ok(plan)
    }

    fn confirmed(&self, request: &FileSyncRequest, remote: &RemoteTarget) -> bool {
        let general = request.skip_confirmation
            || self.confirmer.confirm(&ConfirmationRequest::Overwrite {
                remote: remote.name().to_string(),
                direction: request.direction,
                target: SyncTarget::Files,
            });
        if !general {
            return false;
        }

        // Irreversible on the remote, so never covered by skip_confirmation
        if request.direction == Direction::Push && request.delete {
            return self.confirmer.confirm(&ConfirmationRequest::MirrorDelete {
                remote: remote.name().to_string(),
            });
        }

        true
    }

    fn progress(&self, message: impl Into<String>) {
        self.events.on_event(SyncEvent::progress(message));
    }

    fn warn(&self, result: &mut FileSyncResult, message: String) {
        tracing::warn!("{message}");
        self.events.on_event(SyncEvent::warning(message.clone()));
        result.warnings.push(message);
    }
}

/// Source and destination of one path transfer
fn endpoints(
    remote: &RemoteTarget,
    path: &StoragePath,
    direction: Direction,
) -> (Endpoint, Endpoint) {
    let remote_end = Endpoint::remote(remote, path.remote_dir_arg(&remote.storage_path()));
    let local_end = Endpoint::Local(PathBuf::from(path.local_dir_arg()));

    match direction {
        Direction::Pull => (remote_end, local_end),
        Direction::Push => (local_end, remote_end),
    }
}
