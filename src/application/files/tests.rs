//! File Sync Use Case Tests

use super::*;
use crate::application::test_support::{CollectingSink, MockTransport, ScriptedConfirmer};
use crate::domain::ports::{CommandOutput, ConfirmationRequest, Endpoint, SyncEvent};
use crate::domain::services::{RemoteCommands, TransferPlan};
use crate::domain::value_objects::{Direction, RemoteTarget};
use crate::error::SyncError;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

const PREVIEW: &str = ">f+++++++++ a/b.txt\n*deleting c/d.txt\ncd+++++++++ e/\n";

fn remote(push_allowed: bool) -> RemoteTarget {
    RemoteTarget::new("staging", "deploy@staging.example.com", "/var/www/app", push_allowed)
        .unwrap()
}

fn flat_transport() -> MockTransport {
    MockTransport::new().respond("test -d", CommandOutput::ok("no\n"))
}

struct Harness {
    storage: TempDir,
    transport: Arc<MockTransport>,
    events: Arc<CollectingSink>,
    confirmer: Arc<ScriptedConfirmer>,
}

impl Harness {
    fn new(transport: MockTransport) -> Self {
        Self {
            storage: tempdir().unwrap(),
            transport: Arc::new(transport),
            events: Arc::new(CollectingSink::default()),
            confirmer: Arc::new(ScriptedConfirmer::always(true)),
        }
    }

    fn confirming(mut self, confirmer: ScriptedConfirmer) -> Self {
        self.confirmer = Arc::new(confirmer);
        self
    }

    fn root(&self) -> PathBuf {
        self.storage.path().to_path_buf()
    }

    fn use_case(&self) -> FileSyncUseCase<MockTransport> {
        FileSyncUseCase::new(
            Arc::clone(&self.transport),
            RemoteCommands::new("php artisan", "snapshots"),
        )
        .with_confirmer(self.confirmer.clone())
        .with_events(self.events.clone())
    }

    fn pull(&self, paths: &[&str]) -> FileSyncRequest {
        FileSyncRequest::new(remote(false), Direction::Pull, self.root())
            .with_paths(paths.iter().map(|p| p.to_string()).collect())
    }

    fn push(&self, paths: &[&str]) -> FileSyncRequest {
        FileSyncRequest::new(remote(true), Direction::Push, self.root())
            .with_paths(paths.iter().map(|p| p.to_string()).collect())
    }

    /// Transfers that moved files (dry runs excluded)
    fn real_transfers(&self) -> Vec<(Endpoint, Endpoint)> {
        self.transport
            .transfers()
            .into_iter()
            .filter(|t| !t.options.dry_run)
            .map(|t| (t.source, t.destination))
            .collect()
    }
}

#[test]
fn pull_creates_local_directory_and_transfers() {
    let h = Harness::new(flat_transport());

    let result = h.use_case().execute(&h.pull(&["app/public"])).unwrap();

    assert_eq!(result.outcome, FileSyncOutcome::Completed);
    assert_eq!(result.synced, vec!["app/public".to_string()]);
    assert!(h.storage.path().join("app/public").is_dir());

    let transfers = h.real_transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(
        transfers[0].0,
        Endpoint::Remote {
            host: "deploy@staging.example.com".to_string(),
            path: "/var/www/app/storage/app/public/".to_string(),
        }
    );
    assert_eq!(
        transfers[0].1,
        Endpoint::Local(PathBuf::from(format!(
            "{}/",
            h.storage.path().join("app/public").display()
        )))
    );
}

#[test]
fn pull_uses_atomic_storage_path() {
    let h = Harness::new(MockTransport::new().respond("test -d", CommandOutput::ok("yes\n")));

    h.use_case().execute(&h.pull(&["app"])).unwrap();

    match &h.real_transfers()[0].0 {
        Endpoint::Remote { path, .. } => {
            assert_eq!(path, "/var/www/app/current/storage/app/")
        }
        other => panic!("expected remote source, got {other:?}"),
    }
}

#[test]
fn traversal_is_rejected_before_any_transfer() {
    let h = Harness::new(flat_transport());

    let err = h
        .use_case()
        .execute(&h.pull(&["app", "../../etc"]))
        .unwrap_err();

    assert!(matches!(err, SyncError::PathTraversal { .. }));
    assert!(h.transport.transfers().is_empty());
}

#[test]
fn push_skips_missing_local_directory() {
    let h = Harness::new(flat_transport());
    fs::create_dir_all(h.storage.path().join("app")).unwrap();

    let result = h
        .use_case()
        .execute(&h.push(&["app", "missing"]))
        .unwrap();

    assert_eq!(result.synced, vec!["app".to_string()]);
    assert_eq!(result.skipped, vec!["missing".to_string()]);
    assert!(result
        .warnings
        .iter()
        .any(|w| w == "local path does not exist: missing"));

    let transfers = h.real_transfers();
    assert_eq!(transfers.len(), 1);
    assert!(matches!(transfers[0].0, Endpoint::Local(_)));
}

#[test]
fn push_requires_permission() {
    let h = Harness::new(flat_transport());
    fs::create_dir_all(h.storage.path().join("app")).unwrap();
    let request = FileSyncRequest::new(remote(false), Direction::Push, h.root())
        .with_paths(vec!["app".to_string()]);

    let err = h.use_case().execute(&request).unwrap_err();

    assert!(matches!(err, SyncError::PushNotAllowed { .. }));
    assert!(h.transport.commands().is_empty());
}

#[test]
fn refuses_in_production() {
    let h = Harness::new(flat_transport());

    let err = h
        .use_case()
        .execute(&h.pull(&["app"]).with_local_production(true))
        .unwrap_err();

    assert!(matches!(err, SyncError::ProductionEnvironment));
    assert!(h.transport.transfers().is_empty());
}

#[test]
fn no_paths_is_a_warning() {
    let h = Harness::new(flat_transport());

    let result = h.use_case().execute(&h.pull(&[])).unwrap();

    assert_eq!(result.warnings, vec!["no paths configured for file sync".to_string()]);
    assert!(h.transport.commands().is_empty());
}

#[test]
fn dry_run_reports_plan_without_transferring() {
    let h = Harness::new(flat_transport().then_transfer(CommandOutput::ok(PREVIEW)));

    let result = h
        .use_case()
        .execute(&h.pull(&["app"]).with_dry_run(true))
        .unwrap();

    assert_eq!(result.outcome, FileSyncOutcome::DryRun);
    assert_eq!(
        result.plan,
        TransferPlan {
            files_to_transfer: 1,
            files_to_delete: 1,
        }
    );
    assert!(h.real_transfers().is_empty());
    assert!(h.confirmer.requests().is_empty());
    assert!(!h.storage.path().join("app").exists());
    assert!(h
        .events
        .events()
        .contains(&SyncEvent::PreviewReady { plan: result.plan }));
}

#[test]
fn dry_run_failure_is_an_error() {
    let h = Harness::new(
        flat_transport().then_transfer(CommandOutput::failed("connection refused")),
    );

    let err = h
        .use_case()
        .execute(&h.pull(&["app"]).with_dry_run(true))
        .unwrap_err();

    assert_eq!(err.to_string(), "dry run of 'app' failed: connection refused");
}

#[test]
fn preview_failure_outside_dry_run_is_a_warning() {
    let h = Harness::new(flat_transport().then_transfer(CommandOutput::failed("timed out")));

    let result = h.use_case().execute(&h.pull(&["app"])).unwrap();

    assert_eq!(result.outcome, FileSyncOutcome::Completed);
    assert!(result.warnings[0].starts_with("could not preview 'app'"));
    assert_eq!(h.real_transfers().len(), 1);
}

#[test]
fn preview_accumulates_over_paths() {
    let h = Harness::new(
        flat_transport()
            .then_transfer(CommandOutput::ok(PREVIEW))
            .then_transfer(CommandOutput::ok(">f+++++++++ x.txt\n>f+++++++++ y.txt\n")),
    );

    let result = h
        .use_case()
        .execute(&h.pull(&["app", "uploads"]).with_dry_run(true))
        .unwrap();

    assert_eq!(result.plan.files_to_transfer, 3);
    assert_eq!(result.plan.files_to_delete, 1);
}

#[test]
fn dry_run_passes_excludes_and_delete() {
    let h = Harness::new(flat_transport());
    let request = h
        .pull(&["app"])
        .with_dry_run(true)
        .with_delete(true)
        .with_excludes(vec!["*.log".to_string()]);

    h.use_case().execute(&request).unwrap();

    let transfers = h.transport.transfers();
    assert_eq!(transfers.len(), 1);
    assert!(transfers[0].options.dry_run);
    assert!(transfers[0].options.delete);
    assert_eq!(transfers[0].options.excludes, vec!["*.log".to_string()]);
}

#[test]
fn declined_confirmation_transfers_nothing() {
    let h = Harness::new(flat_transport()).confirming(ScriptedConfirmer::always(false));

    let result = h.use_case().execute(&h.pull(&["app"])).unwrap();

    assert!(result.is_cancelled());
    assert!(h.real_transfers().is_empty());
}

#[test]
fn mirror_delete_push_asks_twice() {
    let h = Harness::new(flat_transport()).confirming(ScriptedConfirmer::answers(&[true, false]));
    fs::create_dir_all(h.storage.path().join("app")).unwrap();

    let result = h
        .use_case()
        .execute(&h.push(&["app"]).with_delete(true))
        .unwrap();

    assert!(result.is_cancelled());
    assert!(h.real_transfers().is_empty());
    assert_eq!(
        h.confirmer.requests()[1],
        ConfirmationRequest::MirrorDelete {
            remote: "staging".to_string()
        }
    );
}

#[test]
fn mirror_delete_is_asked_even_when_skipping_confirmation() {
    let h = Harness::new(flat_transport()).confirming(ScriptedConfirmer::always(false));
    fs::create_dir_all(h.storage.path().join("app")).unwrap();

    let result = h
        .use_case()
        .execute(
            &h.push(&["app"])
                .with_delete(true)
                .with_skip_confirmation(true),
        )
        .unwrap();

    assert!(result.is_cancelled());
    assert_eq!(h.confirmer.requests().len(), 1);
}

#[test]
fn pull_with_delete_asks_once() {
    let h = Harness::new(flat_transport());

    h.use_case()
        .execute(&h.pull(&["app"]).with_delete(true))
        .unwrap();

    assert_eq!(h.confirmer.requests().len(), 1);
}

#[test]
fn stops_at_first_failed_path() {
    let h = Harness::new(
        flat_transport()
            .then_transfer(CommandOutput::ok(""))
            .then_transfer(CommandOutput::ok(""))
            .then_transfer(CommandOutput::ok(""))
            .then_transfer(CommandOutput::failed("rsync error: code 23"))
            .then_transfer(CommandOutput::ok("")),
    );

    let err = h
        .use_case()
        .execute(&h.pull(&["app", "uploads", "media"]))
        .unwrap_err();

    assert_eq!(err.to_string(), "pull of 'uploads' failed: rsync error: code 23");
    // three previews, then app and the failed uploads
    assert_eq!(h.transport.transfers().len(), 5);
    let started: Vec<_> = h
        .events
        .events()
        .into_iter()
        .filter_map(|e| match e {
            SyncEvent::PathStarted { path, .. } => Some(path),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec!["app".to_string(), "uploads".to_string()]);
}
