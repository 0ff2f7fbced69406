//! Pull and push command handlers
//!
//! The database runs first; a failed or declined database sync stops before
//! any files move.

use std::sync::Arc;

use anyhow::Result;

use remote_sync::application::{
    DatabaseSyncResult, DatabaseSyncUseCase, FileSyncRequest, FileSyncResult, FileSyncUseCase,
    SyncRequest,
};
use remote_sync::domain::ports::{InterruptHook, SyncEvent};
use remote_sync::domain::value_objects::{Direction, ImportMode, RemoteTarget};
use remote_sync::infrastructure::{
    ArtisanDatabase, CtrlcInterruptHook, FsSnapshotStore, SshTransport,
};

use crate::cli::TransferArgs;
use crate::commands::CommandContext;
use crate::ui::output;

/// Pull-only database switches
#[derive(Debug, Clone, Copy)]
pub struct DatabaseOptions {
    pub full: bool,
    pub backup: bool,
    pub keep_snapshot: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            full: false,
            backup: true,
            keep_snapshot: false,
        }
    }
}

/// Which parts to sync when neither `--database` nor `--files` is given:
/// both for pull, database only for push
pub fn selection(direction: Direction, database: bool, files: bool) -> (bool, bool) {
    match (database, files) {
        (false, false) => (true, direction == Direction::Pull),
        selected => selected,
    }
}

pub fn cmd_sync(
    ctx: &CommandContext,
    direction: Direction,
    args: &TransferArgs,
    options: &DatabaseOptions,
) -> Result<()> {
    let remote = ctx.config.remote(args.remote.as_deref())?;
    let (database, files) = selection(direction, args.database, args.files);
    let transport = Arc::new(SshTransport::new().with_live_progress(ctx.live_progress()));

    if !ctx.json {
        output::print_sync_header(direction, &remote, database, files, ctx.caps.supports_color);
    }

    if database {
        if args.dry_run {
            ctx.events
                .on_event(SyncEvent::progress("Dry run: database sync skipped"));
        } else {
            let result = run_database(ctx, direction, &remote, options, &transport)?;
            output::print_database_result(ctx, direction, &remote, &result);
            if result.is_cancelled() {
                return Ok(());
            }
        }
    }

    if files {
        let result = run_files(ctx, direction, &remote, args, &transport)?;
        output::print_files_result(ctx, direction, &remote, &result);
    }

    Ok(())
}

fn run_database(
    ctx: &CommandContext,
    direction: Direction,
    remote: &RemoteTarget,
    options: &DatabaseOptions,
    transport: &Arc<SshTransport>,
) -> Result<DatabaseSyncResult> {
    let config = &ctx.config;
    let database = ArtisanDatabase::new(
        &config.snapshots.tool,
        &config.local.project_root,
        &config.local.driver,
        config.timeouts.snapshot_create(),
    );
    let store = Arc::new(FsSnapshotStore::new(config.snapshot_directory()));
    let hook: Arc<dyn InterruptHook> = Arc::new(CtrlcInterruptHook::install()?);

    let use_case = DatabaseSyncUseCase::new(
        Arc::clone(transport),
        database,
        store,
        config.remote_commands(),
    )
    .with_confirmer(ctx.confirmer())
    .with_events(Arc::clone(&ctx.events))
    .with_interrupt_hook(hook);

    let request = SyncRequest::new(remote.clone(), direction)
        .with_import_mode(ImportMode::from_full_flag(options.full))
        .with_backup(options.backup)
        .with_keep_snapshot(options.keep_snapshot)
        .with_skip_confirmation(ctx.yes)
        .with_local_production(config.local.is_production())
        .with_excluded_tables(config.exclude_tables.clone())
        .with_compress(config.snapshots.compress)
        .with_timeouts(config.timeouts.clone());

    Ok(use_case.execute(&request)?)
}

fn run_files(
    ctx: &CommandContext,
    direction: Direction,
    remote: &RemoteTarget,
    args: &TransferArgs,
    transport: &Arc<SshTransport>,
) -> Result<FileSyncResult> {
    let config = &ctx.config;
    let paths = if args.paths.is_empty() {
        config.paths.clone()
    } else {
        args.paths.clone()
    };

    let use_case = FileSyncUseCase::new(Arc::clone(transport), config.remote_commands())
        .with_confirmer(ctx.confirmer())
        .with_events(Arc::clone(&ctx.events));

    let request = FileSyncRequest::new(remote.clone(), direction, config.local.storage_root())
        .with_paths(paths)
        .with_excludes(config.exclude_paths.clone())
        .with_delete(args.delete)
        .with_dry_run(args.dry_run)
        .with_skip_confirmation(ctx.yes)
        .with_local_production(config.local.is_production())
        .with_timeouts(config.timeouts.clone());

    Ok(use_case.execute(&request)?)
}
