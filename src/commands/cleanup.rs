//! Snapshot cleanup command handler

use std::sync::Arc;

use anyhow::{bail, Result};

use remote_sync::application::{CleanupRequest, CleanupUseCase};
use remote_sync::infrastructure::{FsSnapshotStore, SshTransport};

use crate::cli::CleanupArgs;
use crate::commands::CommandContext;
use crate::ui::output;

/// Both collections when neither `--local` nor `--remote` is given
pub fn scopes(local: bool, remote: bool) -> (bool, bool) {
    if !local && !remote {
        (true, true)
    } else {
        (local, remote)
    }
}

pub fn cmd_cleanup(ctx: &CommandContext, args: &CleanupArgs) -> Result<()> {
    let config = &ctx.config;
    let (local, remote) = scopes(args.local, args.remote);
    let keep = args.keep.unwrap_or(config.snapshots.keep);

    let remote = if remote {
        Some(config.remote(args.remote_name.as_deref())?)
    } else {
        None
    };

    let use_case = CleanupUseCase::new(
        Arc::new(SshTransport::new()),
        Arc::new(FsSnapshotStore::new(config.snapshot_directory())),
        config.remote_commands(),
    )
    .with_confirmer(ctx.confirmer())
    .with_events(Arc::clone(&ctx.events));

    let request = CleanupRequest::new(keep)
        .with_local(local)
        .with_remote(remote)
        .with_dry_run(args.dry_run)
        .with_skip_confirmation(ctx.yes)
        .with_timeouts(config.timeouts.clone());

    let result = use_case.execute(&request)?;
    output::print_cleanup_result(ctx, &result);

    if result.has_failures() {
        bail!(
            "{} of {} snapshot deletions failed",
            result.failed.len(),
            result.selected_count()
        );
    }
    Ok(())
}
