//! Command summaries in console or NDJSON form

use std::io::{self, Write};

use crossterm::style::Stylize;
use serde_json::json;

use remote_sync::application::{
    CleanupOutcome, CleanupResult, DatabaseSyncResult, FileSyncOutcome, FileSyncResult,
    SyncOutcome,
};
use remote_sync::config::ConfigWarning;
use remote_sync::domain::value_objects::{Direction, RemoteTarget, Snapshot};
use remote_sync::Config;

use crate::commands::CommandContext;

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}

fn emit_or_log(event: serde_json::Value) {
    if let Err(e) = emit(event) {
        tracing::warn!(error = %e, "failed to write JSON event");
    }
}

fn paint(text: &str, color: bool, style: fn(&str) -> String) -> String {
    if color {
        style(text)
    } else {
        text.to_string()
    }
}

fn green(text: &str) -> String {
    text.green().to_string()
}

fn yellow(text: &str) -> String {
    text.yellow().to_string()
}

fn bold(text: &str) -> String {
    text.bold().to_string()
}

fn dim(text: &str) -> String {
    text.dim().to_string()
}

pub fn print_config_warnings(warnings: &[ConfigWarning], json: bool, color: bool) {
    for w in warnings {
        if json {
            emit_or_log(json!({
                "event": "warning",
                "message": format!("unknown config key '{}'", w.key),
                "file": w.file.display().to_string(),
                "line": w.line,
            }));
            continue;
        }
        eprint!("{}", render_config_warning(w, color));
    }
}

fn render_config_warning(w: &ConfigWarning, color: bool) -> String {
    let location = match w.line {
        Some(line) => format!("{}:{}", w.file.display(), line),
        None => w.file.display().to_string(),
    };
    let mut out = paint(
        &format!("⚠ Unknown config key '{}' in {}", w.key, location),
        color,
        yellow,
    );
    out.push('\n');
    if let Some(suggestion) = &w.suggestion {
        out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
    }
    out
}

pub fn print_sync_header(
    direction: Direction,
    remote: &RemoteTarget,
    database: bool,
    files: bool,
    color: bool,
) {
    println!("{}", render_sync_header(direction, remote, database, files, color));
}

fn render_sync_header(
    direction: Direction,
    remote: &RemoteTarget,
    database: bool,
    files: bool,
    color: bool,
) -> String {
    let verb = match direction {
        Direction::Pull => "Pulling from",
        Direction::Push => "Pushing to",
    };
    let parts = match (database, files) {
        (true, true) => "database and files",
        (true, false) => "database",
        (false, true) => "files",
        (false, false) => "nothing",
    };
    format!(
        "{} [{}] ({}) {}",
        verb,
        paint(remote.name(), color, bold),
        remote.host(),
        paint(&format!("· {parts}"), color, dim)
    )
}

fn database_outcome(outcome: SyncOutcome) -> &'static str {
    match outcome {
        SyncOutcome::Completed => "completed",
        SyncOutcome::Cancelled => "cancelled",
    }
}

pub fn print_database_result(
    ctx: &CommandContext,
    direction: Direction,
    remote: &RemoteTarget,
    result: &DatabaseSyncResult,
) {
    if ctx.json {
        emit_or_log(json!({
            "event": "complete",
            "command": direction,
            "target": "database",
            "remote": remote.name(),
            "outcome": database_outcome(result.outcome),
            "state": result.final_state.as_str(),
            "snapshot": result.snapshot_name,
            "backup": result.backup_name,
            "kept_snapshot": result.kept_snapshot.as_ref().map(|p| p.display().to_string()),
            "warnings": result.warnings,
        }));
        return;
    }
    print!(
        "{}",
        render_database_result(direction, remote, result, ctx.caps.supports_color)
    );
}

fn render_database_result(
    direction: Direction,
    remote: &RemoteTarget,
    result: &DatabaseSyncResult,
    color: bool,
) -> String {
    if result.is_cancelled() {
        return "Database sync cancelled; nothing was changed.\n".to_string();
    }

    let headline = match direction {
        Direction::Pull => format!("Database pulled from [{}]", remote.name()),
        Direction::Push => format!("Database pushed to [{}]", remote.name()),
    };
    let mut out = paint(&headline, color, green);
    out.push('\n');
    out.push_str(&format!("  snapshot: {}\n", result.snapshot_name));
    if let Some(backup) = &result.backup_name {
        out.push_str(&format!("  backup:   {}\n", backup));
    }
    if let Some(kept) = &result.kept_snapshot {
        out.push_str(&format!("  kept:     {}\n", kept.display()));
    }
    if result.has_warnings() {
        let line = format!("  completed with {} warning(s)", result.warnings.len());
        out.push_str(&paint(&line, color, yellow));
        out.push('\n');
    }
    out
}

fn files_outcome(outcome: FileSyncOutcome) -> &'static str {
    match outcome {
        FileSyncOutcome::Completed => "completed",
        FileSyncOutcome::DryRun => "dry_run",
        FileSyncOutcome::Cancelled => "cancelled",
    }
}

pub fn print_files_result(
    ctx: &CommandContext,
    direction: Direction,
    remote: &RemoteTarget,
    result: &FileSyncResult,
) {
    if ctx.json {
        emit_or_log(json!({
            "event": "complete",
            "command": direction,
            "target": "files",
            "remote": remote.name(),
            "outcome": files_outcome(result.outcome),
            "files_to_transfer": result.plan.files_to_transfer,
            "files_to_delete": result.plan.files_to_delete,
            "synced": result.synced,
            "skipped": result.skipped,
            "warnings": result.warnings,
        }));
        return;
    }
    print!(
        "{}",
        render_files_result(direction, remote, result, ctx.caps.supports_color)
    );
}

fn render_files_result(
    direction: Direction,
    remote: &RemoteTarget,
    result: &FileSyncResult,
    color: bool,
) -> String {
    let plan = format!(
        "{} file(s) to transfer, {} to delete",
        result.plan.files_to_transfer, result.plan.files_to_delete
    );
    match result.outcome {
        FileSyncOutcome::DryRun => format!("Dry run: {plan}\n"),
        FileSyncOutcome::Cancelled => "File sync cancelled; nothing was transferred.\n".to_string(),
        FileSyncOutcome::Completed if result.synced.is_empty() => "No files synced.\n".to_string(),
        FileSyncOutcome::Completed => {
            let headline = match direction {
                Direction::Pull => format!(
                    "Pulled {} path(s) from [{}]",
                    result.synced.len(),
                    remote.name()
                ),
                Direction::Push => format!(
                    "Pushed {} path(s) to [{}]",
                    result.synced.len(),
                    remote.name()
                ),
            };
            let mut out = paint(&headline, color, green);
            out.push('\n');
            if !result.skipped.is_empty() {
                out.push_str(&format!("  skipped: {}\n", result.skipped.join(", ")));
            }
            out
        }
    }
}

fn cleanup_outcome(outcome: CleanupOutcome) -> &'static str {
    match outcome {
        CleanupOutcome::Completed => "completed",
        CleanupOutcome::NothingToDelete => "nothing_to_delete",
        CleanupOutcome::DryRun => "dry_run",
        CleanupOutcome::Cancelled => "cancelled",
    }
}

fn names(list: &[Snapshot]) -> Vec<String> {
    list.iter().map(|s| s.name.clone()).collect()
}

pub fn print_cleanup_result(ctx: &CommandContext, result: &CleanupResult) {
    if ctx.json {
        emit_or_log(json!({
            "event": "complete",
            "command": "cleanup-snapshots",
            "outcome": cleanup_outcome(result.outcome),
            "local_selected": names(&result.local_selected),
            "remote_selected": names(&result.remote_selected),
            "deleted": names(&result.deleted),
            "failed": result
                .failed
                .iter()
                .map(|f| json!({ "name": f.snapshot.name, "reason": f.reason }))
                .collect::<Vec<_>>(),
        }));
        return;
    }
    print!(
        "{}",
        render_cleanup_result(result, ctx.caps.supports_color)
    );
}

fn render_cleanup_result(result: &CleanupResult, color: bool) -> String {
    match result.outcome {
        CleanupOutcome::NothingToDelete => String::new(),
        CleanupOutcome::Cancelled => "Cleanup cancelled; nothing was deleted.\n".to_string(),
        CleanupOutcome::DryRun => format!(
            "Dry run: {} snapshot(s) would be deleted\n",
            result.selected_count()
        ),
        CleanupOutcome::Completed => {
            let line = format!("Deleted {} snapshot(s)", result.deleted.len());
            let mut out = paint(&line, color, green);
            out.push('\n');
            if result.has_failures() {
                let line = format!("  {} deletion(s) failed", result.failed.len());
                out.push_str(&paint(&line, color, yellow));
                out.push('\n');
            }
            out
        }
    }
}

/// Human-readable remote table, default remote marked with `*`
pub fn render_remotes(config: &Config, color: bool) -> String {
    if config.remotes.is_empty() {
        return "No remotes configured. Add a [remotes.<name>] table to remote-sync.toml.\n"
            .to_string();
    }

    let width = config.remotes.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (name, remote) in &config.remotes {
        let marker = if *name == config.default { "*" } else { " " };
        let padded = format!("{name:<width$}");
        let host = remote.host.as_deref().unwrap_or("<no host>");
        let path = remote.path.as_deref().unwrap_or("<no path>");
        let push = if remote.push_allowed {
            paint("push allowed", color, yellow)
        } else {
            paint("pull only", color, dim)
        };
        out.push_str(&format!(
            "{} {}  {}:{}  {}\n",
            marker,
            paint(&padded, color, bold),
            host,
            path,
            push
        ));
    }
    out
}
