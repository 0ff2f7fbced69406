use crossterm::style::Stylize;

use remote_sync::SyncError;

use crate::ui::output;
use crate::ui::terminal::detect_capabilities;

/// Follow-up advice for errors the user can fix
fn hint(err: &SyncError) -> Option<String> {
    match err {
        SyncError::UnknownRemote { .. } => {
            Some("Run `remote-sync remotes` to list configured remotes.".to_string())
        }
        SyncError::IncompleteRemote { name } => Some(format!(
            "Set both 'host' and 'path' under [remotes.{name}] in remote-sync.toml."
        )),
        SyncError::PushNotAllowed { name } => Some(format!(
            "Add 'push_allowed = true' under [remotes.{name}] if pushing is intended."
        )),
        SyncError::DriverMismatch { .. } => {
            Some("Snapshots can only move between databases of the same engine.".to_string())
        }
        SyncError::ProductionEnvironment => {
            Some("Set [local] environment to something other than 'production'.".to_string())
        }
        _ => None,
    }
}

pub fn format_error(err: &anyhow::Error, color: bool, unicode: bool) -> String {
    let icon = if unicode { "✗" } else { "[ERROR]" };
    let head = format!("{icon} Error: {err}");
    let mut out = if color {
        head.red().bold().to_string()
    } else {
        head
    };
    out.push('\n');

    let Some(sync_err) = err.downcast_ref::<SyncError>() else {
        return out;
    };
    let mut notes: Vec<String> = hint(sync_err).into_iter().collect();
    if sync_err.is_preflight() {
        notes.push("Nothing was changed.".to_string());
    }
    for note in notes {
        let line = format!("  {note}");
        if color {
            out.push_str(&line.dim().to_string());
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }
    out
}

/// `::error::` workflow command so failures surface in GitHub Actions
fn github_annotation(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error title=remote-sync::{escaped}")
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let _ = output::emit(serde_json::json!({
            "event": "error",
            "message": err.to_string(),
        }));
        return;
    }

    let caps = detect_capabilities();
    if caps.is_ci && std::env::var("GITHUB_ACTIONS").is_ok() {
        println!("{}", github_annotation(&err.to_string()));
    }

    eprint!(
        "{}",
        format_error(err, caps.supports_color, caps.supports_unicode)
    );
}
