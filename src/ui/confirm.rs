//! Interactive confirmation gate

use crossterm::style::Stylize;
use dialoguer::{Confirm, Input};
use is_terminal::IsTerminal;

use remote_sync::domain::ports::{ConfirmationRequest, Confirmer};
use remote_sync::domain::value_objects::{Direction, SyncTarget};

/// Prompts on stdin; declines whenever there is no terminal to ask on
pub struct TerminalConfirmer {
    json: bool,
    color: bool,
}

impl TerminalConfirmer {
    pub fn new(json: bool, color: bool) -> Self {
        Self { json, color }
    }

    fn typed_yes(&self, warning: &str, prompt: &str) -> bool {
        let warning = if self.color {
            warning.yellow().bold().to_string()
        } else {
            warning.to_string()
        };
        eprintln!("{}", warning);

        let answer: Result<String, _> = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();
        matches!(answer, Ok(text) if text.trim() == "yes")
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        if self.json || !std::io::stdin().is_terminal() {
            tracing::debug!(?request, "no interactive terminal; declining");
            eprintln!("Confirmation required but no terminal is attached; rerun with --yes");
            return false;
        }

        match request {
            ConfirmationRequest::DeleteSnapshots { .. } => Confirm::new()
                .with_prompt(prompt_text(request))
                .default(false)
                .interact()
                .unwrap_or(false),
            _ => self.typed_yes(&prompt_text(request), "Type 'yes' to continue"),
        }
    }
}

/// Wording shown before the answer is read
pub fn prompt_text(request: &ConfirmationRequest) -> String {
    match request {
        ConfirmationRequest::Overwrite {
            remote,
            direction: Direction::Pull,
            target,
        } => format!("This will overwrite your local {target} with data from [{remote}]."),
        ConfirmationRequest::Overwrite {
            remote,
            direction: Direction::Push,
            target: SyncTarget::Database,
        } => format!("This will overwrite the database on [{remote}] with your local database."),
        ConfirmationRequest::Overwrite {
            remote,
            direction: Direction::Push,
            target: SyncTarget::Files,
        } => format!("This will overwrite storage files on [{remote}] with your local files."),
        ConfirmationRequest::MirrorDelete { remote } => format!(
            "Files on [{remote}] that do not exist locally will be DELETED. This cannot be undone."
        ),
        ConfirmationRequest::DeleteSnapshots { local, remote } => match (local, remote) {
            (l, 0) => format!("Delete {l} local snapshot(s)?"),
            (0, r) => format!("Delete {r} remote snapshot(s)?"),
            (l, r) => format!("Delete {l} local and {r} remote snapshot(s)?"),
        },
    }
}
