//! Shared command setup: configuration, output mode and prompts

use std::sync::Arc;

use anyhow::Result;

use remote_sync::domain::ports::{Confirmer, SyncEventSink};
use remote_sync::infrastructure::{ConsoleEventSink, JsonEventSink};
use remote_sync::Config;

use crate::cli::Cli;
use crate::ui::confirm::TerminalConfirmer;
use crate::ui::output::print_config_warnings;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

/// Everything a command handler needs besides its own arguments
pub struct CommandContext {
    pub config: Config,
    pub json: bool,
    pub yes: bool,
    pub caps: TerminalCapabilities,
    pub events: Arc<dyn SyncEventSink>,
}

impl CommandContext {
    /// Load configuration (printing unknown-key warnings) and pick the event sink
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config, warnings) = Config::load_or_default(cli.config.as_deref())?;
        let caps = detect_capabilities();

        if !warnings.is_empty() {
            print_config_warnings(&warnings, cli.json, caps.supports_color);
        }

        let events: Arc<dyn SyncEventSink> = if cli.json {
            Arc::new(JsonEventSink::stdout())
        } else {
            Arc::new(
                ConsoleEventSink::stdout(caps.supports_color, caps.supports_unicode)
                    .with_states(cli.verbose > 0),
            )
        };

        Ok(Self {
            config,
            json: cli.json,
            yes: cli.yes,
            caps,
            events,
        })
    }

    /// Prompting confirmer; declines when there is no terminal to ask on
    pub fn confirmer(&self) -> Arc<dyn Confirmer> {
        Arc::new(TerminalConfirmer::new(self.json, self.caps.supports_color))
    }

    /// rsync progress is streamed only to an interactive, non-JSON terminal
    pub fn live_progress(&self) -> bool {
        !self.json && self.caps.is_tty && !self.caps.is_ci
    }
}
