//! Console Event Sink
//!
//! One line per event, with colored status icons when the terminal allows.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::{Color, Stylize};

use crate::domain::ports::{SyncEvent, SyncEventSink};
use crate::domain::value_objects::Direction;

/// Human-readable progress output
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
    unicode: bool,
    /// Also print lifecycle state transitions
    show_states: bool,
}

impl ConsoleEventSink {
    pub fn stdout(color: bool, unicode: bool) -> Self {
        Self::with_writer(io::stdout(), color, unicode)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, color: bool, unicode: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            color,
            unicode,
            show_states: false,
        }
    }

    pub fn with_states(mut self, show_states: bool) -> Self {
        self.show_states = show_states;
        self
    }

    fn icon(&self, unicode: &'static str, ascii: &'static str, color: Color) -> String {
        let icon = if self.unicode { unicode } else { ascii };
        if self.color {
            format!("{}", icon.with(color))
        } else {
            icon.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{}", text.with(Color::DarkGrey))
        } else {
            text.to_string()
        }
    }

    fn render(&self, event: &SyncEvent) -> Option<String> {
        let line = match event {
            SyncEvent::StateChanged { state } => {
                if !self.show_states {
                    return None;
                }
                self.dim(&format!("  state: {state}"))
            }
            SyncEvent::Progress { message } => {
                format!("{} {}", self.icon("●", "[..]", Color::Cyan), message)
            }
            SyncEvent::Warning { message } => {
                format!("{} {}", self.icon("⚠", "[WARN]", Color::Yellow), message)
            }
            SyncEvent::PreviewReady { plan } => format!(
                "{} {} file(s) to transfer, {} file(s) to delete",
                self.icon("Δ", "[DIFF]", Color::Cyan),
                plan.files_to_transfer,
                plan.files_to_delete
            ),
            SyncEvent::PathStarted { path, direction } => {
                let verb = match direction {
                    Direction::Pull => "Pulling",
                    Direction::Push => "Pushing",
                };
                format!("{} {} {}", self.icon("↳", "[>]", Color::DarkGrey), verb, path)
            }
            SyncEvent::SnapshotDeleted { name, location } => format!(
                "{} Deleted {} snapshot {}",
                self.icon("✓", "[OK]", Color::Green),
                location,
                name
            ),
        };
        Some(line)
    }
}

impl SyncEventSink for ConsoleEventSink {
    fn on_event(&self, event: SyncEvent) {
        let Some(line) = self.render(&event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{line}");
            let _ = writer.flush();
        }
    }
}
