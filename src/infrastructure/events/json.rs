//! JSON Event Sink
//!
//! Outputs sync events as NDJSON for CI/automation consumption.

use crate::domain::ports::{SyncEvent, SyncEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of one event
pub fn event_json(event: &SyncEvent) -> serde_json::Value {
    match event {
        SyncEvent::StateChanged { state } => serde_json::json!({
            "event": "state",
            "state": state.as_str(),
        }),
        SyncEvent::Progress { message } => serde_json::json!({
            "event": "progress",
            "message": message,
        }),
        SyncEvent::Warning { message } => serde_json::json!({
            "event": "warning",
            "message": message,
        }),
        SyncEvent::PreviewReady { plan } => serde_json::json!({
            "event": "preview",
            "files_to_transfer": plan.files_to_transfer,
            "files_to_delete": plan.files_to_delete,
        }),
        SyncEvent::PathStarted { path, direction } => serde_json::json!({
            "event": "path_start",
            "path": path,
            "direction": direction,
        }),
        SyncEvent::SnapshotDeleted { name, location } => serde_json::json!({
            "event": "snapshot_deleted",
            "name": name,
            "location": location.to_string(),
        }),
    }
}

impl SyncEventSink for JsonEventSink {
    fn on_event(&self, event: SyncEvent) {
        self.write_event(event_json(&event));
    }
}
