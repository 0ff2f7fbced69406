//! In-memory ports shared by the use case tests

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::ports::{
    CommandOutput, ConfirmationRequest, Confirmer, Endpoint, InterruptAction, InterruptHook,
    LocalDatabase, SnapshotStore, SyncEvent, SyncEventSink, TransferOptions, TransportGateway,
};
use crate::domain::value_objects::{LifecycleState, RemoteTarget, Snapshot};
use crate::error::{SyncError, SyncResult};

#[derive(Debug, Clone)]
pub struct RecordedTransfer {
    pub source: Endpoint,
    pub destination: Endpoint,
    pub options: TransferOptions,
}

/// Transport that records calls and answers from a script
///
/// Remote commands get the first scripted output whose needle occurs in the
/// command, or an empty success. Transfers pop queued outputs in order.
#[derive(Default)]
pub struct MockTransport {
    responses: Vec<(String, CommandOutput)>,
    delays: Vec<(String, Duration)>,
    finished: Mutex<Vec<String>>,
    transfer_outputs: Mutex<VecDeque<CommandOutput>>,
    interrupt_on_transfer: Mutex<Option<Arc<ManualInterruptHook>>>,
    commands: Mutex<Vec<String>>,
    transfers: Mutex<Vec<RecordedTransfer>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, needle: &str, output: CommandOutput) -> Self {
        self.responses.push((needle.to_string(), output));
        self
    }

    /// Commands containing `needle` take `delay` before answering
    pub fn slow(mut self, needle: &str, delay: Duration) -> Self {
        self.delays.push((needle.to_string(), delay));
        self
    }

    /// Commands that have returned, in completion order
    pub fn finished_commands(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }

    pub fn then_transfer(self, output: CommandOutput) -> Self {
        self.transfer_outputs.lock().unwrap().push_back(output);
        self
    }

    /// Fire the hook's action from inside the next transfer
    pub fn interrupt_during_transfer(self, hook: Arc<ManualInterruptHook>) -> Self {
        *self.interrupt_on_transfer.lock().unwrap() = Some(hook);
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn count_commands(&self, needle: &str) -> usize {
        self.commands()
            .iter()
            .filter(|c| c.contains(needle))
            .count()
    }

    pub fn transfers(&self) -> Vec<RecordedTransfer> {
        self.transfers.lock().unwrap().clone()
    }
}

impl TransportGateway for MockTransport {
    fn run_remote_command(
        &self,
        _target: &RemoteTarget,
        command: &str,
        _timeout: Duration,
    ) -> CommandOutput {
        self.commands.lock().unwrap().push(command.to_string());
        if let Some((_, delay)) = self
            .delays
            .iter()
            .find(|(needle, _)| command.contains(needle.as_str()))
        {
            std::thread::sleep(*delay);
        }
        let output = self
            .responses
            .iter()
            .find(|(needle, _)| command.contains(needle.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| CommandOutput::ok(""));
        self.finished.lock().unwrap().push(command.to_string());
        output
    }

    fn transfer_files(
        &self,
        source: &Endpoint,
        destination: &Endpoint,
        options: &TransferOptions,
        _timeout: Duration,
    ) -> CommandOutput {
        self.transfers.lock().unwrap().push(RecordedTransfer {
            source: source.clone(),
            destination: destination.clone(),
            options: options.clone(),
        });

        let hook = self.interrupt_on_transfer.lock().unwrap().take();
        if let Some(hook) = hook {
            hook.fire();
        }

        self.transfer_outputs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| CommandOutput::ok(""))
    }
}

/// Local database double recording every call
pub struct MockDatabase {
    pub driver: String,
    pub tables: Vec<String>,
    /// Snapshot names starting with this prefix fail to create
    pub fail_create_prefix: Option<String>,
    pub fail_load: bool,
    pub fail_drop: bool,
    calls: Mutex<Vec<String>>,
}

impl MockDatabase {
    pub fn new(driver: &str, tables: &[&str]) -> Self {
        Self {
            driver: driver.to_string(),
            tables: tables.iter().map(|t| t.to_string()).collect(),
            fail_create_prefix: None,
            fail_load: false,
            fail_drop: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl LocalDatabase for MockDatabase {
    fn driver(&self) -> String {
        self.driver.clone()
    }

    fn create_snapshot(
        &self,
        name: &str,
        excluded_tables: &[String],
        _compress: bool,
    ) -> CommandOutput {
        self.record(format!("create {} excluding {}", name, excluded_tables.len()));
        match &self.fail_create_prefix {
            Some(prefix) if name.starts_with(prefix.as_str()) => {
                CommandOutput::failed("mysqldump: access denied")
            }
            _ => CommandOutput::ok(""),
        }
    }

    fn load_snapshot(&self, name: &str, drop_tables_first: bool) -> CommandOutput {
        self.record(format!("load {name} drop={drop_tables_first}"));
        if self.fail_load {
            CommandOutput::failed("ERROR 1064 at line 12")
        } else {
            CommandOutput::ok("")
        }
    }

    fn table_names(&self) -> SyncResult<Vec<String>> {
        Ok(self.tables.clone())
    }

    fn truncate_tables(&self, tables: &[String]) -> CommandOutput {
        self.record(format!("truncate {}", tables.join(",")));
        CommandOutput::ok("")
    }

    fn drop_tables(&self, tables: &[String]) -> CommandOutput {
        self.record(format!("drop {}", tables.join(",")));
        if self.fail_drop {
            CommandOutput::failed("cannot drop table")
        } else {
            CommandOutput::ok("")
        }
    }
}

/// Snapshot directory double
pub struct MockStore {
    directory: PathBuf,
    pub snapshots: Vec<Snapshot>,
    /// Paths containing this text fail to delete
    pub fail_delete: Option<String>,
    deleted: Mutex<Vec<PathBuf>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            directory: PathBuf::from("/project/storage/snapshots"),
            snapshots: Vec::new(),
            fail_delete: None,
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_snapshots(mut self, snapshots: Vec<Snapshot>) -> Self {
        self.snapshots = snapshots;
        self
    }

    pub fn deleted(&self) -> Vec<PathBuf> {
        self.deleted.lock().unwrap().clone()
    }
}

impl SnapshotStore for MockStore {
    fn directory(&self) -> &Path {
        &self.directory
    }

    fn ensure_directory(&self) -> SyncResult<()> {
        Ok(())
    }

    fn list(&self) -> SyncResult<Vec<Snapshot>> {
        Ok(self.snapshots.clone())
    }

    fn delete(&self, path: &Path) -> SyncResult<()> {
        self.deleted.lock().unwrap().push(path.to_path_buf());
        match &self.fail_delete {
            Some(needle) if path.to_string_lossy().contains(needle.as_str()) => {
                Err(SyncError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "permission denied",
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Confirmer answering from a queue, then with a fallback
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    fallback: bool,
    requests: Mutex<Vec<ConfirmationRequest>>,
}

impl ScriptedConfirmer {
    pub fn always(answer: bool) -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
            fallback: answer,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn answers(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            fallback: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ConfirmationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        self.requests.lock().unwrap().push(request.clone());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

/// Interrupt hook fired by hand
#[derive(Default)]
pub struct ManualInterruptHook {
    action: Mutex<Option<InterruptAction>>,
    armed: AtomicUsize,
}

impl ManualInterruptHook {
    pub fn fire(&self) {
        let action = self.action.lock().unwrap().take();
        if let Some(action) = action {
            action();
        }
    }

    pub fn times_armed(&self) -> usize {
        self.armed.load(Ordering::SeqCst)
    }

    pub fn is_armed(&self) -> bool {
        self.action.lock().unwrap().is_some()
    }
}

impl InterruptHook for ManualInterruptHook {
    fn arm(&self, action: InterruptAction) {
        self.armed.fetch_add(1, Ordering::SeqCst);
        *self.action.lock().unwrap() = Some(action);
    }

    fn disarm(&self) {
        self.action.lock().unwrap().take();
    }
}

/// Event sink keeping everything it receives
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<SyncEvent>>,
}

impl CollectingSink {
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn states(&self) -> Vec<LifecycleState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SyncEvent::StateChanged { state } => Some(state),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SyncEvent::Warning { message } => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl SyncEventSink for CollectingSink {
    fn on_event(&self, event: SyncEvent) {
        self.events.lock().unwrap().push(event);
    }
}
