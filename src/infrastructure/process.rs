//! Subprocess execution with a deadline
//!
//! Every ssh, rsync and local tool call goes through here. A timeout kills
//! the child and reads as an unsuccessful output, like any other failure.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::domain::ports::CommandOutput;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Where the child's stdout goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StdoutMode {
    Capture,
    /// Live progress on the user's terminal; `stdout` comes back empty
    Inherit,
}

/// Run `command` to completion or until `timeout` expires
pub(crate) fn run_with_timeout(
    mut command: Command,
    timeout: Duration,
    stdout_mode: StdoutMode,
) -> CommandOutput {
    let program = command.get_program().to_string_lossy().into_owned();

    command.stdin(Stdio::null()).stderr(Stdio::piped());
    match stdout_mode {
        StdoutMode::Capture => command.stdout(Stdio::piped()),
        StdoutMode::Inherit => command.stdout(Stdio::inherit()),
    };

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => return CommandOutput::failed(format!("failed to start {program}: {e}")),
    };

    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);

    match wait_until(&mut child, Instant::now() + timeout) {
        Ok(Some(status)) => CommandOutput {
            success: status.success(),
            stdout: join_reader(stdout),
            stderr: join_reader(stderr),
        },
        Ok(None) => {
            tracing::debug!(
                %program,
                timeout_secs = timeout.as_secs(),
                "killing timed out process"
            );
            // grandchildren may still hold the pipes open, so readers are not joined
            CommandOutput::failed(format!(
                "{program} timed out after {}s",
                timeout.as_secs()
            ))
        }
        Err(e) => CommandOutput::failed(format!("failed to wait for {program}: {e}")),
    }
}

/// `Ok(None)` when the deadline passed and the child was killed
fn wait_until(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
