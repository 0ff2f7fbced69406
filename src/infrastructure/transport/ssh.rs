//! SSH Transport
//!
//! Implements the TransportGateway port with the system `ssh` and `rsync`
//! binaries. Authentication is left to the user's SSH setup (agent, config,
//! keys).

use std::process::Command;
use std::time::Duration;

use crate::domain::ports::{CommandOutput, Endpoint, TransferOptions, TransportGateway};
use crate::domain::value_objects::RemoteTarget;
use crate::infrastructure::process::{run_with_timeout, StdoutMode};

/// Transport over `ssh` + `rsync`
#[derive(Debug, Clone)]
pub struct SshTransport {
    ssh: String,
    rsync: String,
    /// Show rsync progress on the terminal for real tree transfers
    live_progress: bool,
}

impl SshTransport {
    pub fn new() -> Self {
        Self {
            ssh: "ssh".to_string(),
            rsync: "rsync".to_string(),
            live_progress: false,
        }
    }

    pub fn with_live_progress(mut self, live_progress: bool) -> Self {
        self.live_progress = live_progress;
        self
    }

    fn ssh_command(&self, target: &RemoteTarget, command: &str) -> Command {
        let mut cmd = Command::new(&self.ssh);
        cmd.arg(target.host()).arg(command);
        cmd
    }

    fn rsync_command(
        &self,
        source: &Endpoint,
        destination: &Endpoint,
        options: &TransferOptions,
    ) -> Command {
        let mut cmd = Command::new(&self.rsync);
        cmd.args(rsync_args(source, destination, options));
        cmd
    }
}

impl Default for SshTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportGateway for SshTransport {
    fn run_remote_command(
        &self,
        target: &RemoteTarget,
        command: &str,
        timeout: Duration,
    ) -> CommandOutput {
        tracing::trace!(host = target.host(), %command, "ssh");
        run_with_timeout(
            self.ssh_command(target, command),
            timeout,
            StdoutMode::Capture,
        )
    }

    fn transfer_files(
        &self,
        source: &Endpoint,
        destination: &Endpoint,
        options: &TransferOptions,
        timeout: Duration,
    ) -> CommandOutput {
        tracing::trace!(%source, %destination, dry_run = options.dry_run, "rsync");
        // dry-run reports are parsed, so they are always captured
        let mode = if self.live_progress && options.tree && !options.dry_run {
            StdoutMode::Inherit
        } else {
            StdoutMode::Capture
        };
        run_with_timeout(self.rsync_command(source, destination, options), timeout, mode)
    }
}

/// rsync argument list for one transfer
fn rsync_args(source: &Endpoint, destination: &Endpoint, options: &TransferOptions) -> Vec<String> {
    let mut args = vec!["-avz".to_string()];

    if options.tree {
        args.push("--exclude=.*".to_string());
        args.extend(options.excludes.iter().map(|e| format!("--exclude={e}")));
    }

    if options.dry_run {
        args.push("--dry-run".to_string());
        args.push("--itemize-changes".to_string());
    } else {
        if options.partial {
            args.push("--partial".to_string());
        }
        if options.tree {
            args.push("--info=progress2".to_string());
        }
    }

    if options.delete {
        args.push("--delete".to_string());
    }

    args.push(source.to_string());
    args.push(destination.to_string());
    args
}
