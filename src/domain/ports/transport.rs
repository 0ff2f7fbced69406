//! Transport Gateway Port
//!
//! Remote command execution and file transfer. The production adapter shells
//! out to `ssh` and `rsync`; tests script responses.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::value_objects::RemoteTarget;

/// Outcome of a remote command or transfer
///
/// Timeouts and spawn failures are reported as unsuccessful outputs with the
/// reason in `stderr`, never as a separate error kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Best diagnostic text for error messages
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        "no output".to_string()
    }
}

/// One side of a file transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Local(PathBuf),
    /// rsync-style path on the remote host; directories end with `/`
    Remote { host: String, path: String },
}

impl Endpoint {
    pub fn remote(target: &RemoteTarget, path: impl Into<String>) -> Self {
        Endpoint::Remote {
            host: target.host().to_string(),
            path: path.into(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Local(path) => write!(f, "{}", path.display()),
            Endpoint::Remote { host, path } => write!(f, "{}:{}", host, path),
        }
    }
}

/// Options for a file transfer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferOptions {
    /// Report itemized changes without touching files
    pub dry_run: bool,
    /// Remove destination files missing from the source
    pub delete: bool,
    /// Keep partially transferred files so a rerun can resume
    pub partial: bool,
    /// Skip dotfiles and apply `excludes`
    pub tree: bool,
    /// Exclude patterns
    pub excludes: Vec<String>,
}

impl TransferOptions {
    /// Single snapshot file transfer
    pub fn snapshot() -> Self {
        Self {
            partial: true,
            ..Self::default()
        }
    }

    /// Storage directory transfer
    pub fn tree(excludes: &[String], delete: bool) -> Self {
        Self {
            delete,
            partial: true,
            tree: true,
            excludes: excludes.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Remote execution and file transfer capability
pub trait TransportGateway: Send + Sync {
    /// Run a shell command on the remote host
    fn run_remote_command(
        &self,
        target: &RemoteTarget,
        command: &str,
        timeout: Duration,
    ) -> CommandOutput;

    /// Copy files between endpoints
    fn transfer_files(
        &self,
        source: &Endpoint,
        destination: &Endpoint,
        options: &TransferOptions,
        timeout: Duration,
    ) -> CommandOutput;
}
