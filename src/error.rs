//! Error types for remote-sync
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for remote-sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Main error type for sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// Remote name has no registry entry
    #[error("remote '{name}' is not configured")]
    UnknownRemote { name: String },

    /// Registry entry lacks host or path
    #[error("remote '{name}' is missing host or path configuration")]
    IncompleteRemote { name: String },

    /// Push attempted against a remote without push permission
    #[error("push is not allowed for remote [{name}]; set 'push_allowed = true' in config to enable")]
    PushNotAllowed { name: String },

    /// Local and remote database engines differ
    #[error("database driver mismatch: local uses [{local}] but remote uses [{remote}]")]
    DriverMismatch { local: String, remote: String },

    /// Candidate path resolves outside the storage root
    #[error("path traversal detected: {path} must be within the storage directory")]
    PathTraversal { path: String },

    /// Candidate path cannot be resolved
    #[error("invalid path: {path}")]
    InvalidPath { path: String },

    /// Storage root itself cannot be resolved
    #[error("storage directory is not accessible: {}", root.display())]
    StorageInaccessible { root: PathBuf },

    /// A remote command or file transfer failed
    #[error("{operation} failed: {diagnostic}")]
    Transport {
        operation: String,
        diagnostic: String,
    },

    /// A snapshot could not be applied to a database
    #[error("failed to load snapshot '{snapshot}': {diagnostic}")]
    LoadFailure { snapshot: String, diagnostic: String },

    /// Sync commands refuse to run inside a production environment
    #[error("this command cannot be run in production")]
    ProductionEnvironment,

    /// The atomic layout of a remote may only be resolved once
    #[error("atomic layout of remote '{name}' is already resolved")]
    AtomicLayoutResolved { name: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Build a transport error from a failed step and its diagnostic output
    pub fn transport(operation: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// Errors detected before any side effect ran
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::UnknownRemote { .. }
                | Self::IncompleteRemote { .. }
                | Self::PushNotAllowed { .. }
                | Self::DriverMismatch { .. }
                | Self::ProductionEnvironment
        )
    }
}
