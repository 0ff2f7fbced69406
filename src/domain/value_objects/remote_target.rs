//! Remote Target Value Object
//!
//! A named remote environment (host + base path) that can be synced with.

use std::fmt;

use crate::error::{SyncError, SyncResult};

const ATOMIC_SUFFIX: &str = "/current";

/// Whether a remote uses an atomic "current symlink" deployment layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AtomicLayout {
    /// Not probed yet
    #[default]
    Unknown,
    /// Live code lives under `<base>/current`
    Atomic,
    /// Live code lives directly under `<base>`
    Flat,
}

impl AtomicLayout {
    pub fn is_resolved(self) -> bool {
        self != AtomicLayout::Unknown
    }
}

/// Immutable description of a remote environment
///
/// Built once per invocation by the configuration boundary. Resolving the
/// atomic layout yields a new value instead of mutating this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    name: String,
    host: String,
    base_path: String,
    push_allowed: bool,
    layout: AtomicLayout,
}

impl RemoteTarget {
    /// Create a remote target, rejecting empty host or base path
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        base_path: impl Into<String>,
        push_allowed: bool,
    ) -> SyncResult<Self> {
        let name = name.into();
        let host = host.into();
        let base_path = base_path.into();

        if host.trim().is_empty() || base_path.trim().is_empty() {
            return Err(SyncError::IncompleteRemote { name });
        }

        // A path already pointing at the release symlink needs no probe
        let layout = if base_path.ends_with(ATOMIC_SUFFIX) {
            AtomicLayout::Atomic
        } else {
            AtomicLayout::Unknown
        };

        Ok(Self {
            name,
            host,
            base_path,
            push_allowed,
            layout,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// SSH connection string (e.g. "deploy@app.example.com")
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn push_allowed(&self) -> bool {
        self.push_allowed
    }

    pub fn layout(&self) -> AtomicLayout {
        self.layout
    }

    /// Fix the atomic layout from a probe result
    ///
    /// Fails when the layout is already known; a second resolution would let
    /// paths computed earlier in the invocation go stale.
    pub fn resolve_atomic(self, probe: bool) -> SyncResult<Self> {
        if self.layout.is_resolved() {
            return Err(SyncError::AtomicLayoutResolved { name: self.name });
        }

        Ok(Self {
            layout: if probe {
                AtomicLayout::Atomic
            } else {
                AtomicLayout::Flat
            },
            ..self
        })
    }

    /// Application root on the remote
    pub fn working_path(&self) -> String {
        if self.layout == AtomicLayout::Atomic && !self.base_path.ends_with(ATOMIC_SUFFIX) {
            return format!("{}{}", self.base_path.trim_end_matches('/'), ATOMIC_SUFFIX);
        }
        self.base_path.clone()
    }

    /// Storage root on the remote
    pub fn storage_path(&self) -> String {
        format!("{}/storage", self.working_path().trim_end_matches('/'))
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
