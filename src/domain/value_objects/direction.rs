//! Sync direction and mode value objects

use std::fmt;

use serde::Serialize;

/// Which way data flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Remote → local
    Pull,
    /// Local → remote
    Push,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Pull => write!(f, "pull"),
            Direction::Push => write!(f, "push"),
        }
    }
}

/// What is being synced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncTarget {
    Database,
    Files,
}

impl fmt::Display for SyncTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncTarget::Database => write!(f, "database"),
            SyncTarget::Files => write!(f, "files"),
        }
    }
}

/// How a pulled snapshot is applied to the local database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Snapshot omits excluded tables; they are truncated after loading
    #[default]
    Standard,
    /// Non-excluded local tables are dropped first and the snapshot holds every table
    Full,
}

impl ImportMode {
    pub fn from_full_flag(full: bool) -> Self {
        if full {
            ImportMode::Full
        } else {
            ImportMode::Standard
        }
    }

    pub fn is_full(self) -> bool {
        self == ImportMode::Full
    }
}
