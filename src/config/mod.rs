//! Configuration module for remote-sync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (REMOTE_SYNC_*)
//! 3. `--config <file>` or `./remote-sync.toml`
//! 4. User config (~/.config/remote-sync/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::ConfigWarning;
pub use types::{Config, LocalConfig, RemoteConfig, SnapshotsConfig, TimeoutsConfig};
