//! Driver Compatibility Gate
//!
//! Snapshots are engine-specific dumps, so both ends must run the same
//! database engine. MariaDB speaks the MySQL dump format.

use crate::error::{SyncError, SyncResult};

/// Outcome of a passing compatibility check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCheck {
    /// Both drivers known and equivalent
    Compatible,
    /// Remote driver could not be detected; proceed optimistically
    RemoteUndetected,
}

/// Case-folded driver with MariaDB folded into MySQL
pub fn normalize_driver(driver: &str) -> String {
    match driver.trim().to_lowercase().as_str() {
        "mariadb" => "mysql".to_string(),
        other => other.to_string(),
    }
}

/// Compare local and remote drivers
///
/// Fails with [`SyncError::DriverMismatch`] carrying the raw identifiers.
pub fn check_drivers(local: &str, remote: Option<&str>) -> SyncResult<DriverCheck> {
    let Some(remote) = remote.filter(|r| !r.trim().is_empty()) else {
        return Ok(DriverCheck::RemoteUndetected);
    };

    if normalize_driver(local) != normalize_driver(remote) {
        return Err(SyncError::DriverMismatch {
            local: local.to_string(),
            remote: remote.to_string(),
        });
    }

    Ok(DriverCheck::Compatible)
}
