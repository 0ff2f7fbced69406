//! Remote Command Builder
//!
//! Builds the shell command strings run on a remote through the transport
//! gateway. Every interpolated value is single-quoted.

use crate::domain::value_objects::{
    snapshot_file_name, RemoteTarget, Snapshot, SnapshotLocation, SNAPSHOT_EXTENSION,
};

/// Quote a value for a POSIX shell
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Command strings for the snapshot tool and remote housekeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommands {
    /// Snapshot tool invocation prefix (e.g. "php artisan")
    tool: String,
    /// Snapshot directory relative to the storage root
    subdirectory: String,
}

impl RemoteCommands {
    pub fn new(tool: impl Into<String>, subdirectory: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            subdirectory: subdirectory.into().trim_matches('/').to_string(),
        }
    }

    fn in_working_dir(&self, target: &RemoteTarget, rest: &str) -> String {
        format!(
            "cd {} && {} {}",
            shell_quote(&target.working_path()),
            self.tool,
            rest
        )
    }

    /// Prints `yes` when `<base>/current` is a directory
    pub fn probe_atomic(&self, target: &RemoteTarget) -> String {
        let current = format!("{}/current", target.base_path().trim_end_matches('/'));
        format!(
            "test -d {} && echo 'yes' || echo 'no'",
            shell_quote(&current)
        )
    }

    /// Prints the driver of the default database connection
    pub fn detect_driver(&self, target: &RemoteTarget) -> String {
        self.in_working_dir(
            target,
            "tinker --execute=\"echo config('database.connections.' . config('database.default') . '.driver');\"",
        )
    }

    pub fn create_snapshot(
        &self,
        target: &RemoteTarget,
        name: &str,
        excluded_tables: &[String],
        compress: bool,
    ) -> String {
        let mut rest = format!("snapshot:create {}", shell_quote(name));
        for table in excluded_tables {
            rest.push_str(&format!(" --exclude={}", shell_quote(table)));
        }
        if compress {
            rest.push_str(" --compress");
        }
        self.in_working_dir(target, &rest)
    }

    pub fn load_snapshot(&self, target: &RemoteTarget, name: &str) -> String {
        self.in_working_dir(
            target,
            &format!("snapshot:load {} --force", shell_quote(name)),
        )
    }

    pub fn delete_snapshot(&self, target: &RemoteTarget, name: &str) -> String {
        self.in_working_dir(
            target,
            &format!("snapshot:delete {} --no-interaction", shell_quote(name)),
        )
    }

    /// Lists `<epoch> <path>` per snapshot, newest first
    pub fn list_snapshots(&self, target: &RemoteTarget) -> String {
        format!(
            "stat -c '%Y %n' {}/*{} 2>/dev/null | sort -rn || true",
            shell_quote(&self.snapshot_dir(target)),
            SNAPSHOT_EXTENSION
        )
    }

    /// Remote snapshot directory
    pub fn snapshot_dir(&self, target: &RemoteTarget) -> String {
        format!("{}/{}", target.storage_path(), self.subdirectory)
    }

    /// Remote snapshot file
    pub fn snapshot_file(&self, target: &RemoteTarget, name: &str) -> String {
        format!("{}/{}", self.snapshot_dir(target), snapshot_file_name(name))
    }
}

/// Parse `<epochSeconds> <absolutePath>` lines into remote snapshots
///
/// Lines are split on the first whitespace run; malformed lines are skipped.
/// Listing order is preserved.
pub fn parse_snapshot_listing(output: &str) -> Vec<Snapshot> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let (epoch, path) = line.split_once(char::is_whitespace)?;
            let created_at = epoch.parse::<i64>().ok()?;
            let path = path.trim_start();
            if path.is_empty() {
                return None;
            }
            Some(Snapshot::from_path(SnapshotLocation::Remote, path, created_at))
        })
        .collect()
}
