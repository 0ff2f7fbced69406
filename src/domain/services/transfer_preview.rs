//! Transfer Preview
//!
//! Classifies the lines of an rsync `--dry-run --itemize-changes` report into
//! file counts. Pure text processing: nothing is transferred.

use std::ops::AddAssign;

use serde::Serialize;

const DELETION_MARKER: &str = "*deleting";
const BANNER_PREFIXES: [&str; 2] = ["sending", "receiving"];
/// Update types that move file content
///
/// rsync itemizes `.` when the item itself is not updated and only its
/// attributes (times, perms, owner) may change, so no data crosses the wire.
const UPDATE_TYPES: [char; 4] = ['<', '>', 'c', 'h'];
const FILE_TYPES: [char; 5] = ['f', 'd', 'L', 'D', 'S'];

/// Aggregate counts for a planned transfer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransferPlan {
    pub files_to_transfer: usize,
    pub files_to_delete: usize,
}

impl TransferPlan {
    /// Count the changes reported by one dry run
    pub fn from_report(report: &str) -> Self {
        let mut plan = TransferPlan::default();

        for line in report.lines().map(str::trim_end) {
            if line.trim().is_empty() || is_banner(line) {
                continue;
            }

            if line.starts_with(DELETION_MARKER) {
                plan.files_to_delete += 1;
            } else if is_itemized_change(line) && !line.ends_with('/') {
                plan.files_to_transfer += 1;
            }
        }

        plan
    }

    pub fn is_empty(&self) -> bool {
        self.files_to_transfer == 0 && self.files_to_delete == 0
    }
}

impl AddAssign for TransferPlan {
    fn add_assign(&mut self, other: Self) {
        self.files_to_transfer += other.files_to_transfer;
        self.files_to_delete += other.files_to_delete;
    }
}

fn is_banner(line: &str) -> bool {
    BANNER_PREFIXES.iter().any(|p| line.starts_with(p))
}

fn is_itemized_change(line: &str) -> bool {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(update), Some(kind)) => UPDATE_TYPES.contains(&update) && FILE_TYPES.contains(&kind),
        _ => false,
    }
}
