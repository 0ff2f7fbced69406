//! Retention Policy
//!
//! "Keep N most recent, delete the rest" for snapshot collections, applied the
//! same way to local files and to a remote listing. Pure: deciding never deletes.

use crate::domain::value_objects::Snapshot;

/// Entries beyond the `keep` most recent
///
/// `sorted` must already be ordered most recent first. The result is a suffix
/// of the input in the same order, empty when `keep >= sorted.len()`.
pub fn expired<T>(sorted: &[T], keep: usize) -> &[T] {
    if keep >= sorted.len() {
        return &[];
    }
    &sorted[keep..]
}

/// Order snapshots most recent first
///
/// The sort is stable, so equal timestamps keep their listing order.
pub fn sort_by_recency(snapshots: &mut [Snapshot]) {
    snapshots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Sort and select the snapshots to delete
pub fn select_for_deletion(mut snapshots: Vec<Snapshot>, keep: usize) -> Vec<Snapshot> {
    sort_by_recency(&mut snapshots);
    expired(&snapshots, keep).to_vec()
}
