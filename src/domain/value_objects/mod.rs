//! Value Objects
//!
//! Immutable types validated at construction.

mod direction;
mod lifecycle;
mod remote_target;
mod snapshot;
mod storage_path;

pub use direction::{Direction, ImportMode, SyncTarget};
pub use lifecycle::LifecycleState;
pub use remote_target::{AtomicLayout, RemoteTarget};
pub use snapshot::{
    generate_snapshot_name, local_backup_name, remote_backup_name, snapshot_file_name,
    snapshot_name_from_path, Snapshot, SnapshotLocation, SNAPSHOT_EXTENSION,
};
pub use storage_path::StoragePath;
