//! Snapshot Store Adapters

mod fs_store;

pub use fs_store::FsSnapshotStore;
