//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (value objects, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DatabaseSyncUseCase` - Snapshot lifecycle for database pull/push
//! - `FileSyncUseCase` - Validated, previewed storage directory transfers
//! - `CleanupUseCase` - Retention cleanup of local and remote snapshots

pub mod cleanup;
pub mod database;
pub mod files;
mod layout;

#[cfg(test)]
mod test_support;

pub use cleanup::{CleanupOutcome, CleanupRequest, CleanupResult, CleanupUseCase, FailedDeletion};
pub use database::{DatabaseSyncResult, DatabaseSyncUseCase, SyncOutcome, SyncRequest};
pub use files::{FileSyncOutcome, FileSyncRequest, FileSyncResult, FileSyncUseCase};
