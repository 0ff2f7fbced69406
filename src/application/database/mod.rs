//! Database Sync Module
//!
//! Pulls or pushes a whole database as a snapshot file.
//!
//! ## Structure
//!
//! - `options` - The immutable request (`SyncRequest`)
//! - `result` - Result types (`DatabaseSyncResult`, `SyncOutcome`)
//! - `guard` - Cleanup of created snapshots on failure or interrupt
//! - `use_case` - The lifecycle itself (`DatabaseSyncUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use remote_sync::application::database::{DatabaseSyncUseCase, SyncRequest};
//!
//! let use_case = DatabaseSyncUseCase::new(transport, database, store, commands);
//! let result = use_case.execute(&SyncRequest::pull(remote))?;
//! ```

mod guard;
mod options;
mod result;
mod use_case;

pub use options::SyncRequest;
pub use result::{DatabaseSyncResult, SyncOutcome};
pub use use_case::DatabaseSyncUseCase;
