//! Snapshot Cleanup Module
//!
//! Applies the retention policy to local and remote snapshot collections.
//!
//! ## Structure
//!
//! - `options` - The request (`CleanupRequest`)
//! - `result` - Result types (`CleanupResult`, `CleanupOutcome`)
//! - `use_case` - List, select, confirm, delete (`CleanupUseCase`)

mod options;
mod result;
mod use_case;

pub use options::CleanupRequest;
pub use result::{CleanupOutcome, CleanupResult, FailedDeletion};
pub use use_case::CleanupUseCase;
