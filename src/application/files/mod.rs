//! File Sync Module
//!
//! Mirrors storage directories between the local project and a remote.
//!
//! ## Structure
//!
//! - `options` - The request (`FileSyncRequest`)
//! - `result` - Result types (`FileSyncResult`, `FileSyncOutcome`)
//! - `use_case` - Validate, preview, confirm, transfer (`FileSyncUseCase`)

mod options;
mod result;
mod use_case;

pub use options::FileSyncRequest;
pub use result::{FileSyncOutcome, FileSyncResult};
pub use use_case::FileSyncUseCase;

#[cfg(test)]
mod tests;
