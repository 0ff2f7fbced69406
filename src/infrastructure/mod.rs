//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `transport/` - ssh + rsync transport gateway
//! - `database/` - Local database through the snapshot tool
//! - `store/` - Local snapshot directory
//! - `events/` - Console and NDJSON event sinks
//! - `interrupt` - Signal-driven interrupt hook

pub mod database;
pub mod events;
pub mod interrupt;
mod process;
pub mod store;
pub mod transport;

// Re-export for convenience
pub use database::ArtisanDatabase;
pub use events::{ConsoleEventSink, JsonEventSink};
pub use interrupt::CtrlcInterruptHook;
pub use store::FsSnapshotStore;
pub use transport::SshTransport;
