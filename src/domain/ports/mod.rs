//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod confirmation;
pub mod interrupt;
pub mod local_database;
pub mod snapshot_store;
pub mod sync_events;
pub mod transport;

pub use confirmation::{ConfirmationRequest, Confirmer, DeclineAll};
pub use interrupt::{InterruptAction, InterruptHook, NoopInterruptHook};
pub use local_database::LocalDatabase;
pub use snapshot_store::SnapshotStore;
pub use sync_events::{NoopEventSink, SyncEvent, SyncEventSink};
pub use transport::{CommandOutput, Endpoint, TransferOptions, TransportGateway};
