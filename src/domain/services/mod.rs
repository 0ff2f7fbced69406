//! Domain Services
//!
//! Stateless policies. None of these touch the network or the file system.

pub mod driver_gate;
pub mod remote_commands;
pub mod retention;
pub mod transfer_preview;

pub use driver_gate::{check_drivers, normalize_driver, DriverCheck};
pub use remote_commands::{parse_snapshot_listing, shell_quote, RemoteCommands};
pub use retention::{expired, select_for_deletion, sort_by_recency};
pub use transfer_preview::TransferPlan;
