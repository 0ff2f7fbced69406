//! Command handlers
//!
//! Each handler wires infrastructure adapters into one use case and renders
//! its result.

pub mod cleanup;
mod context;
pub mod remotes;
pub mod sync;

pub use context::CommandContext;
