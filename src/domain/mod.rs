//! Domain Layer
//!
//! The decision logic of remote-sync, kept apart from processes and terminals.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (RemoteTarget, StoragePath, Snapshot)
//! - `services/` - Pure policies (retention, transfer preview, driver gate, remote commands)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **Typed boundaries** - configuration is validated once into value objects
//! 2. **Pure services** - policies take data and return decisions, never side effects
//! 3. **Ports & Adapters** - every subprocess, prompt and signal goes through a trait

pub mod ports;
pub mod services;
pub mod value_objects;
