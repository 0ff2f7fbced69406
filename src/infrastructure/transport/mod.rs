//! Transport Adapters
//!
//! - `SshTransport` - remote commands over `ssh`, file copies with `rsync`

mod ssh;

pub use ssh::SshTransport;
