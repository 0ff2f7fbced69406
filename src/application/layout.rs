//! Deployment layout probe shared by the use cases

use std::time::Duration;

use crate::domain::ports::TransportGateway;
use crate::domain::services::RemoteCommands;
use crate::domain::value_objects::RemoteTarget;
use crate::error::SyncResult;

/// Fix the atomic layout of `remote`, probing only when still unknown
///
/// A failed probe reads as a flat layout.
pub(crate) fn resolve_layout<T>(
    transport: &T,
    commands: &RemoteCommands,
    remote: &RemoteTarget,
    timeout: Duration,
) -> SyncResult<RemoteTarget>
where
    T: TransportGateway + ?Sized,
{
    let remote = remote.clone();
    if remote.layout().is_resolved() {
        return Ok(remote);
    }

    let command = commands.probe_atomic(&remote);
    tracing::debug!(remote = %remote, %command, "probing deployment layout");
    let output = transport.run_remote_command(&remote, &command, timeout);
    let atomic = output.success && output.stdout.trim() == "yes";
    tracing::debug!(remote = %remote, atomic, "deployment layout resolved");
    remote.resolve_atomic(atomic)
}
