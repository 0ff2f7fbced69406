//! Ctrl-C Interrupt Hook
//!
//! One process-wide signal handler (SIGINT, and SIGTERM/SIGHUP through the
//! `termination` feature). The handler runs whatever cleanup is armed at that
//! moment, then exits with status 130 without ever releasing the hook, so
//! the main thread cannot re-arm, disarm or return past an unfinished sweep.

use std::io;
use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::domain::ports::{InterruptAction, InterruptHook};
use crate::error::{SyncError, SyncResult};

const INTERRUPTED_EXIT_CODE: i32 = 130;

static PENDING: OnceLock<Mutex<Option<InterruptAction>>> = OnceLock::new();
static INSTALLED: OnceLock<Result<(), String>> = OnceLock::new();

fn pending() -> &'static Mutex<Option<InterruptAction>> {
    PENDING.get_or_init(|| Mutex::new(None))
}

fn lock(slot: &Mutex<Option<InterruptAction>>) -> MutexGuard<'_, Option<InterruptAction>> {
    match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn replace_in(
    slot: &Mutex<Option<InterruptAction>>,
    action: Option<InterruptAction>,
) -> Option<InterruptAction> {
    std::mem::replace(&mut *lock(slot), action)
}

/// Run the armed action, then `finish`, holding the slot throughout
///
/// While the slot is held, `arm` and `disarm` on other threads block, so the
/// main thread cannot return past a cleanup still in flight.
fn run_pending_then<R>(slot: &Mutex<Option<InterruptAction>>, finish: impl FnOnce() -> R) -> R {
    let mut held = lock(slot);
    match held.take() {
        Some(action) => {
            tracing::warn!("interrupted, cleaning up before exit");
            eprintln!("\nInterrupted. Cleaning up...");
            action();
        }
        None => tracing::debug!("interrupted with nothing to clean up"),
    }
    let out = finish();
    drop(held);
    out
}

fn on_signal() {
    run_pending_then(pending(), || std::process::exit(INTERRUPTED_EXIT_CODE))
}

/// Interrupt hook backed by the process signal handler
#[derive(Debug, Clone, Copy)]
pub struct CtrlcInterruptHook;

impl CtrlcInterruptHook {
    /// Install the handler (once per process) and return the hook
    pub fn install() -> SyncResult<Self> {
        let installed =
            INSTALLED.get_or_init(|| ctrlc::set_handler(on_signal).map_err(|e| e.to_string()));
        match installed {
            Ok(()) => Ok(Self),
            Err(message) => Err(SyncError::Io(io::Error::other(format!(
                "failed to install interrupt handler: {message}"
            )))),
        }
    }
}

impl InterruptHook for CtrlcInterruptHook {
    fn arm(&self, action: InterruptAction) {
        replace_in(pending(), Some(action));
    }

    fn disarm(&self) {
        replace_in(pending(), None);
    }
}
