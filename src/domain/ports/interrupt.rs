//! Interrupt Hook Port
//!
//! Lets an orchestrator register the cleanup that must run if the process is
//! interrupted while remote artifacts exist.

/// Cleanup to run on interrupt, before the process exits
pub type InterruptAction = Box<dyn FnOnce() + Send + 'static>;

pub trait InterruptHook: Send + Sync {
    /// Replace the pending action
    fn arm(&self, action: InterruptAction);

    /// Drop the pending action without running it
    fn disarm(&self);
}

/// Hook for contexts without signal handling
pub struct NoopInterruptHook;

impl InterruptHook for NoopInterruptHook {
    fn arm(&self, _action: InterruptAction) {}

    fn disarm(&self) {}
}
