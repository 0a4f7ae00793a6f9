//! Platform abstraction for the update runtime.
//!
//! The runtime never flushes on its own. It asks the host, through this
//! trait, to call [`Runtime::flush`](crate::Runtime::flush) at its next
//! convenient point (end of the event loop turn, next animation frame, ...).

/// Schedules flushes for the runtime.
///
/// Implementations must be safe to call from any thread: task wakers hold a
/// reference to the scheduler and may fire from elsewhere.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host flush pending updates soon.
    fn schedule_flush(&self);
}

/// Scheduler for hosts that flush on their own cadence.
#[derive(Debug, Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_flush(&self) {}
}
