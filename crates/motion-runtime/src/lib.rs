//! Reactive update runtime for Motion-RS.
//!
//! Components queue updates on the runtime and the host flushes them in
//! batches. Anything that must observe the result of a batch (mounting
//! animation controls, for one) waits for the flush with
//! [`RuntimeHandle::after_flush`] or awaits [`RuntimeHandle::tick`].

pub mod platform;
pub mod runtime;
mod tasks;

pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle, Tick};
pub use tasks::TaskId;
