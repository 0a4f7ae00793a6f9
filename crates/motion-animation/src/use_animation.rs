use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::rc::Rc;

use motion_runtime::RuntimeHandle;

use crate::controls::{AnimationControls, Cleanup};

/// Where a [`use_animation`] binding is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// No target has subscribed yet.
    Created,
    /// A target subscribed; mounting waits for the next flush.
    AwaitingFlush,
    Mounted,
    /// Every target unsubscribed. A flush that arrives now does not mount.
    Unmounted,
}

struct Lifecycle {
    phase: Cell<LifecyclePhase>,
    cleanup: RefCell<Option<Cleanup>>,
    mounts: Cell<usize>,
}

impl Lifecycle {
    fn new() -> Self {
        Self {
            phase: Cell::new(LifecyclePhase::Created),
            cleanup: RefCell::new(None),
            mounts: Cell::new(0),
        }
    }

    fn mount_after_flush(&self, controls: &AnimationControls) {
        if self.phase.get() != LifecyclePhase::AwaitingFlush {
            log::debug!(
                "skipping mount after flush; phase is {:?}",
                self.phase.get()
            );
            return;
        }
        // Set before mounting: a teardown from inside `mount` shows up below,
        // and later wake-ups from an earlier subscribe see `Mounted`.
        self.phase.set(LifecyclePhase::Mounted);
        self.mounts.set(self.mounts.get() + 1);
        let cleanup = controls.mount();
        if self.phase.get() != LifecyclePhase::Mounted {
            cleanup.run();
            return;
        }
        *self.cleanup.borrow_mut() = Some(cleanup);
        log::debug!("animation controls mounted ({} so far)", self.mounts.get());
    }

    fn teardown(&self) {
        let previous = self.phase.replace(LifecyclePhase::Unmounted);
        log::debug!("animation controls unmounted (was {previous:?})");
        let cleanup = self.cleanup.borrow_mut().take();
        if let Some(cleanup) = cleanup {
            cleanup.run();
        }
    }
}

/// Animation controls bound to a runtime's flush cycle.
///
/// Dereferences to [`AnimationControls`].
#[derive(Clone)]
pub struct UseAnimation {
    controls: AnimationControls,
    lifecycle: Rc<Lifecycle>,
}

impl UseAnimation {
    pub fn phase(&self) -> LifecyclePhase {
        self.lifecycle.phase.get()
    }

    pub fn controls(&self) -> &AnimationControls {
        &self.controls
    }

    pub fn into_controls(self) -> AnimationControls {
        self.controls
    }
}

impl Deref for UseAnimation {
    type Target = AnimationControls;

    fn deref(&self) -> &AnimationControls {
        &self.controls
    }
}

/// Creates controls that mount once the runtime has flushed after the first
/// target subscribes, so targets exist before queued animations start.
///
/// When the last target unsubscribes the controls unmount. If that happens
/// before the flush, the pending mount is skipped.
pub fn use_animation(runtime: &RuntimeHandle) -> UseAnimation {
    let lifecycle = Rc::new(Lifecycle::new());
    let runtime = runtime.clone();
    let notifier_lifecycle = Rc::clone(&lifecycle);

    let controls = AnimationControls::with_notifier(move |controls| {
        notifier_lifecycle
            .phase
            .set(LifecyclePhase::AwaitingFlush);
        log::debug!("animation controls awaiting flush");

        let lifecycle = Rc::clone(&notifier_lifecycle);
        let weak_controls = controls.downgrade();
        let mount = move || {
            if let Some(controls) = weak_controls.upgrade() {
                lifecycle.mount_after_flush(&controls);
            }
        };
        if runtime.is_alive() {
            // Taken now so the task waits for the next flush, not the one
            // after the flush that first polls it.
            let next_flush = runtime.tick();
            runtime.spawn_local(async move {
                next_flush.await;
                mount();
            });
        } else {
            mount();
        }

        let lifecycle = Rc::clone(&notifier_lifecycle);
        Cleanup::new(move || lifecycle.teardown())
    });

    UseAnimation {
        controls,
        lifecycle,
    }
}

#[cfg(test)]
#[path = "tests/use_animation_tests.rs"]
mod tests;
