//! Imperative animation controls.
//!
//! Controls fan `start`, `set` and `stop` out to every subscribed target.
//! Until they are mounted, `start` calls are queued and replayed in order on
//! mount.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use motion_core::{is_animatable, resolve_transition, MotionError};

use crate::{AnimationDefinition, AnimationTarget};

type SubscriberId = u64;
type StartStopNotifier = Box<dyn FnMut(&AnimationControls) -> Cleanup + 'static>;

/// A teardown action that runs at most once.
#[must_use = "dropping a cleanup without running it skips the teardown"]
pub struct Cleanup(Option<Box<dyn FnOnce() + 'static>>);

impl Cleanup {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(teardown)))
    }

    pub fn noop() -> Self {
        Self(None)
    }

    pub fn run(mut self) {
        if let Some(teardown) = self.0.take() {
            teardown();
        }
    }
}

impl fmt::Debug for Cleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cleanup")
            .field(&if self.0.is_some() { "pending" } else { "noop" })
            .finish()
    }
}

/// Outcome of [`AnimationControls::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartStatus {
    /// Animations were handed to this many targets.
    Started(usize),
    /// Controls are not mounted yet; the definition runs on mount.
    Queued,
}

struct ControlsInner {
    has_mounted: Cell<bool>,
    pending: RefCell<Vec<AnimationDefinition>>,
    subscribers: RefCell<Vec<(SubscriberId, Rc<dyn AnimationTarget>)>>,
    next_subscriber_id: Cell<SubscriberId>,
    notifier: RefCell<Option<StartStopNotifier>>,
    stop_notifier: RefCell<Option<Cleanup>>,
}

impl ControlsInner {
    fn new(notifier: Option<StartStopNotifier>) -> Self {
        Self {
            has_mounted: Cell::new(false),
            pending: RefCell::new(Vec::new()),
            subscribers: RefCell::new(Vec::new()),
            next_subscriber_id: Cell::new(1),
            notifier: RefCell::new(notifier),
            stop_notifier: RefCell::new(None),
        }
    }

    fn targets(&self) -> Vec<Rc<dyn AnimationTarget>> {
        self.subscribers
            .borrow()
            .iter()
            .map(|(_, target)| Rc::clone(target))
            .collect()
    }

    fn stop_all(&self) {
        for target in self.targets() {
            target.stop();
        }
    }

    fn unsubscribe(&self, id: SubscriberId) {
        let now_empty = {
            let mut subscribers = self.subscribers.borrow_mut();
            let before = subscribers.len();
            subscribers.retain(|(existing, _)| *existing != id);
            before != subscribers.len() && subscribers.is_empty()
        };
        if now_empty {
            let stop = self.stop_notifier.borrow_mut().take();
            if let Some(stop) = stop {
                stop.run();
            }
        }
    }
}

/// Handle to a set of animation controls. Clones share state.
#[derive(Clone)]
pub struct AnimationControls {
    inner: Rc<ControlsInner>,
}

impl AnimationControls {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ControlsInner::new(None)),
        }
    }

    /// Controls that call `notifier` when the first target subscribes. The
    /// returned cleanup runs when the last target unsubscribes.
    pub fn with_notifier(notifier: impl FnMut(&AnimationControls) -> Cleanup + 'static) -> Self {
        Self {
            inner: Rc::new(ControlsInner::new(Some(Box::new(notifier)))),
        }
    }

    pub fn downgrade(&self) -> WeakAnimationControls {
        WeakAnimationControls(Rc::downgrade(&self.inner))
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.has_mounted.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    pub fn pending_count(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    /// Adds a target. It stays subscribed until the returned
    /// [`Subscription`] is cancelled or dropped.
    pub fn subscribe(&self, target: Rc<dyn AnimationTarget>) -> Subscription {
        let id = self.inner.next_subscriber_id.get();
        self.inner.next_subscriber_id.set(id + 1);
        let first = {
            let mut subscribers = self.inner.subscribers.borrow_mut();
            subscribers.push((id, target));
            subscribers.len() == 1
        };
        if first {
            self.notify_start();
        }
        Subscription {
            controls: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    fn notify_start(&self) {
        let notifier = self.inner.notifier.borrow_mut().take();
        if let Some(mut notifier) = notifier {
            let stop = notifier(self);
            *self.inner.notifier.borrow_mut() = Some(notifier);
            if let Some(previous) = self.inner.stop_notifier.borrow_mut().replace(stop) {
                log::warn!("animation controls restarted before teardown; dropping stale cleanup");
                drop(previous);
            }
        }
    }

    /// Animates every subscriber towards `definition`, or queues it until mount.
    ///
    /// Values that cannot be interpolated are set instantly.
    pub fn start(&self, definition: AnimationDefinition) -> StartStatus {
        if !self.is_mounted() {
            self.inner.pending.borrow_mut().push(definition);
            return StartStatus::Queued;
        }
        let targets = self.inner.targets();
        for target in &targets {
            animate_target(target.as_ref(), &definition);
        }
        StartStatus::Started(targets.len())
    }

    /// Instantly sets every subscriber to the definition's values.
    pub fn set(&self, definition: &AnimationDefinition) -> Result<(), MotionError> {
        if !self.is_mounted() {
            return Err(MotionError::NotMounted { operation: "set" });
        }
        for target in self.inner.targets() {
            for (key, value) in definition.values() {
                target.set_value(key, value);
            }
        }
        Ok(())
    }

    pub fn stop(&self) {
        self.inner.stop_all();
    }

    /// Marks the controls mounted and starts everything queued before now.
    /// The returned cleanup unmounts them and stops all targets.
    pub fn mount(&self) -> Cleanup {
        self.inner.has_mounted.set(true);
        let pending = std::mem::take(&mut *self.inner.pending.borrow_mut());
        for definition in pending {
            self.start(definition);
        }

        let weak = Rc::downgrade(&self.inner);
        Cleanup::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.has_mounted.set(false);
                inner.stop_all();
            }
        })
    }
}

impl Default for AnimationControls {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AnimationControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationControls")
            .field("mounted", &self.is_mounted())
            .field("subscribers", &self.subscriber_count())
            .field("pending", &self.pending_count())
            .finish()
    }
}

fn animate_target(target: &dyn AnimationTarget, definition: &AnimationDefinition) {
    for (key, value) in definition.values() {
        if is_animatable(key, value) {
            let transition = resolve_transition(key, value, definition.transition());
            target.animate(key, &transition);
        } else {
            log::trace!("`{key}` is not animatable; setting instantly");
            target.set_value(key, value);
        }
    }
}

/// Weak counterpart of [`AnimationControls`].
#[derive(Clone)]
pub struct WeakAnimationControls(Weak<ControlsInner>);

impl WeakAnimationControls {
    pub fn upgrade(&self) -> Option<AnimationControls> {
        self.0.upgrade().map(|inner| AnimationControls { inner })
    }
}

/// Keeps a target subscribed to its controls.
pub struct Subscription {
    controls: Weak<ControlsInner>,
    id: Option<SubscriberId>,
}

impl Subscription {
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(inner) = self.controls.upgrade() {
                inner.unsubscribe(id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "tests/controls_tests.rs"]
mod tests;
