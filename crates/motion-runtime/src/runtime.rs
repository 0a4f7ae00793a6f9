use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use crate::platform::RuntimeScheduler;
use crate::tasks::{LocalTasks, TaskId};

type Task = Box<dyn FnOnce() + 'static>;

/// Clears the flushing flag when a flush ends, including by unwinding.
struct FlushGuard<'a>(&'a Cell<bool>);

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_flush: Cell<bool>,
    flushing: Cell<bool>,
    flush_count: Cell<u64>,
    updates: RefCell<VecDeque<Task>>,
    after_flush: RefCell<VecDeque<Task>>,
    tick_wakers: RefCell<Vec<Waker>>,
    tasks: LocalTasks,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            tasks: LocalTasks::new(Arc::clone(&scheduler)),
            scheduler,
            needs_flush: Cell::new(false),
            flushing: Cell::new(false),
            flush_count: Cell::new(0),
            updates: RefCell::new(VecDeque::new()),
            after_flush: RefCell::new(VecDeque::new()),
            tick_wakers: RefCell::new(Vec::new()),
        }
    }

    fn schedule(&self) {
        self.needs_flush.set(true);
        self.scheduler.schedule_flush();
    }

    fn enqueue_update(&self, update: Task) {
        self.updates.borrow_mut().push_back(update);
        self.schedule();
    }

    fn enqueue_after_flush(&self, callback: Task) {
        self.after_flush.borrow_mut().push_back(callback);
        self.schedule();
    }

    fn register_tick_waker(&self, waker: &Waker) {
        let mut wakers = self.tick_wakers.borrow_mut();
        if !wakers.iter().any(|existing| existing.will_wake(waker)) {
            wakers.push(waker.clone());
        }
        drop(wakers);
        self.schedule();
    }

    fn spawn_local(&self, future: Pin<Box<dyn Future<Output = ()> + 'static>>) -> TaskId {
        let id = self.tasks.spawn(future);
        self.schedule();
        id
    }

    fn needs_flush(&self) -> bool {
        self.needs_flush.get() || self.tasks.has_ready()
    }

    /// Runs queued updates, then the callbacks waiting for this flush, then
    /// resumes futures waiting on [`Tick`]. Work queued while flushing lands
    /// in the next flush.
    fn flush(&self) {
        if self.flushing.replace(true) {
            log::trace!("flush requested while flushing; deferred");
            return;
        }
        let _guard = FlushGuard(&self.flushing);
        self.needs_flush.set(false);

        let updates: Vec<Task> = self.updates.borrow_mut().drain(..).collect();
        for update in updates {
            update();
        }

        self.flush_count.set(self.flush_count.get() + 1);
        let callbacks: Vec<Task> = self.after_flush.borrow_mut().drain(..).collect();
        for callback in callbacks {
            callback();
        }

        let wakers: Vec<Waker> = self.tick_wakers.borrow_mut().drain(..).collect();
        for waker in wakers {
            waker.wake();
        }
        self.tasks.poll_ready();
    }
}

/// The update runtime. Cloning shares the same queues.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle(Rc::downgrade(&self.inner))
    }

    pub fn needs_flush(&self) -> bool {
        self.inner.needs_flush()
    }

    /// Number of completed flushes.
    pub fn flush_count(&self) -> u64 {
        self.inner.flush_count.get()
    }

    pub fn flush(&self) {
        self.inner.flush();
    }

    /// Number of spawned futures that have not finished yet.
    pub fn pending_task_count(&self) -> usize {
        self.inner.tasks.len()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Arc::new(crate::DefaultScheduler))
    }
}

/// Weak handle to a [`Runtime`], held by anything that queues work on it.
#[derive(Clone)]
pub struct RuntimeHandle(Weak<RuntimeInner>);

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Queues a reactive update for the next flush. Dropped if the runtime is gone.
    pub fn enqueue_update(&self, update: impl FnOnce() + 'static) {
        if let Some(inner) = self.0.upgrade() {
            inner.enqueue_update(Box::new(update));
        }
    }

    /// Runs `callback` once the next flush has applied its updates.
    ///
    /// Without a live runtime nothing will ever flush again, so the callback
    /// runs immediately.
    pub fn after_flush(&self, callback: impl FnOnce() + 'static) {
        if let Some(inner) = self.0.upgrade() {
            inner.enqueue_after_flush(Box::new(callback));
        } else {
            callback();
        }
    }

    /// A future that completes after the next flush.
    pub fn tick(&self) -> Tick {
        let target = self
            .0
            .upgrade()
            .map(|inner| inner.flush_count.get() + 1)
            .unwrap_or(0);
        Tick {
            runtime: self.clone(),
            target,
        }
    }

    /// Spawns a future polled at the end of each flush it was woken for.
    /// Returns `None` if the runtime is gone.
    pub fn spawn_local(&self, future: impl Future<Output = ()> + 'static) -> Option<TaskId> {
        self.0
            .upgrade()
            .map(|inner| inner.spawn_local(Box::pin(future)))
    }

    pub fn flush(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.flush();
        }
    }

    pub fn needs_flush(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.needs_flush())
            .unwrap_or(false)
    }

    pub fn flush_count(&self) -> u64 {
        self.0
            .upgrade()
            .map(|inner| inner.flush_count.get())
            .unwrap_or(0)
    }
}

/// Completes once the runtime has flushed past the point the tick was created.
#[must_use = "futures do nothing unless polled"]
pub struct Tick {
    runtime: RuntimeHandle,
    target: u64,
}

impl Future for Tick {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let Some(inner) = self.runtime.0.upgrade() else {
            return Poll::Ready(());
        };
        if inner.flush_count.get() >= self.target {
            Poll::Ready(())
        } else {
            inner.register_tick_waker(cx.waker());
            Poll::Pending
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
