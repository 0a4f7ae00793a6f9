//! Local futures polled at the end of each flush.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use futures_task::ArcWake;

use crate::platform::RuntimeScheduler;

type LocalFuture = Pin<Box<dyn Future<Output = ()> + 'static>>;
pub type TaskId = u64;

/// Shared between the runtime and the wakers it hands out.
type ReadyQueue = Arc<Mutex<Vec<TaskId>>>;

struct TaskWaker {
    id: TaskId,
    ready: ReadyQueue,
    scheduler: Arc<dyn RuntimeScheduler>,
}

impl ArcWake for TaskWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self
            .ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(arc_self.id);
        arc_self.scheduler.schedule_flush();
    }
}

pub(crate) struct LocalTasks {
    scheduler: Arc<dyn RuntimeScheduler>,
    next_id: Cell<TaskId>,
    tasks: RefCell<HashMap<TaskId, LocalFuture>>,
    ready: ReadyQueue,
}

impl LocalTasks {
    pub(crate) fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            next_id: Cell::new(1),
            tasks: RefCell::new(HashMap::new()),
            ready: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn spawn(&self, future: LocalFuture) -> TaskId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.tasks.borrow_mut().insert(id, future);
        self.ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id);
        id
    }

    pub(crate) fn has_ready(&self) -> bool {
        !self
            .ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Polls every task that was woken before this call. Tasks woken while
    /// polling wait for the next flush.
    pub(crate) fn poll_ready(&self) {
        let ready: Vec<TaskId> = std::mem::take(
            &mut *self.ready.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for id in ready {
            let removed = self.tasks.borrow_mut().remove(&id);
            let Some(mut future) = removed else {
                continue;
            };
            let waker = futures_task::waker(Arc::new(TaskWaker {
                id,
                ready: Arc::clone(&self.ready),
                scheduler: Arc::clone(&self.scheduler),
            }));
            let mut cx = Context::from_waker(&waker);
            match future.as_mut().poll(&mut cx) {
                Poll::Ready(()) => log::trace!("local task {id} finished"),
                Poll::Pending => {
                    self.tasks.borrow_mut().insert(id, future);
                }
            }
        }
    }
}
