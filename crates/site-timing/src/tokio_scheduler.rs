//! Scheduler backed by tokio timers on a `LocalSet`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::scheduler::{Scheduler, Task, TimerHandle};

/// Runs tasks with `tokio::task::spawn_local` after a `tokio::time::sleep`.
///
/// Must be used from within a `tokio::task::LocalSet`; tasks are not `Send`.
/// Cancelling aborts the sleeping task.
#[derive(Debug, Default)]
pub struct TokioScheduler {
    next_id: Cell<u64>,
    timers: Rc<RefCell<HashMap<u64, AbortHandle>>>,
}

impl TokioScheduler {
    /// Create a scheduler with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers that have not yet fired.
    pub fn pending(&self) -> usize {
        self.timers.borrow().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let timers = Rc::clone(&self.timers);
        let join = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            timers.borrow_mut().remove(&id);
            task();
        });
        self.timers.borrow_mut().insert(id, join.abort_handle());
        TimerHandle::from_raw(id)
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        match self.timers.borrow_mut().remove(&handle.id()) {
            Some(abort) => {
                abort.abort();
                true
            }
            None => false,
        }
    }
}
