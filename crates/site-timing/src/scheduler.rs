//! Timer scheduling capability.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// Opaque handle identifying a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Create a handle from a raw timer id.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Raw timer id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Something that can run a task after a delay and cancel it before it runs.
///
/// All scheduling happens on a single execution context. Implementations must
/// never run a task synchronously from inside `schedule`, even for a zero
/// delay: zero-delay tasks run on the next tick.
pub trait Scheduler {
    /// Run `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Cancel a timer. Returns `false` if it already ran or was canceled.
    fn cancel(&self, handle: TimerHandle) -> bool;
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        (**self).schedule(delay, task)
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        (**self).cancel(handle)
    }
}

// =============================================================================
// MANUAL SCHEDULER
// =============================================================================

/// A virtual-clock scheduler driven explicitly by the caller.
///
/// Time only moves when [`advance`](Self::advance) or [`tick`](Self::tick) is
/// called. Timers due at the same instant fire in scheduling order.
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    /// Pending timers ordered by (due time, id).
    timers: BTreeMap<(Duration, u64), Task>,
    /// Timer id -> due time, for cancellation.
    due_by_id: HashMap<u64, Duration>,
}

impl ManualScheduler {
    /// Create a scheduler with the clock at zero and no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Fire every timer that is already due without moving the clock.
    pub fn tick(&self) -> usize {
        self.advance(Duration::ZERO)
    }

    /// Move the clock forward by `by`, firing due timers in order.
    ///
    /// Tasks may schedule or cancel timers; a timer scheduled by a task fires
    /// in the same call if it falls due before the target time. Returns the
    /// number of tasks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.borrow().now + by;
        let mut fired = 0;

        loop {
            let task = {
                let mut state = self.state.borrow_mut();
                let Some((&(due, id), _)) = state.timers.first_key_value() else {
                    break;
                };
                if due > target {
                    break;
                }
                state.due_by_id.remove(&id);
                state.now = due;
                state.timers.remove(&(due, id))
            };

            // The borrow is released before running: tasks re-enter the scheduler.
            if let Some(task) = task {
                task();
                fired += 1;
            }
        }

        self.state.borrow_mut().now = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay;
        state.timers.insert((due, id), task);
        state.due_by_id.insert(id, due);
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let mut state = self.state.borrow_mut();
        match state.due_by_id.remove(&handle.0) {
            Some(due) => state.timers.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("pending", &state.timers.len())
            .finish()
    }
}
