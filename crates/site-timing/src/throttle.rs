//! Leading-edge throttle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::scheduler::{Scheduler, TimerHandle};

/// Wrap `operation` so that it runs at most once per `interval`.
///
/// The first call runs immediately and starts a cooldown. Calls made during
/// the cooldown are dropped: nothing is queued and no trailing run happens.
/// A zero interval still holds the cooldown until the scheduler's next tick.
pub fn throttle<A, S, F>(scheduler: S, interval: Duration, operation: F) -> Throttled<A, S>
where
    A: 'static,
    S: Scheduler,
    F: FnMut(A) + 'static,
{
    Throttled {
        shared: Rc::new(ThrottleShared {
            cooling: Cell::new(false),
            cooldown: Cell::new(None),
            operation: RefCell::new(Box::new(operation)),
        }),
        scheduler,
        interval,
    }
}

/// A throttled operation. See [`throttle`].
pub struct Throttled<A, S: Scheduler> {
    shared: Rc<ThrottleShared<A>>,
    scheduler: S,
    interval: Duration,
}

struct ThrottleShared<A> {
    cooling: Cell<bool>,
    cooldown: Cell<Option<TimerHandle>>,
    operation: RefCell<Box<dyn FnMut(A)>>,
}

impl<A: 'static, S: Scheduler> Throttled<A, S> {
    /// Run the operation unless a cooldown is active. Returns whether it ran.
    pub fn call(&self, args: A) -> bool {
        if self.shared.cooling.get() {
            tracing::trace!("throttled call dropped during cooldown");
            return false;
        }

        // Enter the cooldown before running so re-entrant calls are dropped too.
        self.shared.cooling.set(true);
        match self.shared.operation.try_borrow_mut() {
            Ok(mut operation) => (*operation)(args),
            Err(_) => tracing::warn!("throttled operation is already running; call dropped"),
        }

        let weak = Rc::downgrade(&self.shared);
        let handle = self.scheduler.schedule(
            self.interval,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.cooling.set(false);
                    shared.cooldown.set(None);
                }
            }),
        );
        self.shared.cooldown.set(Some(handle));
        true
    }

    /// Whether calls are currently being dropped.
    pub fn is_cooling_down(&self) -> bool {
        self.shared.cooling.get()
    }

    /// The cooldown length.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<A, S: Scheduler> Drop for Throttled<A, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.shared.cooldown.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<A, S: Scheduler> std::fmt::Debug for Throttled<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttled")
            .field("interval", &self.interval)
            .field("cooling", &self.shared.cooling.get())
            .finish_non_exhaustive()
    }
}
