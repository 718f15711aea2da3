//! Trailing-edge debounce.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::scheduler::{Scheduler, TimerHandle};

/// Wrap `operation` so that it runs once, `delay` after the last call.
///
/// Every call cancels the previously scheduled run and schedules a new one
/// carrying the arguments of the latest call. Multiple arguments are passed as
/// a tuple.
pub fn debounce<A, S, F>(scheduler: S, delay: Duration, operation: F) -> Debounced<A, S>
where
    A: 'static,
    S: Scheduler,
    F: FnMut(A) + 'static,
{
    Debounced {
        shared: Rc::new(DebounceShared {
            pending: Cell::new(None),
            generation: Cell::new(0),
            operation: RefCell::new(Box::new(operation)),
        }),
        scheduler,
        delay,
    }
}

/// A debounced operation. See [`debounce`].
///
/// Dropping the wrapper cancels any pending run.
pub struct Debounced<A, S: Scheduler> {
    shared: Rc<DebounceShared<A>>,
    scheduler: S,
    delay: Duration,
}

struct DebounceShared<A> {
    /// The single outstanding timer, if any.
    pending: Cell<Option<TimerHandle>>,
    /// Bumped on every call and cancel; a timer only runs for its own generation.
    generation: Cell<u64>,
    operation: RefCell<Box<dyn FnMut(A)>>,
}

impl<A: 'static, S: Scheduler> Debounced<A, S> {
    /// Record a call. The operation runs after `delay` of quiet.
    pub fn call(&self, args: A) {
        self.cancel_pending();
        let generation = self.shared.generation.get();
        let weak: Weak<DebounceShared<A>> = Rc::downgrade(&self.shared);

        let handle = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                if shared.generation.get() != generation {
                    return;
                }
                shared.pending.set(None);
                match shared.operation.try_borrow_mut() {
                    Ok(mut operation) => (*operation)(args),
                    Err(_) => tracing::warn!("debounced operation is already running; call dropped"),
                }
            }),
        );
        self.shared.pending.set(Some(handle));
    }

    /// Cancel the pending run, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        self.cancel_pending()
    }

    /// Whether a run is scheduled.
    pub fn is_pending(&self) -> bool {
        self.shared.pending.get().is_some()
    }

    /// The quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn cancel_pending(&self) -> bool {
        self.shared.generation.set(self.shared.generation.get().wrapping_add(1));
        match self.shared.pending.take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }
}

impl<A, S: Scheduler> Drop for Debounced<A, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.shared.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<A, S: Scheduler> std::fmt::Debug for Debounced<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("delay", &self.delay)
            .field("pending", &self.shared.pending.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualScheduler;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl FnMut(u32) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |value| sink.borrow_mut().push(value))
    }

    #[test]
    fn test_burst_fires_once_with_last_args() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (calls, op) = recorder();
        let debounced = debounce(Rc::clone(&scheduler), Duration::from_millis(100), op);

        debounced.call(1);
        scheduler.advance(Duration::from_millis(50));
        debounced.call(2);
        scheduler.advance(Duration::from_millis(50));
        debounced.call(3);

        // 100ms after the first call but only 50ms after the last one
        scheduler.advance(Duration::from_millis(99));
        assert!(calls.borrow().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*calls.borrow(), vec![3]);
        assert!(!debounced.is_pending());
    }

    #[test]
    fn test_single_pending_timer() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (_calls, op) = recorder();
        let debounced = debounce(Rc::clone(&scheduler), Duration::from_millis(100), op);

        for value in 0..10 {
            debounced.call(value);
        }
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_zero_delay_fires_on_next_tick() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (calls, op) = recorder();
        let debounced = debounce(Rc::clone(&scheduler), Duration::ZERO, op);

        debounced.call(7);
        debounced.call(8);
        assert!(calls.borrow().is_empty());

        scheduler.tick();
        assert_eq!(*calls.borrow(), vec![8]);
    }

    #[test]
    fn test_cancel() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (calls, op) = recorder();
        let debounced = debounce(Rc::clone(&scheduler), Duration::from_millis(10), op);

        debounced.call(1);
        assert!(debounced.cancel());
        assert!(!debounced.cancel());
        scheduler.advance(Duration::from_millis(20));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_drop_cancels_pending() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (calls, op) = recorder();
        let debounced = debounce(Rc::clone(&scheduler), Duration::from_millis(10), op);

        debounced.call(1);
        drop(debounced);
        assert_eq!(scheduler.pending(), 0);
        scheduler.advance(Duration::from_millis(20));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (calls, op) = recorder();
        let debounced = debounce(Rc::clone(&scheduler), Duration::from_millis(10), op);

        debounced.call(1);
        scheduler.advance(Duration::from_millis(10));
        debounced.call(2);
        scheduler.advance(Duration::from_millis(10));
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }
}
