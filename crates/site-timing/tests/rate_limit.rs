//! Timing guarantees of the debounce and throttle wrappers.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use site_timing::{ManualScheduler, debounce, throttle};

fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(T) + 'static) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    (calls, move |value| sink.borrow_mut().push(value))
}

proptest! {
    /// Calls spaced closer than the delay collapse into one trailing run.
    #[test]
    fn debounce_burst_fires_once_after_last_call(
        delay_ms in 0u64..500,
        gaps in prop::collection::vec(0u64..500, 1..20),
    ) {
        let scheduler = Rc::new(ManualScheduler::new());
        let (calls, op) = recorder::<usize>();
        let debounced = debounce(Rc::clone(&scheduler), Duration::from_millis(delay_ms), op);

        debounced.call(0);
        for (index, gap) in gaps.iter().enumerate() {
            // Keep every gap strictly inside the quiet period. With a zero delay
            // the calls are back-to-back within one tick.
            if delay_ms > 0 {
                scheduler.advance(Duration::from_millis(gap % delay_ms));
            }
            debounced.call(index + 1);
        }
        let last_call_at = scheduler.now();

        if delay_ms > 0 {
            scheduler.advance(Duration::from_millis(delay_ms - 1));
            prop_assert!(calls.borrow().is_empty());
        }
        scheduler.advance(Duration::from_millis(if delay_ms == 0 { 0 } else { 1 }));

        prop_assert_eq!(calls.borrow().clone(), vec![gaps.len()]);
        prop_assert_eq!(scheduler.now(), last_call_at + Duration::from_millis(delay_ms));
    }

    /// Three synchronous calls run once; a call after the interval runs again.
    #[test]
    fn throttle_fires_once_per_interval(interval_ms in 0u64..1_000) {
        let scheduler = Rc::new(ManualScheduler::new());
        let (calls, op) = recorder::<u32>();
        let throttled = throttle(Rc::clone(&scheduler), Duration::from_millis(interval_ms), op);

        throttled.call(1);
        throttled.call(2);
        throttled.call(3);
        prop_assert_eq!(calls.borrow().clone(), vec![1]);

        scheduler.advance(Duration::from_millis(interval_ms));
        prop_assert!(throttled.call(4));
        prop_assert_eq!(calls.borrow().clone(), vec![1, 4]);
    }
}

#[test]
fn debounce_with_tuple_arguments() {
    let scheduler = Rc::new(ManualScheduler::new());
    let (calls, op) = recorder::<(String, u32)>();
    let debounced = debounce(Rc::clone(&scheduler), Duration::from_millis(100), op);

    debounced.call(("first".to_string(), 1));
    debounced.call(("second".to_string(), 2));
    scheduler.advance(Duration::from_millis(100));

    assert_eq!(*calls.borrow(), vec![("second".to_string(), 2)]);
}

#[test]
fn independent_wrappers_share_a_scheduler() {
    let scheduler = Rc::new(ManualScheduler::new());
    let (nav, nav_op) = recorder::<f64>();
    let (bar, bar_op) = recorder::<f64>();
    let nav_throttle = throttle(Rc::clone(&scheduler), Duration::from_millis(100), nav_op);
    let bar_throttle = throttle(Rc::clone(&scheduler), Duration::from_millis(10), bar_op);

    for step in 0..20 {
        let position = f64::from(step) * 5.0;
        nav_throttle.call(position);
        bar_throttle.call(position);
        scheduler.advance(Duration::from_millis(5));
    }

    // 100ms of events at 5ms spacing
    assert_eq!(nav.borrow().len(), 1);
    assert_eq!(bar.borrow().len(), 10);
}
