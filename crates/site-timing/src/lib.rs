//! Rate-limiting primitives for page event handlers.
//!
//! Scroll, resize and input events arrive far more often than the work they
//! trigger needs to run. This crate provides the two wrappers the site uses to
//! tame them:
//!
//! - [`Debounced`] - runs the operation once, after a quiet period following
//!   the last call, with the last call's arguments
//! - [`Throttled`] - runs the operation at most once per cooldown interval and
//!   drops calls made during the cooldown
//!
//! Neither wrapper owns a clock. Timers are requested from an injected
//! [`Scheduler`], which keeps the wrappers deterministic under test
//! ([`ManualScheduler`]) and lets a host plug in its own event loop
//! (`TokioScheduler` behind the `tokio` feature).
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use site_timing::{ManualScheduler, debounce};
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//!
//! let search = debounce(Rc::clone(&scheduler), Duration::from_millis(100), move |query: String| {
//!     sink.borrow_mut().push(query);
//! });
//!
//! search.call("r".to_string());
//! search.call("ru".to_string());
//! search.call("rust".to_string());
//! scheduler.advance(Duration::from_millis(100));
//!
//! assert_eq!(*seen.borrow(), vec!["rust".to_string()]);
//! ```

mod debounce;
mod scheduler;
mod throttle;
#[cfg(feature = "tokio")]
mod tokio_scheduler;

pub use debounce::{Debounced, debounce};
pub use scheduler::{ManualScheduler, Scheduler, Task, TimerHandle};
pub use throttle::{Throttled, throttle};
#[cfg(feature = "tokio")]
pub use tokio_scheduler::TokioScheduler;
