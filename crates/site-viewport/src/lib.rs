//! Scroll and visibility state for the page.
//!
//! Everything here is a function of geometry the host reads from the page
//! (section offsets, scroll position, element rectangles). Nothing listens to
//! events or touches the DOM; the runtime feeds events in and hands results to
//! the renderer.
//!
//! - `section` - which navigation section is active
//! - `progress` - scroll progress bar, back-to-top button, parallax
//! - `geometry` - rectangles, visible fraction, device class
//! - `nav` - anchor scrolling and the collapsible mobile menu
//! - `reveal` - reveal-on-scroll and lazy image bookkeeping
//! - `animate` - number counters and typewriter text

pub mod animate;
pub mod geometry;
pub mod nav;
pub mod progress;
pub mod reveal;
pub mod section;

pub use animate::{CounterAnimation, CounterFrame, Typewriter, parse_leading_int};
pub use geometry::{DeviceClass, Rect, Viewport};
pub use nav::{AnchorNavigation, AnchorScroll, MobileMenu, scroll_target};
pub use progress::{ScrollState, back_to_top_visible, parallax_offset, scroll_progress};
pub use reveal::{LazyImage, LazyImageLoader, RevealObserver, loading_attribute};
pub use section::{ActiveSectionTracker, Section, active_link, current_section};
