//! Accessibility helpers.
//!
//! - `skip` - the "skip to main content" link
//! - `focus` - focusable element classification and the modal focus trap
//! - `aria` - derived ARIA labels and landmark roles
//! - `keyboard` - Tab and Escape handling against an [`Overlay`]

mod aria;
mod focus;
mod keyboard;
mod skip;

pub use aria::{CARD_ROLE, aria_label_for, card_role};
pub use focus::{FocusMove, FocusTarget, trap_tab};
pub use keyboard::{Key, KeyAction, KeyPress, Modal, Overlay, handle_key};
pub use skip::SkipLink;
