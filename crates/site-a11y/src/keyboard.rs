//! Page-level keyboard handling.
//!
//! Only two keys are handled: Escape closes the shown overlay, and Tab is
//! trapped inside it. Overlays are driven through the [`Overlay`] show/hide
//! contract; their animations belong to the host widget.

use serde::{Deserialize, Serialize};

use crate::focus::{FocusMove, FocusTarget, trap_tab};

/// Keys the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Tab,
    Escape,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A key press with its modifier state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: Key,
    #[serde(default)]
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// A dialog-like widget that can be shown and hidden.
pub trait Overlay {
    fn is_shown(&self) -> bool;
    fn show(&mut self);
    fn hide(&mut self);
    /// Elements inside the overlay, in document order.
    fn elements(&self) -> &[FocusTarget];
}

/// A plain modal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modal {
    pub id: String,
    #[serde(default)]
    pub elements: Vec<FocusTarget>,
    #[serde(default)]
    shown: bool,
}

impl Modal {
    pub fn new(id: impl Into<String>, elements: Vec<FocusTarget>) -> Self {
        Self {
            id: id.into(),
            elements,
            shown: false,
        }
    }
}

impl Overlay for Modal {
    fn is_shown(&self) -> bool {
        self.shown
    }

    fn show(&mut self) {
        tracing::debug!(modal = %self.id, "Showing modal");
        self.shown = true;
    }

    fn hide(&mut self) {
        tracing::debug!(modal = %self.id, "Hiding modal");
        self.shown = false;
    }

    fn elements(&self) -> &[FocusTarget] {
        &self.elements
    }
}

/// What the host must do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum KeyAction {
    /// Nothing to do; let the browser handle the key.
    Ignored,
    /// The shown overlay was hidden.
    Closed,
    /// Prevent the default and move focus to this overlay element.
    Focus { index: usize },
}

/// Handle a key press given the overlay (if any) and the index of the focused
/// element inside it.
pub fn handle_key<O: Overlay + ?Sized>(
    press: &KeyPress,
    overlay: Option<&mut O>,
    active: Option<usize>,
) -> KeyAction {
    let Some(overlay) = overlay.filter(|overlay| overlay.is_shown()) else {
        return KeyAction::Ignored;
    };

    match press.key {
        Key::Escape => {
            overlay.hide();
            KeyAction::Closed
        }
        Key::Tab => match trap_tab(overlay.elements(), active, press.shift) {
            FocusMove::Wrap { to } => KeyAction::Focus { index: to },
            FocusMove::Native => KeyAction::Ignored,
        },
        Key::Other(_) => KeyAction::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown_modal() -> Modal {
        let mut modal = Modal::new(
            "portfolio",
            vec![FocusTarget::new("button"), FocusTarget::new("a").with_href()],
        );
        modal.show();
        modal
    }

    #[test]
    fn test_escape_hides_shown_modal() {
        let mut modal = shown_modal();
        let action = handle_key(&KeyPress::new(Key::Escape), Some(&mut modal), None);
        assert_eq!(action, KeyAction::Closed);
        assert!(!modal.is_shown());
    }

    #[test]
    fn test_escape_without_modal() {
        let mut modal = Modal::new("portfolio", Vec::new());
        let action = handle_key(&KeyPress::new(Key::Escape), Some(&mut modal), None);
        assert_eq!(action, KeyAction::Ignored);
        assert_eq!(
            handle_key::<Modal>(&KeyPress::new(Key::Escape), None, None),
            KeyAction::Ignored
        );
    }

    #[test]
    fn test_tab_wraps_inside_modal() {
        let mut modal = shown_modal();
        let tab = KeyPress::new(Key::Tab);
        assert_eq!(
            handle_key(&tab, Some(&mut modal), Some(1)),
            KeyAction::Focus { index: 0 }
        );
        assert_eq!(
            handle_key(&tab.clone().with_shift(), Some(&mut modal), Some(0)),
            KeyAction::Focus { index: 1 }
        );
        assert_eq!(handle_key(&tab, Some(&mut modal), Some(0)), KeyAction::Ignored);
    }

    #[test]
    fn test_from_dom() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("Tab"), Key::Tab);
        assert_eq!(Key::from_dom("a"), Key::Other("a".to_string()));
    }
}
