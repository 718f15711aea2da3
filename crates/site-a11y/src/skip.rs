//! Skip link.

use serde::{Deserialize, Serialize};

/// The first focusable element on the page, jumping past the navigation.
///
/// It sits above the viewport until it receives keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipLink {
    pub href: String,
    pub text: String,
    focused: bool,
}

impl SkipLink {
    /// `top` offset in px while not focused.
    pub const HIDDEN_TOP: i32 = -40;
    /// `top` offset in px while focused.
    pub const FOCUSED_TOP: i32 = 6;

    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
            focused: false,
        }
    }

    pub fn focus(&mut self) -> i32 {
        self.focused = true;
        self.top()
    }

    pub fn blur(&mut self) -> i32 {
        self.focused = false;
        self.top()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Current `top` offset in px.
    pub fn top(&self) -> i32 {
        if self.focused {
            Self::FOCUSED_TOP
        } else {
            Self::HIDDEN_TOP
        }
    }
}

impl Default for SkipLink {
    fn default() -> Self {
        Self::new("#main", "Skip to main content")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_moves_into_view() {
        let mut link = SkipLink::default();
        assert_eq!(link.href, "#main");
        assert_eq!(link.top(), -40);
        assert_eq!(link.focus(), 6);
        assert!(link.is_focused());
        assert_eq!(link.blur(), -40);
    }
}
