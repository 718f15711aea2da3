//! Focus classification and the modal focus trap.

use serde::{Deserialize, Serialize};

/// An element inside an overlay, as captured by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FocusTarget {
    /// Lowercase tag name.
    pub tag: String,
    /// Whether the element carries an `href` attribute.
    #[serde(default)]
    pub has_href: bool,
    /// Parsed `tabindex` attribute.
    #[serde(default)]
    pub tabindex: Option<i32>,
}

impl FocusTarget {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_href(mut self) -> Self {
        self.has_href = true;
        self
    }

    #[must_use]
    pub fn with_tabindex(mut self, tabindex: i32) -> Self {
        self.tabindex = Some(tabindex);
        self
    }

    /// Buttons, links with an `href`, form controls and anything with a
    /// `tabindex` other than `-1`.
    pub fn is_focusable(&self) -> bool {
        let by_tag = matches!(
            self.tag.as_str(),
            "button" | "input" | "select" | "textarea"
        );
        by_tag || self.has_href || self.tabindex.is_some_and(|index| index != -1)
    }
}

/// What a Tab press inside an open overlay should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "move", rename_all = "snake_case")]
pub enum FocusMove {
    /// Let the browser move focus normally.
    Native,
    /// Prevent the default and focus the element at this index.
    Wrap { to: usize },
}

impl FocusMove {
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Wrap { .. })
    }
}

/// Keep Tab focus cycling inside `elements`.
///
/// `active` is the index of the focused element within `elements`. Tab on
/// the last focusable wraps to the first; Shift+Tab on the first wraps to the
/// last. Every other press is left alone.
pub fn trap_tab(elements: &[FocusTarget], active: Option<usize>, shift: bool) -> FocusMove {
    let mut focusable = elements
        .iter()
        .enumerate()
        .filter(|(_, element)| element.is_focusable())
        .map(|(index, _)| index);

    let Some(first) = focusable.next() else {
        return FocusMove::Native;
    };
    let last = focusable.last().unwrap_or(first);

    match (active, shift) {
        (Some(current), true) if current == first => FocusMove::Wrap { to: last },
        (Some(current), false) if current == last => FocusMove::Wrap { to: first },
        _ => FocusMove::Native,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog() -> Vec<FocusTarget> {
        vec![
            FocusTarget::new("h5"),
            FocusTarget::new("button"),
            FocusTarget::new("input"),
            FocusTarget::new("div").with_tabindex(-1),
            FocusTarget::new("a").with_href(),
        ]
    }

    #[test]
    fn test_is_focusable() {
        assert!(FocusTarget::new("button").is_focusable());
        assert!(FocusTarget::new("textarea").is_focusable());
        assert!(FocusTarget::new("a").with_href().is_focusable());
        assert!(!FocusTarget::new("a").is_focusable());
        assert!(FocusTarget::new("div").with_tabindex(0).is_focusable());
        assert!(!FocusTarget::new("div").with_tabindex(-1).is_focusable());
        assert!(!FocusTarget::new("p").is_focusable());
    }

    #[test]
    fn test_tab_on_last_wraps_to_first() {
        assert_eq!(trap_tab(&dialog(), Some(4), false), FocusMove::Wrap { to: 1 });
    }

    #[test]
    fn test_shift_tab_on_first_wraps_to_last() {
        assert_eq!(trap_tab(&dialog(), Some(1), true), FocusMove::Wrap { to: 4 });
    }

    #[test]
    fn test_middle_is_native() {
        let elements = dialog();
        assert_eq!(trap_tab(&elements, Some(2), false), FocusMove::Native);
        assert_eq!(trap_tab(&elements, Some(2), true), FocusMove::Native);
        assert_eq!(trap_tab(&elements, None, false), FocusMove::Native);
        assert!(!FocusMove::Native.prevents_default());
    }

    #[test]
    fn test_single_focusable_wraps_to_itself() {
        let elements = vec![FocusTarget::new("button")];
        assert_eq!(trap_tab(&elements, Some(0), false), FocusMove::Wrap { to: 0 });
        assert_eq!(trap_tab(&elements, Some(0), true), FocusMove::Wrap { to: 0 });
    }

    #[test]
    fn test_nothing_focusable() {
        let elements = vec![FocusTarget::new("p")];
        assert_eq!(trap_tab(&elements, Some(0), false), FocusMove::Native);
    }
}
