//! In-page anchor navigation and the mobile menu.

/// Document scroll position that brings an element to `offset` pixels below
/// the top of the viewport (leaving room for the fixed navbar).
///
/// `element_top` is the element's viewport-relative top, `page_offset` the
/// current document scroll position.
pub fn scroll_target(element_top: f64, page_offset: f64, offset: f64) -> f64 {
    element_top + page_offset - offset
}

/// Collapsible navbar state on small screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    expanded: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Toggler button pressed. The toggler shows as active while expanded.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Collapse the menu. Returns whether it was open.
    pub fn collapse(&mut self) -> bool {
        std::mem::replace(&mut self.expanded, false)
    }
}

/// Result of clicking an in-page anchor whose target exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorScroll {
    /// Document position to smooth-scroll to.
    pub top: f64,
    /// Whether the mobile menu was open and has been collapsed.
    pub collapsed_menu: bool,
}

/// Handles clicks on `a[href^="#"]` links.
#[derive(Debug, Clone, Copy)]
pub struct AnchorNavigation {
    offset: f64,
}

impl AnchorNavigation {
    /// `offset` is the height reserved for the fixed navbar.
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }

    /// Resolve a click. `target_top` is the viewport-relative top of the
    /// element named by the href, or `None` if no such element exists (the
    /// click is still swallowed, nothing scrolls).
    pub fn click(&self, target_top: Option<f64>, page_offset: f64, menu: &mut MobileMenu) -> Option<AnchorScroll> {
        let element_top = target_top?;
        let collapsed_menu = menu.collapse();
        Some(AnchorScroll {
            top: scroll_target(element_top, page_offset, self.offset),
            collapsed_menu,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_target() {
        assert_eq!(scroll_target(400.0, 1000.0, 80.0), 1320.0);
        assert_eq!(scroll_target(-200.0, 1000.0, 80.0), 720.0);
    }

    #[test]
    fn test_click_collapses_open_menu() {
        let nav = AnchorNavigation::new(80.0);
        let mut menu = MobileMenu::new();
        menu.toggle();

        let scroll = nav.click(Some(500.0), 0.0, &mut menu).unwrap();
        assert_eq!(scroll.top, 420.0);
        assert!(scroll.collapsed_menu);
        assert!(!menu.is_expanded());
    }

    #[test]
    fn test_click_with_closed_menu() {
        let nav = AnchorNavigation::new(80.0);
        let mut menu = MobileMenu::new();
        let scroll = nav.click(Some(500.0), 0.0, &mut menu).unwrap();
        assert!(!scroll.collapsed_menu);
    }

    #[test]
    fn test_click_on_missing_target_does_nothing() {
        let nav = AnchorNavigation::new(80.0);
        let mut menu = MobileMenu::new();
        menu.toggle();

        assert!(nav.click(None, 0.0, &mut menu).is_none());
        assert!(menu.is_expanded());
    }
}
