//! Active section tracking for navigation highlighting.

use serde::{Deserialize, Serialize};

/// A navigable region of the page, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Element id, without the leading `#`.
    pub id: String,
    /// Distance from the top of the document in pixels.
    pub top: f64,
    /// Rendered height in pixels.
    pub height: f64,
}

impl Section {
    /// Create a section.
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Offset of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Id of the deepest section whose top is at or above `scroll_position + offset`.
///
/// Sections must be in document order. When several qualify the later one
/// wins, so scrolling down never regresses to an earlier section. Returns
/// `None` when no section has started yet.
pub fn current_section(sections: &[Section], scroll_position: f64, offset: f64) -> Option<&str> {
    let threshold = scroll_position + offset;
    sections
        .iter()
        .rev()
        .find(|section| section.top <= threshold)
        .map(|section| section.id.as_str())
}

/// The nav link whose href targets `section_id` (`#id`), if any.
pub fn active_link<'a>(hrefs: &[&'a str], section_id: Option<&str>) -> Option<&'a str> {
    let id = section_id?;
    hrefs
        .iter()
        .copied()
        .find(|href| href.strip_prefix('#') == Some(id))
}

/// Remembers the active section between scroll events.
///
/// [`update`](Self::update) reports a change only when the active section
/// differs from the previous event, so the renderer only swaps the `active`
/// class when it has to.
#[derive(Debug, Clone, Default)]
pub struct ActiveSectionTracker {
    offset: f64,
    current: Option<String>,
}

impl ActiveSectionTracker {
    /// Create a tracker that activates sections `offset` pixels early.
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            current: None,
        }
    }

    /// The active section id.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Recompute for a scroll position. Returns `Some(new)` when it changed,
    /// where `new` is `None` if the page is above every section.
    pub fn update(&mut self, sections: &[Section], scroll_position: f64) -> Option<Option<String>> {
        let next = current_section(sections, scroll_position, self.offset);
        if next == self.current.as_deref() {
            return None;
        }

        tracing::debug!(
            from = self.current.as_deref().unwrap_or("-"),
            to = next.unwrap_or("-"),
            "active section changed"
        );
        self.current = next.map(str::to_string);
        Some(self.current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<Section> {
        vec![
            Section::new("hero", 0.0, 500.0),
            Section::new("about", 500.0, 500.0),
            Section::new("contact", 1000.0, 500.0),
        ]
    }

    #[test]
    fn test_current_section() {
        let sections = page();
        assert_eq!(current_section(&sections, 520.0, 80.0), Some("about"));
        assert_eq!(current_section(&sections, 30.0, 80.0), Some("hero"));
        assert_eq!(current_section(&sections, 1600.0, 80.0), Some("contact"));
    }

    #[test]
    fn test_section_activates_at_offset_boundary() {
        let sections = page();
        assert_eq!(current_section(&sections, 420.0, 80.0), Some("about"));
        assert_eq!(current_section(&sections, 419.0, 80.0), Some("hero"));
    }

    #[test]
    fn test_no_section_qualifies() {
        let sections = vec![Section::new("intro", 200.0, 400.0)];
        assert_eq!(current_section(&sections, 0.0, 80.0), None);
        assert_eq!(current_section(&[], 1000.0, 80.0), None);
    }

    #[test]
    fn test_later_section_wins_tie() {
        let sections = vec![
            Section::new("a", 100.0, 0.0),
            Section::new("b", 100.0, 300.0),
        ];
        assert_eq!(current_section(&sections, 100.0, 0.0), Some("b"));
    }

    #[test]
    fn test_active_link() {
        let hrefs = ["#hero", "#about", "/blog", "#contact"];
        assert_eq!(active_link(&hrefs, Some("about")), Some("#about"));
        assert_eq!(active_link(&hrefs, Some("missing")), None);
        assert_eq!(active_link(&hrefs, None), None);
    }

    #[test]
    fn test_tracker_reports_changes_only() {
        let sections = page();
        let mut tracker = ActiveSectionTracker::new(80.0);

        assert_eq!(tracker.update(&sections, 0.0), Some(Some("hero".to_string())));
        assert_eq!(tracker.update(&sections, 100.0), None);
        assert_eq!(tracker.update(&sections, 600.0), Some(Some("about".to_string())));
        assert_eq!(tracker.current(), Some("about"));
    }

    #[test]
    fn test_tracker_reports_leaving_all_sections() {
        let sections = vec![Section::new("intro", 300.0, 400.0)];
        let mut tracker = ActiveSectionTracker::new(0.0);

        assert_eq!(tracker.update(&sections, 400.0), Some(Some("intro".to_string())));
        assert_eq!(tracker.update(&sections, 0.0), Some(None));
        assert_eq!(tracker.current(), None);
    }
}
