//! Scroll-derived indicators.

use serde::{Deserialize, Serialize};

/// Scroll geometry sampled on a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    /// Pixels scrolled from the top of the document.
    pub scroll_top: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
    /// Full scrollable height of the document.
    pub document_height: f64,
}

impl ScrollState {
    /// Create a scroll sample.
    pub fn new(scroll_top: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            document_height,
        }
    }

    /// Scroll progress for this sample. See [`scroll_progress`].
    pub fn progress(&self) -> f64 {
        scroll_progress(self.scroll_top, self.document_height, self.viewport_height)
    }
}

/// Percentage of the scrollable distance covered, clamped to `0..=100`.
///
/// Returns 0 for pages that cannot scroll (document no taller than the
/// viewport).
pub fn scroll_progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 || scrollable.is_nan() {
        return 0.0;
    }
    let percent = scroll_top / scrollable * 100.0;
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// Whether the back-to-top button should be shown.
pub fn back_to_top_visible(scroll_top: f64, threshold: f64) -> bool {
    scroll_top > threshold
}

/// Vertical translation for `[data-parallax]` elements (moves at half speed, upwards).
pub fn parallax_offset(scrolled: f64) -> f64 {
    scrolled * -0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_progress_bounds() {
        assert_eq!(scroll_progress(0.0, 2000.0, 800.0), 0.0);
        assert_eq!(scroll_progress(1200.0, 2000.0, 800.0), 100.0);
        assert_eq!(scroll_progress(600.0, 2000.0, 800.0), 50.0);
    }

    #[test]
    fn test_scroll_progress_non_scrollable() {
        assert_eq!(scroll_progress(0.0, 0.0, 800.0), 0.0);
        assert_eq!(scroll_progress(100.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn test_scroll_progress_clamps_overscroll() {
        // Rubber-band scrolling reports positions outside the document
        assert_eq!(scroll_progress(-40.0, 2000.0, 800.0), 0.0);
        assert_eq!(scroll_progress(1300.0, 2000.0, 800.0), 100.0);
    }

    #[test]
    fn test_back_to_top() {
        assert!(!back_to_top_visible(300.0, 300.0));
        assert!(back_to_top_visible(301.0, 300.0));
    }

    #[test]
    fn test_parallax_offset() {
        assert_eq!(parallax_offset(200.0), -100.0);
        assert_eq!(parallax_offset(0.0), 0.0);
    }

    #[test]
    fn test_scroll_state_progress() {
        let state = ScrollState::new(300.0, 800.0, 2000.0);
        assert_eq!(state.progress(), 25.0);
    }
}
