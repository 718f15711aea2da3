//! Viewport-relative rectangles and breakpoints.

use serde::{Deserialize, Serialize};

/// A bounding rectangle relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Size of the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Fraction of this rectangle's area visible inside the viewport, after
    /// shrinking (negative margin) or growing the viewport's bottom edge by
    /// `bottom_margin`.
    ///
    /// Zero-area rectangles count as fully visible when their position is
    /// inside the root, matching how visibility observers report them.
    pub fn intersection_ratio(&self, viewport: Viewport, bottom_margin: f64) -> f64 {
        let root_bottom = viewport.height + bottom_margin;
        let visible_top = self.top.max(0.0);
        let visible_bottom = self.bottom().min(root_bottom);
        let visible_left = self.left.max(0.0);
        let visible_right = self.right().min(viewport.width);

        if visible_bottom < visible_top || visible_right < visible_left {
            return 0.0;
        }

        let area = self.width * self.height;
        if area <= 0.0 {
            return 1.0;
        }
        ((visible_bottom - visible_top) * (visible_right - visible_left) / area).clamp(0.0, 1.0)
    }
}

/// Responsive layout class derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    /// Widths below this are mobile.
    pub const TABLET_MIN_WIDTH: f64 = 768.0;
    /// Widths at or above this are desktop.
    pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;

    /// Classify a viewport width.
    pub fn for_width(width: f64) -> Self {
        if width < Self::TABLET_MIN_WIDTH {
            Self::Mobile
        } else if width < Self::DESKTOP_MIN_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
