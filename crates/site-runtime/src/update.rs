//! Render updates handed to the host.

use serde::Serialize;
use site_a11y::KeyAction;
use site_forms::FormEvent;
use site_theme::Theme;
use site_viewport::DeviceClass;

/// One unit of derived state for the rendering host to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "update", rename_all = "snake_case")]
pub enum RenderUpdate {
    /// The active section changed; highlight `link` (if any) in the navbar.
    ActiveSection {
        section: Option<String>,
        link: Option<String>,
    },
    /// Width of the scroll indicator, in percent.
    ScrollProgress { percent: f64 },
    BackToTop { visible: bool },
    /// `translateY` for parallax elements, in pixels.
    Parallax { offset: f64 },
    DeviceClass { class: DeviceClass },
    /// Smooth-scroll the document.
    ScrollTo { top: f64, duration_ms: u64 },
    MobileMenu { expanded: bool },
    /// Play the reveal animation on an element.
    Reveal { index: usize, delay_ms: u64 },
    /// Set an image's `src` and drop its `lazy` class.
    LoadImage { index: usize, src: String },
    Counter { index: usize, value: u64 },
    Typing { index: usize, text: String },
    Form(FormEvent),
    /// Set `data-theme` and the toggle icon.
    Theme { theme: Theme, icon: String },
    /// Result of a handled key press.
    Keyboard(KeyAction),
    /// New `top` of the skip link, in pixels.
    SkipLink { top: i32 },
    /// Give an unlabeled button an `aria-label`.
    AriaLabel { index: usize, label: String },
    /// Set a card's landmark `role`.
    Role { index: usize, role: String },
    /// Add a `loading` attribute to an image.
    ImageLoading { index: usize, loading: String },
}

impl RenderUpdate {
    pub(crate) fn theme(theme: Theme) -> Self {
        Self::Theme {
            theme,
            icon: theme.icon_class().to_string(),
        }
    }

    /// Short name of the update kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ActiveSection { .. } => "active_section",
            Self::ScrollProgress { .. } => "scroll_progress",
            Self::BackToTop { .. } => "back_to_top",
            Self::Parallax { .. } => "parallax",
            Self::DeviceClass { .. } => "device_class",
            Self::ScrollTo { .. } => "scroll_to",
            Self::MobileMenu { .. } => "mobile_menu",
            Self::Reveal { .. } => "reveal",
            Self::LoadImage { .. } => "load_image",
            Self::Counter { .. } => "counter",
            Self::Typing { .. } => "typing",
            Self::Form(_) => "form",
            Self::Theme { .. } => "theme",
            Self::Keyboard(_) => "keyboard",
            Self::SkipLink { .. } => "skip_link",
            Self::AriaLabel { .. } => "aria_label",
            Self::Role { .. } => "role",
            Self::ImageLoading { .. } => "image_loading",
        }
    }
}
