//! Page structure and visibility snapshots captured by the host.

use serde::{Deserialize, Serialize};
use site_viewport::{Rect, Section, Viewport};

/// A `[data-typing]` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingElement {
    /// Text to type out.
    pub text: String,
    /// Raw `data-typing` attribute (milliseconds per character).
    #[serde(default)]
    pub speed: Option<String>,
}

/// A `<button>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonElement {
    /// Visible text content.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub aria_label: Option<String>,
}

/// An input inside the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub name: String,
    /// The `type` attribute (`textarea` for text areas).
    #[serde(default = "default_input_type", rename = "type")]
    pub input_type: String,
    #[serde(default)]
    pub required: bool,
}

fn default_input_type() -> String {
    "text".to_string()
}

/// Everything the runtime needs to know about the page at startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// `section[id]` elements in document order.
    pub sections: Vec<Section>,
    /// `href` of each navbar link.
    pub nav_links: Vec<String>,
    /// Whether any `[data-parallax]` element exists.
    pub parallax: bool,
    /// Number of elements animated on first reveal.
    pub reveal_elements: usize,
    /// `data-src` of each lazy image.
    pub lazy_images: Vec<String>,
    /// Raw `data-counter` attribute of each counter.
    pub counters: Vec<String>,
    pub typing: Vec<TypingElement>,
    pub buttons: Vec<ButtonElement>,
    /// `class` attribute of each card-like element.
    pub cards: Vec<String>,
    /// Existing `loading` attribute of each `<img>`.
    pub images: Vec<Option<String>>,
    /// Contact form inputs; the standard contact form is used when empty.
    pub form_inputs: Vec<FormInput>,
}

/// Element rectangles observed in one visibility pass.
///
/// Each list is index-aligned with the matching [`PageLayout`] list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilitySnapshot {
    pub viewport: Viewport,
    pub reveal: Vec<Rect>,
    pub lazy_images: Vec<Rect>,
    pub counters: Vec<Rect>,
    pub typing: Vec<Rect>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_partial_json() {
        let layout: PageLayout = serde_json::from_str(
            r##"{
                "sections": [{"id": "hero", "top": 0.0, "height": 600.0}],
                "nav_links": ["#hero"],
                "typing": [{"text": "Hello"}]
            }"##,
        )
        .unwrap();
        assert_eq!(layout.sections.len(), 1);
        assert!(!layout.parallax);
        assert!(layout.counters.is_empty());
        assert_eq!(layout.typing[0].speed, None);
        assert!(layout.form_inputs.is_empty());
    }

    #[test]
    fn test_markup_elements_from_json() {
        let layout: PageLayout = serde_json::from_str(
            r#"{
                "buttons": [{"text": "Send"}, {"text": "", "aria_label": "Close"}],
                "images": [null, "eager"],
                "form_inputs": [{"name": "email", "type": "email", "required": true}, {"name": "company"}]
            }"#,
        )
        .unwrap();
        assert_eq!(layout.buttons[1].aria_label.as_deref(), Some("Close"));
        assert_eq!(layout.images, vec![None, Some("eager".to_string())]);
        assert_eq!(layout.form_inputs[1].input_type, "text");
        assert!(!layout.form_inputs[1].required);
    }
}
