//! Derived ARIA attributes.

/// Role given to every content card.
pub const CARD_ROLE: &str = "article";

/// Label for a button that has none: its trimmed text content, if any.
///
/// Returns `None` when the button already carries an `aria-label` or has no
/// visible text (icon-only buttons must be labeled in markup).
pub fn aria_label_for(existing: Option<&str>, text: &str) -> Option<String> {
    if existing.is_some() {
        return None;
    }
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Role to assign to an element with the given classes.
pub fn card_role<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<&'static str> {
    classes
        .into_iter()
        .any(|class| class == "card")
        .then_some(CARD_ROLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aria_label_for() {
        assert_eq!(
            aria_label_for(None, "  Send Message \n"),
            Some("Send Message".to_string())
        );
        assert_eq!(aria_label_for(None, "   "), None);
        assert_eq!(aria_label_for(Some("Close"), "×"), None);
    }

    #[test]
    fn test_card_role() {
        assert_eq!(card_role("card shadow-sm".split_whitespace()), Some("article"));
        assert_eq!(card_role(["card-body"]), None);
    }
}
