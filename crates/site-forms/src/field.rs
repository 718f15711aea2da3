//! Form field model.

use serde::{Deserialize, Serialize};

/// Which validation rule applies to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Full name, at least 2 characters.
    Name,
    /// Email address.
    Email,
    /// Message subject, at least 5 characters.
    Subject,
    /// Message body, at least 10 characters.
    Message,
    /// Phone number (formatted while typing).
    Tel,
    /// Any other field marked `required`.
    GenericRequired,
}

impl FieldKind {
    /// Minimum trimmed length for the length-checked kinds.
    pub fn min_length(&self) -> Option<usize> {
        match self {
            Self::Name => Some(2),
            Self::Subject => Some(5),
            Self::Message => Some(10),
            Self::GenericRequired => Some(1),
            Self::Email | Self::Tel => None,
        }
    }

    /// Message shown when a value fails this kind's rule.
    pub fn error_message(&self) -> &'static str {
        match self {
            Self::Name => "Name must be at least 2 characters.",
            Self::Email => "Please enter a valid email address.",
            Self::Subject => "Subject must be at least 5 characters.",
            Self::Message => "Message must be at least 10 characters.",
            Self::Tel => "Please enter a valid phone number.",
            Self::GenericRequired => "This field is required.",
        }
    }

    /// Kind for a host input, from its `type` attribute and `name`.
    ///
    /// The input type wins for `email` and `tel`; otherwise the contact form's
    /// well-known names are recognized and everything else is generic.
    pub fn from_input(input_type: &str, name: &str) -> Self {
        match input_type.trim().to_ascii_lowercase().as_str() {
            "email" => return Self::Email,
            "tel" => return Self::Tel,
            _ => {}
        }
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "email" => Self::Email,
            "subject" => Self::Subject,
            "message" => Self::Message,
            "phone" | "tel" => Self::Tel,
            _ => Self::GenericRequired,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::Tel => "tel",
            Self::GenericRequired => "required",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A form field as captured from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// The input's `name`, used as the submission key.
    pub name: String,
    pub kind: FieldKind,
    /// Current value as typed.
    #[serde(default)]
    pub value: String,
    /// Whether the input carries the `required` attribute.
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            value: String::new(),
            required,
        }
    }

    /// Field for a host input, classified by [`FieldKind::from_input`].
    pub fn from_input(name: impl Into<String>, input_type: &str, required: bool) -> Self {
        let name = name.into();
        let kind = FieldKind::from_input(input_type, &name);
        Self::new(name, kind, required)
    }

    /// Builder-style value setter.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ValidationResult {
    Valid,
    Invalid { message: String },
}

impl ValidationResult {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The error message, empty when valid.
    pub fn message(&self) -> &str {
        match self {
            Self::Valid => "",
            Self::Invalid { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input() {
        assert_eq!(FieldKind::from_input("email", "contact"), FieldKind::Email);
        assert_eq!(FieldKind::from_input("tel", "phone"), FieldKind::Tel);
        assert_eq!(FieldKind::from_input("text", "Name"), FieldKind::Name);
        assert_eq!(FieldKind::from_input("textarea", "message"), FieldKind::Message);
        assert_eq!(FieldKind::from_input("text", "company"), FieldKind::GenericRequired);
    }

    #[test]
    fn test_field_spec_from_input() {
        let field = FieldSpec::from_input("phone", "tel", false);
        assert_eq!(field.kind, FieldKind::Tel);
        assert!(!field.required);
        assert!(field.value.is_empty());
    }

    #[test]
    fn test_validation_result_message() {
        assert_eq!(ValidationResult::Valid.message(), "");
        let invalid = ValidationResult::invalid("nope");
        assert!(!invalid.is_valid());
        assert_eq!(invalid.message(), "nope");
    }
}
