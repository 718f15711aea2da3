//! Field validation rules.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::field::{FieldKind, FieldSpec, ValidationResult};
use crate::phone::digits_only;

/// Something@something.something, no whitespace, exactly one `@` per side.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Optional `+`, no leading zero, at most 16 digits.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("Invalid phone regex"));

/// Kinds that must be filled in before the contact form can be sent.
const SUBMIT_REQUIRED: [FieldKind; 4] = [
    FieldKind::Name,
    FieldKind::Email,
    FieldKind::Subject,
    FieldKind::Message,
];

/// Validate one field.
///
/// Values are trimmed first. An empty optional field is valid: rules only
/// apply once something has been typed, or when the field is required.
pub fn validate(field: &FieldSpec) -> ValidationResult {
    let value = field.value.trim();
    if value.is_empty() && !field.required {
        return ValidationResult::Valid;
    }

    if accepts(field.kind, value) {
        ValidationResult::Valid
    } else {
        ValidationResult::invalid(field.kind.error_message())
    }
}

fn accepts(kind: FieldKind, value: &str) -> bool {
    match kind {
        FieldKind::Email => EMAIL_REGEX.is_match(value),
        FieldKind::Tel => PHONE_REGEX.is_match(&digits_only(value)),
        FieldKind::Name | FieldKind::Subject | FieldKind::Message | FieldKind::GenericRequired => {
            let min = kind.min_length().unwrap_or(1);
            value.chars().count() >= min
        }
    }
}

/// A field that failed validation at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name.
    pub field: String,
    pub kind: FieldKind,
    pub message: String,
}

/// Validate every field of a form for submission.
///
/// Name, email, subject and message are treated as required regardless of
/// their `required` attribute. Errors are returned in field order.
pub fn validate_form(fields: &[FieldSpec]) -> Vec<FieldError> {
    fields
        .iter()
        .filter_map(|field| {
            let required = field.required || SUBMIT_REQUIRED.contains(&field.kind);
            let checked = FieldSpec {
                required,
                ..field.clone()
            };
            match validate(&checked) {
                ValidationResult::Valid => None,
                ValidationResult::Invalid { message } => Some(FieldError {
                    field: field.name.clone(),
                    kind: field.kind,
                    message,
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: FieldKind, value: &str) -> FieldSpec {
        FieldSpec::new(kind.label(), kind, false).with_value(value)
    }

    fn is_valid(kind: FieldKind, value: &str) -> bool {
        validate(&field(kind, value)).is_valid()
    }

    #[test]
    fn test_email() {
        assert!(is_valid(FieldKind::Email, "test@example.com"));
        assert!(!is_valid(FieldKind::Email, "invalid-email"));
        assert!(!is_valid(FieldKind::Email, "test@"));
        assert!(!is_valid(FieldKind::Email, "a b@example.com"));
        assert!(!is_valid(FieldKind::Email, "a@@example.com"));
        assert!(is_valid(FieldKind::Email, "  padded@example.org  "));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid(FieldKind::Tel, "1234567890"));
        assert!(is_valid(FieldKind::Tel, "+1234567890"));
        assert!(!is_valid(FieldKind::Tel, "invalid-phone"));
        assert!(is_valid(FieldKind::Tel, "(123) 456-7890"));
        assert!(!is_valid(FieldKind::Tel, "0123456789"));
        assert!(is_valid(FieldKind::Tel, "1234567890123456"));
        assert!(!is_valid(FieldKind::Tel, "12345678901234567"));
    }

    #[test]
    fn test_length_rules() {
        assert!(!is_valid(FieldKind::Name, "A"));
        assert!(is_valid(FieldKind::Name, "Al"));
        assert!(!is_valid(FieldKind::Name, " A "));
        assert!(!is_valid(FieldKind::Subject, "Hey"));
        assert!(is_valid(FieldKind::Subject, "Hello"));
        assert!(!is_valid(FieldKind::Message, "Too short"));
        assert!(is_valid(FieldKind::Message, "Long enough"));
    }

    #[test]
    fn test_length_counts_characters() {
        // Two characters, four bytes
        assert!(is_valid(FieldKind::Name, "Şü"));
    }

    #[test]
    fn test_empty_optional_field_is_valid() {
        for kind in [FieldKind::Name, FieldKind::Email, FieldKind::Tel, FieldKind::Subject] {
            assert!(is_valid(kind, ""));
            assert!(is_valid(kind, "   "));
        }
    }

    #[test]
    fn test_required_generic() {
        let required = FieldSpec::new("company", FieldKind::GenericRequired, true);
        assert_eq!(
            validate(&required),
            ValidationResult::invalid("This field is required.")
        );
        assert!(validate(&required.with_value("ACME")).is_valid());
    }

    #[test]
    fn test_validate_form_requires_contact_fields() {
        let fields = vec![
            field(FieldKind::Name, ""),
            field(FieldKind::Email, "test@example.com"),
            field(FieldKind::Tel, ""),
            field(FieldKind::Subject, "Hi"),
            field(FieldKind::Message, "Hello there, friend"),
        ];
        let errors = validate_form(&fields);
        let names: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
        assert_eq!(names, vec!["name", "subject"]);
        assert_eq!(errors[0].message, "Name must be at least 2 characters.");
    }
}
