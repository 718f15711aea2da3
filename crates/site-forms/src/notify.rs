//! Toast notifications raised by the form.
//!
//! Notifications are shown in the top-right corner and dismiss themselves
//! after a timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Notification severity, mapped to the alert styles of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl NotificationKind {
    /// Alert class applied by the renderer.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Info => "alert-info",
            Self::Warning => "alert-warning",
            Self::Danger => "alert-danger",
        }
    }
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    /// One entry per line; rendered with line breaks between them.
    pub lines: Vec<String>,
    /// Auto-dismiss delay.
    #[serde(with = "millis")]
    pub dismiss_after: Duration,
}

impl Notification {
    /// Default auto-dismiss delay.
    pub const DEFAULT_DISMISS: Duration = Duration::from_secs(5);

    pub fn new(kind: NotificationKind, lines: Vec<String>) -> Self {
        Self {
            kind,
            lines,
            dismiss_after: Self::DEFAULT_DISMISS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, vec![message.into()])
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Danger, vec![message.into()])
    }

    /// Override the auto-dismiss delay.
    #[must_use]
    pub fn with_dismiss_after(mut self, dismiss_after: Duration) -> Self {
        self.dismiss_after = dismiss_after;
        self
    }

    /// The full text, lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_lines() {
        let notification = Notification::new(
            NotificationKind::Danger,
            vec!["first".to_string(), "second".to_string()],
        );
        assert_eq!(notification.text(), "first\nsecond");
        assert_eq!(notification.kind.css_class(), "alert-danger");
        assert_eq!(notification.dismiss_after, Duration::from_secs(5));
    }

    #[test]
    fn test_serializes_dismiss_as_millis() {
        let notification = Notification::success("ok");
        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["dismiss_after"], 5000);
        assert_eq!(json["kind"], "success");
    }
}
