//! Preference store errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or write a stored preference.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} preferences file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preferences could not be encoded.
    #[error("Failed to serialize preferences")]
    Serialization {
        #[source]
        source: toml::ser::Error,
    },

    /// The temp file was written but could not replace the target.
    #[error("Failed to complete preferences save")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store refuses writes (read-only or disabled storage).
    #[error("Preference storage unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::Serialization { .. } => {
                "An error occurred while saving your preferences.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save preferences to {}. Please check disk space and permissions.",
                target_path.display()
            ),
            Self::Unavailable { .. } => {
                "Your theme choice could not be saved in this browser session.".to_string()
            }
        }
    }

    /// Get a suggestion for how to resolve this error, if any.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } | Self::AtomicWriteFailed { .. } => {
                Some("Check that the config directory exists and is writable.")
            }
            Self::Unavailable { .. } => Some("Enable site storage to remember the theme."),
            Self::Serialization { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message() {
        let err = StoreError::Io {
            operation: "read",
            path: PathBuf::from("/tmp/preferences.toml"),
            source: std::io::Error::other("denied"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read preferences file: /tmp/preferences.toml"
        );
        assert_eq!(
            err.user_message(),
            "Could not read the file at /tmp/preferences.toml"
        );
        assert!(err.suggestion().is_some());
    }
}
