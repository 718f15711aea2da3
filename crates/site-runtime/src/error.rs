//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or validate a [`SiteConfig`](crate::SiteConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read configuration file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has wrongly typed keys.
    #[error("Failed to parse site configuration")]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration could not be rendered.
    #[error("Failed to serialize site configuration")]
    Serialize {
        #[source]
        source: toml::ser::Error,
    },

    /// A key holds a value outside its allowed range.
    #[error("Invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { path, .. } => {
                format!("Could not read the configuration file at {}", path.display())
            }
            Self::Parse {
                path: Some(path),
                source,
            } => format!("The configuration file at {} is invalid: {}", path.display(), source.message()),
            Self::Parse { path: None, source } => {
                format!("The configuration is invalid: {}", source.message())
            }
            Self::Serialize { .. } => {
                "An error occurred while writing the configuration.".to_string()
            }
            Self::Invalid { key, reason } => format!("The setting `{key}` {reason}."),
        }
    }

    /// Get a suggestion for how to resolve this error, if any.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => Some("Check that the file exists and is readable."),
            Self::Parse { .. } => {
                Some("Run `site config` to print a valid configuration with every key.")
            }
            Self::Invalid { .. } => Some("Remove the key to fall back to its default."),
            Self::Serialize { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message() {
        let err = ConfigError::Invalid {
            key: "counter_frame_ms",
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for `counter_frame_ms`: must be greater than zero"
        );
        assert_eq!(
            err.user_message(),
            "The setting `counter_frame_ms` must be greater than zero."
        );
    }
}
