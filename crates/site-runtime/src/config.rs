//! Site configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use site_forms::SubmitLabels;

use crate::error::ConfigError;

/// Timing and layout constants for the page.
///
/// Every key is optional in the TOML file; missing keys keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Smooth-scroll and transition duration in milliseconds.
    pub animation_duration_ms: u64,

    /// Height reserved for the fixed navbar, in pixels.
    pub scroll_offset: f64,

    /// Quiet period before resize handling runs, in milliseconds.
    pub debounce_delay_ms: u64,

    /// Extra pixels below the navbar within which a section counts as active.
    pub active_section_slack: f64,

    pub nav_throttle_ms: u64,
    pub indicator_throttle_ms: u64,
    pub parallax_throttle_ms: u64,

    /// Scroll distance past which the back-to-top button shows.
    pub back_to_top_threshold: f64,
    pub back_to_top_throttle_ms: u64,

    /// Toast auto-dismiss delay in milliseconds.
    pub notification_dismiss_ms: u64,

    pub counter_duration_ms: u64,
    pub counter_frame_ms: u64,

    /// Delay added per element index to staggered reveal animations.
    pub reveal_stagger_ms: u64,

    /// Text of the contact form's submit button.
    pub submit_label: String,
    /// Submit button text while a submission is in flight.
    pub submit_busy_label: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: 300,
            scroll_offset: 80.0,
            debounce_delay_ms: 100,
            active_section_slack: 50.0,
            nav_throttle_ms: 100,
            indicator_throttle_ms: 10,
            parallax_throttle_ms: 10,
            back_to_top_threshold: 300.0,
            back_to_top_throttle_ms: 100,
            notification_dismiss_ms: 5000,
            counter_duration_ms: 2000, // 2 seconds
            counter_frame_ms: 16,      // ~60 fps
            reveal_stagger_ms: 100,
            submit_label: "Send Message".to_string(),
            submit_busy_label: "Sending...".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded site configuration");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no page could work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let distances = [
            ("scroll_offset", self.scroll_offset),
            ("active_section_slack", self.active_section_slack),
            ("back_to_top_threshold", self.back_to_top_threshold),
        ];
        for (key, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        if self.counter_frame_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "counter_frame_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|source| ConfigError::Serialize { source })
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    /// Offset used to pick the active section: navbar height plus slack.
    pub fn active_section_offset(&self) -> f64 {
        self.scroll_offset + self.active_section_slack
    }

    pub fn nav_throttle(&self) -> Duration {
        Duration::from_millis(self.nav_throttle_ms)
    }

    pub fn indicator_throttle(&self) -> Duration {
        Duration::from_millis(self.indicator_throttle_ms)
    }

    pub fn parallax_throttle(&self) -> Duration {
        Duration::from_millis(self.parallax_throttle_ms)
    }

    pub fn back_to_top_throttle(&self) -> Duration {
        Duration::from_millis(self.back_to_top_throttle_ms)
    }

    pub fn notification_dismiss(&self) -> Duration {
        Duration::from_millis(self.notification_dismiss_ms)
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    pub fn counter_frame(&self) -> Duration {
        Duration::from_millis(self.counter_frame_ms)
    }

    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(self.reveal_stagger_ms)
    }

    pub fn submit_labels(&self) -> SubmitLabels {
        SubmitLabels {
            idle: self.submit_label.clone(),
            busy: self.submit_busy_label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.scroll_offset, 80.0);
        assert_eq!(config.active_section_offset(), 130.0);
        assert_eq!(config.debounce_delay(), Duration::from_millis(100));
        assert_eq!(config.notification_dismiss(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SiteConfig::from_toml_str("scroll_offset = 64.0\nnav_throttle_ms = 50\n").unwrap();
        assert_eq!(config.scroll_offset, 64.0);
        assert_eq!(config.nav_throttle_ms, 50);
        assert_eq!(config.counter_duration_ms, 2000);
    }

    #[test]
    fn test_submit_labels() {
        assert_eq!(SiteConfig::default().submit_labels(), SubmitLabels::default());

        let config = SiteConfig::from_toml_str("submit_busy_label = \"Please wait\"\n").unwrap();
        let labels = config.submit_labels();
        assert_eq!(labels.idle, "Send Message");
        assert_eq!(labels.busy, "Please wait");
    }

    #[test]
    fn test_rejects_negative_offset() {
        let err = SiteConfig::from_toml_str("scroll_offset = -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "scroll_offset",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_frame() {
        let err = SiteConfig::from_toml_str("counter_frame_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "counter_frame_ms", .. }));
    }

    #[test]
    fn test_rejects_unparsable() {
        let err = SiteConfig::from_toml_str("scroll_offset = \"far\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn test_load_file_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");

        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        std::fs::write(&path, "debounce_delay_ms = [1]").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: Some(ref p), .. } if p == &path));

        std::fs::write(&path, "debounce_delay_ms = 250").unwrap();
        assert_eq!(SiteConfig::load(&path).unwrap().debounce_delay_ms, 250);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SiteConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(SiteConfig::from_toml_str(&text).unwrap(), config);
    }
}
