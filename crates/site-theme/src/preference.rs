//! The theme value and its persisted preference.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::PreferenceStore;

/// Store key holding the theme.
pub const THEME_KEY: &str = "theme";

/// Page color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored value. Only the exact string `dark` selects dark.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Value written to the store and to the `data-theme` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon shown on the toggle: the theme a click switches to.
    pub fn icon_class(&self) -> &'static str {
        match self {
            Self::Light => "fa-moon",
            Self::Dark => "fa-sun",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The user's theme, backed by a store.
///
/// The in-memory value and the stored value never diverge: a toggle that
/// fails to persist leaves the theme unchanged.
#[derive(Debug)]
pub struct ThemePreference<S> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemePreference<S> {
    /// Read the stored theme. Absent, malformed and unreadable values all
    /// mean [`Theme::Light`].
    pub fn load(store: S) -> Self {
        let stored = match store.get(THEME_KEY) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "Could not read theme preference, using light");
                None
            }
        };
        if let Some(value) = stored.as_deref().filter(|v| !matches!(*v, "dark" | "light")) {
            tracing::warn!(value, "Unrecognized stored theme, using light");
        }

        let theme = Theme::from_stored(stored.as_deref());
        tracing::debug!(%theme, "Loaded theme preference");
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it. Returns the new theme.
    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        let next = self.theme.toggled();
        self.store.set(THEME_KEY, next.as_str())?;
        self.theme = next;
        tracing::info!(theme = %next, "Theme changed");
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_from_stored() {
        assert_eq!(Theme::from_stored(None), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("Dark")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("")), Theme::Light);
    }

    #[test]
    fn test_icon_and_attribute() {
        assert_eq!(Theme::Light.icon_class(), "fa-moon");
        assert_eq!(Theme::Dark.icon_class(), "fa-sun");
        assert_eq!(Theme::Dark.as_str(), "dark");
    }

    #[test]
    fn test_toggle_persists() {
        let mut preference = ThemePreference::load(MemoryStore::new());
        assert_eq!(preference.theme(), Theme::Light);

        assert_eq!(preference.toggle().unwrap(), Theme::Dark);
        assert_eq!(
            preference.store().get(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );

        assert_eq!(preference.toggle().unwrap(), Theme::Light);
        assert_eq!(
            preference.store().get(THEME_KEY).unwrap().as_deref(),
            Some("light")
        );
    }

    #[test]
    fn test_load_garbage_is_light() {
        let preference = ThemePreference::load(MemoryStore::with_value(THEME_KEY, "solarized"));
        assert_eq!(preference.theme(), Theme::Light);
    }
}
