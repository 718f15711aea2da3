//! Theme persistence across simulated visits.

use std::fs;

use site_theme::{FileStore, MemoryStore, PreferenceStore, StoreError, THEME_KEY, Theme, ThemePreference};
use tempfile::tempdir;

/// A store whose writes always fail, like storage disabled by the browser.
struct ReadOnlyStore {
    inner: MemoryStore,
}

impl PreferenceStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable {
            reason: "read-only".to_string(),
        })
    }
}

#[test]
fn theme_survives_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.toml");

    let mut first_visit = ThemePreference::load(FileStore::new(&path));
    assert_eq!(first_visit.theme(), Theme::Light);
    first_visit.toggle().unwrap();

    let second_visit = ThemePreference::load(FileStore::new(&path));
    assert_eq!(second_visit.theme(), Theme::Dark);
}

#[test]
fn malformed_file_loads_light_and_is_repaired_on_toggle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.toml");
    fs::write(&path, "\u{0}\u{1} definitely not toml").unwrap();

    let mut preference = ThemePreference::load(FileStore::new(&path));
    assert_eq!(preference.theme(), Theme::Light);

    assert_eq!(preference.toggle().unwrap(), Theme::Dark);
    let reloaded = FileStore::new(&path);
    assert_eq!(reloaded.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn failed_toggle_leaves_theme_unchanged() {
    let store = ReadOnlyStore {
        inner: MemoryStore::with_value(THEME_KEY, "dark"),
    };
    let mut preference = ThemePreference::load(store);
    assert_eq!(preference.theme(), Theme::Dark);

    let err = preference.toggle().unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { .. }));
    assert_eq!(preference.theme(), Theme::Dark);
}

#[test]
fn boxed_store_works() {
    let store: Box<dyn PreferenceStore> = Box::new(MemoryStore::new());
    let mut preference = ThemePreference::load(store);
    assert_eq!(preference.toggle().unwrap(), Theme::Dark);
}
