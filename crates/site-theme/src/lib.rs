//! Theme preference for the site.
//!
//! The page has two themes. The choice is read once at startup from a
//! [`PreferenceStore`] and written back synchronously every time the user
//! toggles it, so the next visit starts where the last one ended.
//!
//! Stores:
//! - [`MemoryStore`] - process-local, used by tests and embedders without
//!   persistent storage
//! - [`FileStore`] - a TOML file in the platform config directory, written
//!   atomically

mod error;
mod preference;
mod store;

pub use error::StoreError;
pub use preference::{THEME_KEY, Theme, ThemePreference};
pub use store::{FileStore, MemoryStore, PreferenceStore};
