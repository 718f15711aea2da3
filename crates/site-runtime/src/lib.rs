//! Page composition root.
//!
//! [`SiteRuntime`] owns one page's worth of behavior: it receives raw host
//! events, routes them through the rate limiters, the viewport tracker, the
//! contact form, the accessibility helpers and the theme preference, and
//! collects the resulting [`RenderUpdate`]s for the host to apply.
//!
//! Configuration lives in an explicit [`SiteConfig`] value, loadable from
//! TOML.

mod config;
mod error;
mod layout;
mod runtime;
mod update;

pub use config::SiteConfig;
pub use error::ConfigError;
pub use layout::{
    ButtonElement, FormInput, PageLayout, TypingElement, VisibilitySnapshot,
};
pub use runtime::SiteRuntime;
pub use update::RenderUpdate;
