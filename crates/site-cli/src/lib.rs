//! CLI library components for the site toolkit.

pub mod commands;
pub mod logging;
