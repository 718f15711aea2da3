//! CLI argument definitions for the site toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use site_forms::FieldKind;

#[derive(Parser)]
#[command(
    name = "site",
    version,
    about = "Exercise the site interactivity core from the terminal",
    long_about = "Exercise the site interactivity core from the terminal.\n\n\
                  Validate form values, locate sections, manage the stored theme\n\
                  and replay recorded page sessions on a virtual clock."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Print results as JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate values against a contact form field kind.
    Validate(ValidateArgs),

    /// Format phone numbers the way the phone input does while typing.
    FormatPhone {
        /// Raw phone inputs.
        #[arg(value_name = "VALUE", required = true)]
        values: Vec<String>,
    },

    /// Report the active section at each scroll position.
    Section(SectionArgs),

    /// Compute the scroll indicator width.
    Progress {
        #[arg(long = "scroll-top")]
        scroll_top: f64,
        #[arg(long = "document-height")]
        document_height: f64,
        #[arg(long = "viewport-height")]
        viewport_height: f64,
    },

    /// Show or toggle the stored theme.
    Theme(ThemeArgs),

    /// Submit a filled-in contact form to a simulated endpoint.
    Submit(SubmitArgs),

    /// Replay a recorded page session and print the render updates.
    Replay(ReplayArgs),

    /// Print the effective configuration as TOML.
    Config {
        /// Configuration file (defaults apply when omitted).
        #[arg(long = "config", value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Field kind to validate against.
    #[arg(long = "kind", value_enum)]
    pub kind: FieldKindArg,

    /// Treat the field as optional (empty values pass).
    #[arg(long = "optional")]
    pub optional: bool,

    /// Values to validate.
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,
}

#[derive(Parser)]
pub struct SectionArgs {
    /// JSON file with an array of `{id, top, height}` sections.
    #[arg(value_name = "SECTIONS")]
    pub sections: PathBuf,

    /// Scroll positions to look up.
    #[arg(long = "at", value_name = "PX", required = true, num_args = 1..)]
    pub positions: Vec<f64>,

    /// Offset added to the scroll position (defaults to the configured one).
    #[arg(long = "offset", value_name = "PX")]
    pub offset: Option<f64>,

    /// Configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub action: ThemeAction,

    /// Preference file (defaults to the platform config directory).
    #[arg(long = "store", value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Copy)]
pub enum ThemeAction {
    /// Print the stored theme.
    Show,
    /// Switch to the other theme and persist it.
    Toggle,
}

#[derive(Parser)]
pub struct SubmitArgs {
    /// JSON file with an object of field name to value.
    #[arg(value_name = "FORM")]
    pub form: PathBuf,

    /// Make the endpoint reject the submission with this reason.
    #[arg(long = "reject", value_name = "REASON")]
    pub reject: Option<String>,

    /// Endpoint latency in milliseconds.
    #[arg(long = "latency-ms", default_value_t = 0)]
    pub latency_ms: u64,
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// JSON replay script.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Field kinds accepted by `validate`.
#[derive(Clone, Copy, ValueEnum)]
pub enum FieldKindArg {
    Name,
    Email,
    Phone,
    Subject,
    Message,
    Text,
}

impl From<FieldKindArg> for FieldKind {
    fn from(arg: FieldKindArg) -> Self {
        match arg {
            FieldKindArg::Name => FieldKind::Name,
            FieldKindArg::Email => FieldKind::Email,
            FieldKindArg::Phone => FieldKind::Tel,
            FieldKindArg::Subject => FieldKind::Subject,
            FieldKindArg::Message => FieldKind::Message,
            FieldKindArg::Text => FieldKind::GenericRequired,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
