//! Site toolkit CLI.

use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use serde::Serialize;
use site_cli::commands::{
    SimulatedEndpoint, effective_config, format_phones, load_payload, load_script, load_sections,
    locate_sections, progress, replay, simulate_submit, theme_show, theme_store, theme_toggle,
    validate_values,
};
use site_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ThemeAction};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli.command, cli.json) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = %error, "Command failed");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Command, json: bool) -> Result<i32> {
    match command {
        Command::Validate(args) => {
            let rows = validate_values(args.kind.into(), !args.optional, &args.values);
            emit(json, rows.as_slice(), summary::print_validation)?;
            Ok(if rows.iter().all(|row| row.result.is_valid()) { 0 } else { 1 })
        }
        Command::FormatPhone { values } => {
            let rows = format_phones(&values);
            emit(json, rows.as_slice(), summary::print_phones)?;
            Ok(0)
        }
        Command::Section(args) => {
            let offset = match args.offset {
                Some(offset) => offset,
                None => effective_config(args.config.as_deref())?.active_section_offset(),
            };
            let sections = load_sections(&args.sections)?;
            let rows = locate_sections(&sections, offset, &args.positions);
            emit(json, rows.as_slice(), summary::print_sections)?;
            Ok(0)
        }
        Command::Progress {
            scroll_top,
            document_height,
            viewport_height,
        } => {
            let percent = progress(scroll_top, document_height, viewport_height);
            emit(json, &percent, |percent| println!("{percent:.2}%"))?;
            Ok(0)
        }
        Command::Theme(args) => {
            let store = theme_store(args.store.as_deref());
            let theme = match args.action {
                ThemeAction::Show => theme_show(store),
                ThemeAction::Toggle => theme_toggle(store)?,
            };
            emit(json, &theme, |theme| summary::print_theme(*theme))?;
            Ok(0)
        }
        Command::Submit(args) => {
            let payload = load_payload(&args.form)?;
            let endpoint = SimulatedEndpoint {
                reject: args.reject,
                latency: Duration::from_millis(args.latency_ms),
            };
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("failed to start the async runtime")?;
            let report = runtime.block_on(simulate_submit(&payload, &endpoint));
            emit(json, &report, summary::print_submit)?;
            Ok(if report.delivered { 0 } else { 1 })
        }
        Command::Replay(args) => {
            let config = effective_config(args.config.as_deref())?;
            let script = load_script(&args.script)?;
            let frames = replay(script, config)?;
            emit(json, frames.as_slice(), summary::print_replay)?;
            Ok(0)
        }
        Command::Config { config } => {
            let config = effective_config(config.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", config.to_toml_string()?);
            }
            Ok(0)
        }
    }
}

/// Print `value` as JSON or through `table`.
fn emit<T, F>(json: bool, value: &T, table: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T),
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        table(value);
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level_filter(cli.verbosity.tracing_level_filter());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config = config
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_log_file(cli.log_file.clone());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
