//! Territory lookup CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal, Write};
use tol_cli::commands::{build_pipeline, load_file, render_load, run_inspect, run_lookup};
use tol_cli::logging::{LogConfig, LogFormat, init_logging};
use tol_cli::repl::run_repl;
use tol_cli::settings::{OutputFormat, Settings, load_settings};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg, ReplArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = settings_from_cli(&cli);
    let result = {
        let mut stdout = io::stdout().lock();
        match &cli.command {
            Command::Lookup(args) => run_lookup(&settings, &args.file, &args.query, &mut stdout),
            Command::Inspect(args) => run_inspect(&settings, &args.file, &mut stdout),
            Command::Repl(args) => run_interactive(&settings, args, &mut stdout),
        }
    };
    let exit_code = match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            tracing::error!(%error, "command failed");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run_interactive(
    settings: &Settings,
    args: &ReplArgs,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let mut pipeline = build_pipeline(settings);
    if let Some(file) = &args.file {
        let outcome = load_file(&mut pipeline, file);
        let rendered = render_load(&pipeline, file, &outcome, settings.output.format);
        writeln!(out, "{rendered}")?;
    }
    run_repl(
        &mut pipeline,
        settings.output.format,
        io::stdin().lock(),
        out,
    )?;
    Ok(true)
}

/// Load settings and apply command-line overrides.
fn settings_from_cli(cli: &Cli) -> Settings {
    let mut settings = load_settings(cli.config.as_deref());
    if let Some(format) = cli.format {
        settings.output.format = match format {
            OutputFormatArg::Table => OutputFormat::Table,
            OutputFormatArg::Json => OutputFormat::Json,
        };
    }
    if let Some(max_file_size) = cli.max_file_size {
        settings.ingest.max_file_size = max_file_size;
    }
    settings
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
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
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
