//! Shader variant list CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use svl_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

use svl_cli::commands::{
    column_order, load_config, load_layout, load_list, run_append, run_defrag, run_init,
};
use svl_document::DocumentError;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_options, print_summary, print_variants};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            report(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::Init(args) => {
            let result = run_init(&args.shader, &args.options, args.output.as_deref(), config)?;
            print_summary(&result);
        }
        Command::Append(args) => {
            let result = run_append(&args.list, &args.options, &args.rows, args.defrag, config)?;
            print_summary(&result);
        }
        Command::Defrag(args) => {
            let result = run_defrag(&args.list, config)?;
            print_summary(&result);
        }
        Command::Show(args) => {
            let list = load_list(&args.list)?;
            let layout = args.options.as_deref().map(load_layout).transpose()?;
            print_variants(&list, &column_order(&list, layout.as_ref()));
        }
        Command::Options(args) => {
            print_options(&load_layout(&args.layout)?);
        }
    }
    Ok(())
}

fn report(error: &anyhow::Error) {
    eprintln!("error: {error:#}");
    let document_error = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<DocumentError>());
    if let Some(document_error) = document_error {
        eprintln!("  {}", document_error.user_message());
        if let Some(suggestion) = document_error.suggestion() {
            eprintln!("  hint: {suggestion}");
        }
    }
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
