//! CLI argument definitions for the shader variant list tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "svl",
    version,
    about = "Shader variant lists - choose which shader option combinations get pre-compiled",
    long_about = "Create and maintain .shadervariantlist documents.\n\n\
                  A new list is expanded from the .systemoptions file next to a shader.\n\
                  Variants can be bulk-appended from CSV and the list defragmented."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Settings file with expansion and history limits (svl.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a variant list for a shader from its system options.
    Init(InitArgs),

    /// Append variants from a CSV file (header row = option names).
    Append(AppendArgs),

    /// Remove duplicate variants and renumber stable ids from 1.
    Defrag(DefragArgs),

    /// Print the variants of a list.
    Show(ShowArgs),

    /// Print the options declared by an option layout.
    Options(OptionsArgs),
}

#[derive(Parser)]
pub struct InitArgs {
    /// Path to the .shader file.
    #[arg(value_name = "SHADER")]
    pub shader: PathBuf,

    /// Option layout of the shader (JSON array of option descriptors).
    #[arg(long = "options", value_name = "LAYOUT")]
    pub options: PathBuf,

    /// Where to write the list (default: <SHADER>.shadervariantlist).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct AppendArgs {
    /// Path to the .shadervariantlist file.
    #[arg(value_name = "LIST")]
    pub list: PathBuf,

    /// Option layout of the list's shader.
    #[arg(long = "options", value_name = "LAYOUT")]
    pub options: PathBuf,

    /// CSV file; the first row names the options, every later row is a variant.
    #[arg(long = "rows", value_name = "CSV")]
    pub rows: PathBuf,

    /// Defragment the list after appending.
    #[arg(long = "defrag")]
    pub defrag: bool,
}

#[derive(Parser)]
pub struct DefragArgs {
    /// Path to the .shadervariantlist file.
    #[arg(value_name = "LIST")]
    pub list: PathBuf,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Path to the .shadervariantlist file.
    #[arg(value_name = "LIST")]
    pub list: PathBuf,

    /// Option layout used to order the columns.
    #[arg(long = "options", value_name = "LAYOUT")]
    pub options: Option<PathBuf>,
}

#[derive(Parser)]
pub struct OptionsArgs {
    /// Option layout (JSON array of option descriptors).
    #[arg(value_name = "LAYOUT")]
    pub layout: PathBuf,
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
