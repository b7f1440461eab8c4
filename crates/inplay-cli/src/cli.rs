//! CLI argument definitions for inplay.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `signals` | Compute the signal set from the loader's snapshot files |
//! | `rank` | Rank symbols by in-play score |
//! | `config` | Show the effective engine config and data paths |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings and errors as failures |
//! | `--config` | none | JSON engine config file |
//! | `--log-level` | `INPLAY_LOG` or `warn` | Log filter for stderr diagnostics |
//!
//! # Examples
//!
//! ```bash
//! # Compute signals from the default data directory and save the report
//! inplay signals --save
//!
//! # Top five names, with the score broken down per component
//! inplay rank --top 5 --breakdown --format table
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Day-trading signal engine
///
/// Reads daily prices and trading snapshots written by the loader and
/// derives gap, range, volume, volatility and in-play signals per symbol.
#[derive(Debug, Parser)]
#[command(name = "inplay", author, version, about = "Day-trading signal engine")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// JSON engine config file (volatility window, score weights).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `inplay_core=trace`.
    ///
    /// Overrides the INPLAY_LOG environment variable.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    Table,
    /// Single JSON object output.
    Json,
    /// Compact single-line JSON.
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute signals for every symbol in the prices file.
    Signals(SignalsArgs),

    /// Rank symbols by in-play score.
    Rank(RankArgs),

    /// Show the effective engine config and resolved data paths.
    Config,
}

/// Input file locations shared by the computing commands.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Prices snapshot file. Defaults to `$INPLAY_HOME/data/prices-sample.json`.
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Fundamentals snapshot file. Defaults to `$INPLAY_HOME/data/fundamentals-slim.json`.
    #[arg(long)]
    pub fundamentals: Option<PathBuf>,
}

/// Arguments for the `signals` command.
#[derive(Debug, Args)]
pub struct SignalsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the signals report to this file.
    #[arg(long, conflicts_with = "save")]
    pub out: Option<PathBuf>,

    /// Write the signals report to `$INPLAY_HOME/data/signals-today.json`.
    #[arg(long, default_value_t = false)]
    pub save: bool,
}

/// Arguments for the `rank` command.
#[derive(Debug, Args)]
pub struct RankArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of symbols to keep.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Include per-component score contributions.
    #[arg(long, default_value_t = false)]
    pub breakdown: bool,
}
