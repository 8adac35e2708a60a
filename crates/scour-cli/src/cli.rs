//! CLI argument definitions for the scour workbench shell.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use scour_model::TieBreak;

#[derive(Parser)]
#[command(
    name = "scour",
    version,
    about = "Scour - scrub typed tabular data from the command line",
    long_about = "Clean typed CSV tables: drop unused values and useless columns,\n\
                  keep one row per key tuple, re-express a table under another\n\
                  table's schema, bin continuous columns and shuffle columns."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a table's schema and row count.
    Info(InfoArgs),

    /// Drop unused values and useless columns.
    Purge(PurgeArgs),

    /// Keep one row per key tuple.
    Unique(UniqueArgs),

    /// Re-express a table under another table's schema.
    Apply(ApplyArgs),

    /// Replace continuous columns with equal-width bins.
    Discretize(DiscretizeArgs),

    /// Shuffle column values independently across rows.
    Shuffle(ShuffleArgs),
}

#[derive(Parser)]
pub struct InfoArgs {
    /// Path to a typed CSV table.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,
}

#[derive(Parser)]
pub struct PurgeArgs {
    /// Path to a typed CSV table.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Keep feature value lists in their current order.
    #[arg(long = "no-sort-features")]
    pub no_sort_features: bool,

    /// Keep unused feature values.
    #[arg(long = "no-reduce-features")]
    pub no_reduce_features: bool,

    /// Keep constant and all-missing feature columns.
    #[arg(long = "no-remove-features")]
    pub no_remove_features: bool,

    /// Keep class value lists in their current order.
    #[arg(long = "no-sort-classes")]
    pub no_sort_classes: bool,

    /// Keep unused class values.
    #[arg(long = "no-reduce-classes")]
    pub no_reduce_classes: bool,

    /// Keep constant and all-missing class columns.
    #[arg(long = "no-remove-classes")]
    pub no_remove_classes: bool,

    /// Keep unused meta values.
    #[arg(long = "no-reduce-metas")]
    pub no_reduce_metas: bool,

    /// Keep constant and all-missing meta columns.
    #[arg(long = "no-remove-metas")]
    pub no_remove_metas: bool,

    /// Write the purged table here (default: report only).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct UniqueArgs {
    /// Path to a typed CSV table.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Key column; repeat for a compound key (default: all features).
    #[arg(long = "key", value_name = "COL")]
    pub keys: Vec<String>,

    /// Which row of a key group survives.
    #[arg(long = "tiebreak", value_enum, default_value = "last")]
    pub tiebreak: TieBreakArg,

    /// Seed for the random tie-break.
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Write the deduplicated table here (default: report only).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Path to a typed CSV table.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Table whose schema the input is re-expressed under.
    #[arg(long = "template", value_name = "TABLE")]
    pub template: PathBuf,

    /// Write the converted table here (default: report only).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DiscretizeArgs {
    /// Path to a typed CSV table.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Number of equal-width bins per column.
    #[arg(long = "bins", value_name = "N")]
    pub bins: usize,

    /// Also bin continuous class columns.
    #[arg(long = "classes")]
    pub classes: bool,

    /// Also bin continuous meta columns.
    #[arg(long = "metas")]
    pub metas: bool,

    /// Keep continuous columns that lack two distinct finite values.
    #[arg(long = "keep-constant")]
    pub keep_constant: bool,

    /// Write the discretized table here (default: report only).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ShuffleArgs {
    /// Path to a typed CSV table.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Also shuffle feature columns.
    #[arg(long = "features")]
    pub features: bool,

    /// Leave class columns in place.
    #[arg(long = "no-classes")]
    pub no_classes: bool,

    /// Also shuffle meta columns.
    #[arg(long = "metas")]
    pub metas: bool,

    /// Seed for reproducible permutations.
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Write the shuffled table here (default: report only).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI tie-break choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum TieBreakArg {
    Last,
    First,
    Middle,
    Random,
    DiscardNonUnique,
}

impl TieBreakArg {
    pub fn tiebreak(self) -> TieBreak {
        match self {
            Self::Last => TieBreak::Last,
            Self::First => TieBreak::First,
            Self::Middle => TieBreak::Middle,
            Self::Random => TieBreak::Random,
            Self::DiscardNonUnique => TieBreak::DiscardNonUnique,
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
