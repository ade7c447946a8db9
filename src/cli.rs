use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Translate ORM-style JSON where filters into query predicates
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML config file with defaults (resource type, input syntax)
    #[arg(long, global = true, env = "WHERE_TRANSLATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// When to use colored output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Where the filter text comes from
#[derive(Args, Debug, Clone)]
pub struct FilterInput {
    /// Filter as inline JSON (reads stdin when neither this nor --file is given)
    #[arg(conflicts_with = "file")]
    pub filter: Option<String>,

    /// Read the filter from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Parse input as JSON5 (unquoted keys, single-quoted strings)
    #[arg(long)]
    pub json5: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a filter into `SELECT <resource> WHERE <predicate>`
    Translate {
        #[command(flatten)]
        input: FilterInput,

        /// Resource type to select (defaults to the config value)
        #[arg(short, long)]
        resource_type: Option<String>,

        /// Input is a bare where clause; print only the predicate
        #[arg(short, long)]
        where_only: bool,
    },
    /// Validate a filter and list the fields it references
    Check {
        #[command(flatten)]
        input: FilterInput,
    },
    /// List supported operators and their predicate tokens
    Operators,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
