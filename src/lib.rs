pub mod cli;
pub mod config;
pub mod filter;

use crate::cli::FilterInput;
use crate::config::TranslatorConfig;
use anyhow::Context;
use colored::Colorize;
use serde_json::Value;
use std::io::Read;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, ColorMode, Commands, cli_parse};
pub use config::{ConfigError, load_config};
pub use filter::{
    Combinator, FilterError, Operator, Query, WhereClause, translate_filter,
    translate_where_clause,
};

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries only the translated output.
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        debug!(error = %e, "global subscriber already installed");
    }
}

fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
}

/// Parse filter text as JSON, or JSON5 when requested
pub fn parse_filter_text(text: &str, json5: bool) -> anyhow::Result<Value> {
    if json5 {
        json5::from_str::<Value>(text).context("Filter is not valid JSON5")
    } else {
        serde_json::from_str::<Value>(text).context("Filter is not valid JSON")
    }
}

fn read_filter(input: &FilterInput, config: &TranslatorConfig) -> anyhow::Result<Value> {
    let text = match (&input.filter, &input.file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter file '{}'", path.display()))?,
        (None, None) => {
            debug!("reading filter from stdin");
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read filter from stdin")?;
            buf
        }
    };

    parse_filter_text(&text, input.json5 || config.json5)
}

fn print_operators() {
    println!("{}", "Operators".bold());
    for op in Operator::ALL {
        let rendering = match op.token() {
            Some(token) => format!("field{}value", token),
            None => "field>=low AND field<=high".to_string(),
        };
        println!("  {:<10} {}", op.name().cyan(), rendering);
    }
    println!("{}", "Combination operators".bold());
    for combinator in Combinator::ALL {
        println!(
            "  {:<10} (left {} right)",
            combinator.name().cyan(),
            combinator.token()
        );
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_tracing(cli.verbose, cli.quiet);
    apply_color_mode(cli.color);

    let config = load_config(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(path) = &cli.config {
        info!(path = %path.display(), "loaded config");
    }

    match &cli.command {
        Commands::Translate {
            input,
            resource_type,
            where_only,
        } => {
            let value = read_filter(input, &config)?;
            let output = if *where_only {
                translate_where_clause(&value)?
            } else {
                let resource_type = resource_type.as_deref().unwrap_or(&config.resource_type);
                translate_filter(&value, resource_type)?
            };
            println!("{}", output);
        }
        Commands::Check { input } => {
            let value = read_filter(input, &config)?;
            let query = Query::from_filter(&value, &config.resource_type)?;
            if !cli.quiet {
                println!("{} filter is valid", "ok:".green().bold());
                println!("  fields: {}", query.clause.fields().join(", "));
                println!("  depth:  {}", query.clause.depth());
            }
        }
        Commands::Operators => print_operators(),
    }

    Ok(())
}
