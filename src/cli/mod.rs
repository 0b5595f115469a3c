//! Command-line interface for fleet-convert
//!
//! One command: read the upstream query tree, write FleetDM documents.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::extract::extract_queries;
use crate::render::{write_fleet_documents, write_report};

mod utils;

use utils::normalize_legacy_flags;

/// Convert annotated osquery SQL files into FleetDM query documents
#[derive(Parser, Debug)]
#[command(name = "fleet-convert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the detection, policy and incident_response folders [default: upstream]
    #[arg(long, value_name = "PATH", env = "FLEET_CONVERT_UPSTREAM")]
    upstream: Option<PathBuf>,

    /// Directory receiving the generated YAML files [default: output]
    #[arg(long, value_name = "PATH", env = "FLEET_CONVERT_OUTPUT")]
    output: Option<PathBuf>,

    /// Path to config file (fleet-convert.toml or fleet-convert.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a JSON run report to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    convert(cli)
}

fn convert(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let file_config = load_config(&cwd, cli.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides { upstream: cli.upstream, output: cli.output, report: cli.report },
    );
    tracing::debug!(?config, "resolved configuration");

    let extraction = extract_queries(&config.upstream).context("Error parsing queries")?;
    println!("Parsed {} queries", extraction.records.len());

    let written = write_fleet_documents(&extraction.records, &config.output)
        .context("Error writing YAML")?;

    if let Some(report_path) = &config.report {
        write_report(report_path, &extraction.stats, &written)?;
        tracing::debug!("report written to {}", report_path.display());
    }

    println!("Successfully generated FleetDM YAML files");
    Ok(())
}
