//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI arguments
//! with proper precedence (CLI > Env > File > Defaults).

use serde::Deserialize;
use std::path::PathBuf;

pub mod loader;

pub use loader::load_config;

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root containing the `detection`, `policy` and `incident_response` directories.
    pub upstream: PathBuf,
    /// Directory receiving the generated documents.
    pub output: PathBuf,
    /// Optional JSON run report.
    pub report: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self { upstream: PathBuf::from("upstream"), output: PathBuf::from("output"), report: None }
    }
}

/// Values given on the command line (or through their environment variables).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub upstream: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

pub fn merge_cli_with_config(config: Config, cli: CliOverrides) -> Config {
    Config {
        upstream: cli.upstream.unwrap_or(config.upstream),
        output: cli.output.unwrap_or(config.output),
        report: cli.report.or(config.report),
    }
}
