//! fleet-convert: Convert annotated osquery SQL files into FleetDM query documents
//!
//! Walks the `detection`, `policy` and `incident_response` folders of an
//! upstream query collection, reads the metadata in each file's header
//! comments, and writes one YAML document set per category plus a scheduled
//! detection set and a combined set.

use anyhow::Result;

mod cli;
mod config;
mod domain;
mod error;
mod extract;
mod render;
mod utils;

fn main() -> Result<()> {
    cli::run()
}
