//! Run report JSON generation.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use super::writer::WrittenDocument;
use crate::domain::{ExtractStats, REPORT_SCHEMA_VERSION};

#[derive(Debug, Serialize)]
struct Report<'a> {
    schema_version: &'static str,
    stats: &'a ExtractStats,
    documents: Vec<DocumentEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct DocumentEntry<'a> {
    file: &'a str,
    queries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    interval_override: Option<u64>,
    sha256: &'a str,
}

/// Build the report document.
pub fn render_report(stats: &ExtractStats, documents: &[WrittenDocument]) -> Result<String> {
    let report = Report {
        schema_version: REPORT_SCHEMA_VERSION,
        stats,
        documents: documents
            .iter()
            .map(|d| DocumentEntry {
                file: &d.file_name,
                queries: d.queries,
                interval_override: (d.interval_override > 0).then_some(d.interval_override),
                sha256: &d.sha256,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn write_report(report_path: &Path, stats: &ExtractStats, documents: &[WrittenDocument]) -> Result<()> {
    let content = render_report(stats, documents)?;
    if let Some(parent) = report_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating report directory: {}", parent.display()))?;
    }
    std::fs::write(report_path, format!("{}\n", content))
        .with_context(|| format!("Failed writing report: {}", report_path.display()))?;
    Ok(())
}
