//! Output file grouping and writing

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::yaml::write_documents;
use crate::domain::{Category, QueryRecord, SCHEDULED_INTERVAL_SECS};
use crate::error::{ConvertError, Result};
use crate::utils::sha256_hex;

const FILE_PREFIX: &str = "chainguard";

/// One output file and the records that go into it.
#[derive(Debug)]
pub struct DocumentPlan<'a> {
    pub file_name: String,
    pub records: Vec<&'a QueryRecord>,
    /// Interval forced onto every record, 0 to keep each record's own.
    pub interval_override: u64,
}

/// Summary of a file written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    pub path: PathBuf,
    pub file_name: String,
    pub queries: usize,
    pub interval_override: u64,
    pub sha256: String,
}

/// Group records into output files.
///
/// Order: one file per non-empty category, the scheduled detection file when
/// there are detection queries, then the combined file (always present).
pub fn plan_documents(records: &[QueryRecord]) -> Vec<DocumentPlan<'_>> {
    let mut plans = Vec::new();

    for category in Category::ALL {
        let members: Vec<&QueryRecord> = records.iter().filter(|q| q.category == category).collect();
        if members.is_empty() {
            continue;
        }
        plans.push(DocumentPlan {
            file_name: format!("{}-{}.yml", FILE_PREFIX, category.slug()),
            records: members,
            interval_override: 0,
        });
    }

    let detection: Vec<&QueryRecord> =
        records.iter().filter(|q| q.category == Category::Detection).collect();
    if !detection.is_empty() {
        plans.push(DocumentPlan {
            file_name: format!("{}-detection-5min.yml", FILE_PREFIX),
            records: detection,
            interval_override: SCHEDULED_INTERVAL_SECS,
        });
    }

    plans.push(DocumentPlan {
        file_name: format!("{}-all.yml", FILE_PREFIX),
        records: records.iter().collect(),
        interval_override: 0,
    });

    plans
}

/// Create `output_dir` if needed and write every planned document into it.
///
/// Prints one progress line per file. The first I/O failure aborts the run.
pub fn write_fleet_documents(records: &[QueryRecord], output_dir: &Path) -> Result<Vec<WrittenDocument>> {
    fs::create_dir_all(output_dir)
        .map_err(|source| ConvertError::CreateOutputDir { path: output_dir.to_path_buf(), source })?;

    let mut written = Vec::new();
    for plan in plan_documents(records) {
        let path = output_dir.join(&plan.file_name);
        let doc = write_plan(&plan, &path)?;

        if doc.interval_override > 0 {
            println!(
                "Wrote {} ({} queries, {}-min interval)",
                doc.path.display(),
                doc.queries,
                doc.interval_override / 60
            );
        } else {
            println!("Wrote {} ({} queries)", doc.path.display(), doc.queries);
        }
        written.push(doc);
    }
    Ok(written)
}

fn write_plan(plan: &DocumentPlan<'_>, path: &Path) -> Result<WrittenDocument> {
    let write_err = |source| ConvertError::Write { path: path.to_path_buf(), source };

    let mut buf = Vec::new();
    write_documents(&mut buf, plan.records.iter().copied(), plan.interval_override)
        .map_err(write_err)?;

    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    out.write_all(&buf).map_err(write_err)?;
    out.flush().map_err(write_err)?;
    tracing::debug!("wrote {} bytes to {}", buf.len(), path.display());

    Ok(WrittenDocument {
        path: path.to_path_buf(),
        file_name: plan.file_name.clone(),
        queries: plan.records.len(),
        interval_override: plan.interval_override,
        sha256: sha256_hex(&buf),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str, category: Category, interval: u64) -> QueryRecord {
        QueryRecord {
            name: name.to_string(),
            description: name.to_string(),
            query: "SELECT 1;".to_string(),
            platform: None,
            tags: vec![],
            interval,
            level: 0,
            category,
            subcategory: None,
        }
    }

    #[test]
    fn test_plan_documents_full_set() {
        let records = vec![
            record("d1", Category::Detection, 0),
            record("p1", Category::Policy, 0),
            record("d2", Category::Detection, 60),
            record("i1", Category::IncidentResponse, 0),
        ];
        let plans = plan_documents(&records);
        let names: Vec<&str> = plans.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "chainguard-detection.yml",
                "chainguard-policy.yml",
                "chainguard-incident-response.yml",
                "chainguard-detection-5min.yml",
                "chainguard-all.yml",
            ]
        );

        let detection: Vec<&str> = plans[0].records.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(detection, vec!["d1", "d2"]);
        assert_eq!(plans[3].interval_override, 300);

        let all: Vec<&str> = plans[4].records.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(all, vec!["d1", "p1", "d2", "i1"]);
    }

    #[test]
    fn test_plan_documents_skips_empty_categories() {
        let records = vec![record("i1", Category::IncidentResponse, 0)];
        let names: Vec<String> = plan_documents(&records).into_iter().map(|p| p.file_name).collect();
        assert_eq!(names, vec!["chainguard-incident-response.yml", "chainguard-all.yml"]);
    }

    #[test]
    fn test_plan_documents_no_records() {
        let plans = plan_documents(&[]);
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].file_name, "chainguard-all.yml");
        assert!(plans[0].records.is_empty());
    }

    #[test]
    fn test_write_fleet_documents_creates_files() {
        let tmp = TempDir::new().unwrap();
        let out_dir = tmp.path().join("nested/output");
        let records = vec![record("d1", Category::Detection, 0), record("i1", Category::IncidentResponse, 0)];

        let written = write_fleet_documents(&records, &out_dir).unwrap();
        assert_eq!(written.len(), 4);
        assert!(!out_dir.join("chainguard-policy.yml").exists());

        let scheduled = fs::read_to_string(out_dir.join("chainguard-detection-5min.yml")).unwrap();
        assert!(scheduled.contains("  interval: 300\n"));
        let detection = fs::read_to_string(out_dir.join("chainguard-detection.yml")).unwrap();
        assert!(!detection.contains("interval:"));

        let all = fs::read_to_string(out_dir.join("chainguard-all.yml")).unwrap();
        assert_eq!(sha256_hex(all.as_bytes()), written[3].sha256);
        assert_eq!(written[3].queries, 2);
    }

    #[test]
    fn test_write_fleet_documents_output_dir_is_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = write_fleet_documents(&[], &blocker.join("out")).unwrap_err();
        assert!(matches!(err, ConvertError::CreateOutputDir { .. }));
    }
}
