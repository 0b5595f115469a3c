//! Upstream tree walker producing query records

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::header::parse_query_text;
use super::naming::{decode_filename, generate_name};
use crate::domain::{Category, ExtractStats, QueryRecord};
use crate::error::{ConvertError, Result};
use crate::utils::{leading_dir, read_text_file};

const QUERY_EXTENSION: &str = ".sql";

/// Walks `<upstream>/<category>` directories and parses every `.sql` file.
pub struct QueryScanner {
    upstream: PathBuf,
    stats: ExtractStats,
}

impl QueryScanner {
    pub fn new(upstream: PathBuf) -> Self {
        Self { upstream, stats: ExtractStats::default() }
    }

    /// Walk the upstream tree and parse every query file.
    ///
    /// Records are returned category by category, and within a category in
    /// lexical walk order. Files that cannot be read are logged and skipped;
    /// a directory that cannot be walked aborts the scan.
    pub fn scan(&mut self) -> Result<Vec<QueryRecord>> {
        self.stats = ExtractStats::default();
        let mut records = Vec::new();

        for category in Category::ALL {
            let category_root = self.upstream.join(category.dir_name());
            match fs::metadata(&category_root) {
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!("skipping missing category directory {}", category_root.display());
                    self.stats.categories_missing.push(category);
                    continue;
                }
                _ => {}
            }

            for entry in WalkDir::new(&category_root).sort_by_file_name() {
                let entry = entry.map_err(|source| ConvertError::Walk { category, source })?;
                if entry.file_type().is_dir() || !is_query_file(entry.path()) {
                    continue;
                }

                self.stats.files_seen += 1;
                match parse_query_file(entry.path(), category, &category_root) {
                    Ok(record) => {
                        tracing::debug!(
                            name = %record.name,
                            level = record.level,
                            subcategory = ?record.subcategory,
                            tags = ?record.tags,
                            "parsed {}",
                            entry.path().display()
                        );
                        records.push(record);
                    }
                    Err(e) => {
                        tracing::warn!("failed to parse {}: {}", entry.path().display(), e);
                        self.stats.files_failed += 1;
                    }
                }
            }
        }

        self.stats.queries_parsed = records.len();
        Ok(records)
    }

    pub fn stats(&self) -> &ExtractStats {
        &self.stats
    }
}

fn is_query_file(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.ends_with(QUERY_EXTENSION))
}

/// Parse a single query file found under `category_root`.
pub fn parse_query_file(path: &Path, category: Category, category_root: &Path) -> Result<QueryRecord> {
    let (content, encoding) = read_text_file(path)
        .map_err(|source| ConvertError::Read { path: path.to_path_buf(), source })?;
    if encoding != "UTF-8" {
        tracing::debug!("decoded {} as {}", path.display(), encoding);
    }

    let subcategory = path.strip_prefix(category_root).ok().and_then(leading_dir);
    let filename = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let (level, naming_filename) = decode_filename(&filename);
    let name = generate_name(&naming_filename, category, subcategory.as_deref());

    let parsed = parse_query_text(&content);
    Ok(QueryRecord {
        description: parsed.description.unwrap_or_else(|| name.clone()),
        name,
        query: parsed.query,
        platform: parsed.platform,
        tags: parsed.tags,
        interval: parsed.interval,
        level,
        category,
        subcategory,
    })
}
