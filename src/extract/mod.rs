//! Query extraction from the upstream SQL tree

use std::path::Path;

use crate::domain::{ExtractStats, QueryRecord};
use crate::error::Result;
use scanner::QueryScanner;

pub mod header;
pub mod naming;
pub mod scanner;

/// Records in traversal order plus the counters gathered while walking.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<QueryRecord>,
    pub stats: ExtractStats,
}

pub fn extract_queries<P: AsRef<Path>>(upstream: P) -> Result<Extraction> {
    let mut scanner = QueryScanner::new(upstream.as_ref().to_path_buf());
    let records = scanner.scan()?;
    Ok(Extraction { records, stats: scanner.stats().clone() })
}
