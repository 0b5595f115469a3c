//! Core data types shared by the extractor and the document writer.

use serde::Serialize;
use std::fmt;

/// Interval forced onto every detection query in the scheduled document.
pub const SCHEDULED_INTERVAL_SECS: u64 = 300;

/// Schema version of the optional JSON run report.
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Top-level grouping of upstream queries, derived from the directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Detection,
    Policy,
    IncidentResponse,
}

impl Category {
    /// All categories in traversal and output order.
    pub const ALL: [Category; 3] = [Category::Detection, Category::Policy, Category::IncidentResponse];

    /// Directory name under the upstream root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Detection => "detection",
            Category::Policy => "policy",
            Category::IncidentResponse => "incident_response",
        }
    }

    /// Name used in output file names (`incident_response` -> `incident-response`).
    pub fn slug(self) -> String {
        self.dir_name().replace('_', "-")
    }

    pub fn logging_mode(self) -> LoggingMode {
        match self {
            Category::Detection | Category::Policy => LoggingMode::Differential,
            Category::IncidentResponse => LoggingMode::Snapshot,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// How Fleet logs the results of a scheduled query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    Differential,
    Snapshot,
}

impl LoggingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LoggingMode::Differential => "differential",
            LoggingMode::Snapshot => "snapshot",
        }
    }
}

/// Target platform of a query as understood by Fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Darwin,
    Linux,
    /// Either darwin or linux.
    Posix,
    Windows,
}

impl Platform {
    /// Normalize a `-- platform:` directive value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "darwin" | "macos" => Some(Platform::Darwin),
            "linux" => Some(Platform::Linux),
            "posix" => Some(Platform::Posix),
            "windows" => Some(Platform::Windows),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Darwin => "darwin",
            Platform::Linux => "linux",
            Platform::Posix => "darwin,linux",
            Platform::Windows => "windows",
        }
    }
}

/// One parsed upstream `.sql` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    pub name: String,
    pub description: String,
    pub query: String,
    pub platform: Option<Platform>,
    pub tags: Vec<String>,
    /// Execution interval in seconds, 0 when unspecified.
    pub interval: u64,
    /// Severity level from a `<digit>-` filename prefix, 0 when absent.
    pub level: u8,
    pub category: Category,
    pub subcategory: Option<String>,
}

/// Counters collected while walking the upstream tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    pub files_seen: usize,
    pub queries_parsed: usize,
    pub files_failed: usize,
    pub categories_missing: Vec<Category>,
}
