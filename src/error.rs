//! Error types for extraction and document writing

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Category;

/// Errors raised while converting upstream queries.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("walking {category}: {source}")]
    Walk {
        category: Category,
        #[source]
        source: walkdir::Error,
    },
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("creating output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
