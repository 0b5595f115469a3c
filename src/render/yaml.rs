//! FleetDM query document serialization.
//!
//! The output is written by hand rather than through a YAML serializer so the
//! byte layout (quoting, literal block indentation, key order) stays fixed.

use std::io::{self, Write};

use crate::domain::QueryRecord;

/// Line written between consecutive documents in one file.
pub const DOCUMENT_SEPARATOR: &str = "---";

const QUERY_INDENT: &str = "    ";
const SPECIAL_CHARS: &[char] =
    &[':', '#', '{', '}', '[', ']', '|', '>', '&', '*', '!', '?', '\'', '"', '\\'];

/// Quote a scalar when it contains YAML indicator characters.
///
/// Quoted output escapes backslashes and double quotes; anything else is
/// emitted as-is.
pub fn escape_scalar(s: &str) -> String {
    let needs_quotes = s.contains(SPECIAL_CHARS) || s.starts_with('-') || s.starts_with('@');
    if !needs_quotes {
        return s.to_string();
    }
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Write one query document.
///
/// `interval_override` replaces the record's own interval when non-zero.
pub fn write_query<W: Write>(w: &mut W, q: &QueryRecord, interval_override: u64) -> io::Result<()> {
    writeln!(w, "apiVersion: v1")?;
    writeln!(w, "kind: query")?;
    writeln!(w, "spec:")?;
    writeln!(w, "  name: {}", escape_scalar(&q.name))?;
    writeln!(w, "  description: {}", escape_scalar(&q.description))?;

    writeln!(w, "  query: |")?;
    for line in q.query.split('\n') {
        writeln!(w, "{}{}", QUERY_INDENT, line)?;
    }

    if let Some(platform) = q.platform {
        writeln!(w, "  platform: {}", platform.as_str())?;
    }

    let interval = if interval_override > 0 { interval_override } else { q.interval };
    if interval > 0 {
        writeln!(w, "  interval: {}", interval)?;
    }

    writeln!(w, "  logging: {}", q.category.logging_mode().as_str())
}

/// Write a sequence of query documents separated by `---` lines.
pub fn write_documents<'a, W, I>(w: &mut W, queries: I, interval_override: u64) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a QueryRecord>,
{
    for (i, q) in queries.into_iter().enumerate() {
        if i > 0 {
            writeln!(w, "{}", DOCUMENT_SEPARATOR)?;
        }
        write_query(w, q, interval_override)?;
    }
    Ok(())
}
