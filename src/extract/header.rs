//! Header comment parsing for upstream query files.
//!
//! A file starts in header mode. While in header mode, `--` comment lines are
//! checked for `tags`, `platform` and `interval` directives and for the
//! description; none of them reach the query body. The first non-blank line
//! that is not a comment switches to body mode, after which every line is kept
//! verbatim, including comments interleaved with the SQL.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::Platform;

const COMMENT_MARKER: &str = "--";

/// Description candidates starting with these prefixes are skipped.
const NON_DESCRIPTION_PREFIXES: &[&str] = &["references:", "false positives:"];

static TAGS_DIRECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^--\s*tags:\s*(.+)$").unwrap());
static PLATFORM_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--\s*platform:\s*(.+)$").unwrap());
static INTERVAL_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--\s*interval:\s*([0-9]+)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Header,
    Body,
}

/// A header directive recognized on a single comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Tags(Vec<String>),
    Platform(Option<Platform>),
    Interval(u64),
}

/// Metadata and query text extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub description: Option<String>,
    pub query: String,
    pub platform: Option<Platform>,
    pub tags: Vec<String>,
    pub interval: u64,
}

fn parse_directive(line: &str) -> Option<Directive> {
    if let Some(caps) = TAGS_DIRECTIVE.captures(line) {
        let tags = caps[1].split_whitespace().map(str::to_string).collect();
        return Some(Directive::Tags(tags));
    }
    if let Some(caps) = PLATFORM_DIRECTIVE.captures(line) {
        let raw = caps[1].trim();
        let platform = Platform::parse(raw);
        if platform.is_none() {
            tracing::debug!("dropping unrecognized platform {:?}", raw);
        }
        return Some(Directive::Platform(platform));
    }
    if let Some(caps) = INTERVAL_DIRECTIVE.captures(line) {
        let interval = caps[1].parse().unwrap_or_else(|_| {
            tracing::debug!("interval {} out of range, treating as unspecified", &caps[1]);
            0
        });
        return Some(Directive::Interval(interval));
    }
    None
}

fn is_description_candidate(comment: &str) -> bool {
    !comment.is_empty() && !NON_DESCRIPTION_PREFIXES.iter().any(|p| comment.starts_with(p))
}

/// Parse the contents of a query file.
pub fn parse_query_text(content: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();
    let mut mode = Mode::Header;
    let mut body: Vec<&str> = Vec::new();

    for line in content.lines() {
        let is_comment = line.starts_with(COMMENT_MARKER);

        if mode == Mode::Header && is_comment {
            match parse_directive(line) {
                Some(Directive::Tags(tags)) => parsed.tags = tags,
                Some(Directive::Platform(platform)) => parsed.platform = platform,
                Some(Directive::Interval(interval)) => parsed.interval = interval,
                None => {
                    let comment = line[COMMENT_MARKER.len()..].trim();
                    if parsed.description.is_none() && is_description_candidate(comment) {
                        parsed.description = Some(comment.to_string());
                    }
                }
            }
            continue;
        }

        if mode == Mode::Header && !line.trim().is_empty() {
            mode = Mode::Body;
        }
        body.push(line);
    }

    let first_content = body.iter().position(|l| !l.trim().is_empty()).unwrap_or(body.len());
    parsed.query = body[first_content..].join("\n").trim().to_string();
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_round_trip() {
        let text = "\
-- Suspicious child process of a shell
-- tags: mitre ta0002 persistent
-- platform: linux
-- interval: 600
SELECT * FROM processes;";
        let parsed = parse_query_text(text);
        assert_eq!(parsed.description.as_deref(), Some("Suspicious child process of a shell"));
        assert_eq!(parsed.tags, vec!["mitre", "ta0002", "persistent"]);
        assert_eq!(parsed.platform, Some(Platform::Linux));
        assert_eq!(parsed.interval, 600);
        assert_eq!(parsed.query, "SELECT * FROM processes;");
    }

    #[test]
    fn test_no_header() {
        let parsed = parse_query_text("SELECT 1;\n");
        assert_eq!(parsed.description, None);
        assert!(parsed.tags.is_empty());
        assert_eq!(parsed.platform, None);
        assert_eq!(parsed.interval, 0);
        assert_eq!(parsed.query, "SELECT 1;");
    }

    #[test]
    fn test_references_and_false_positives_skipped() {
        let text = "\
--
-- references: https://attack.mitre.org/
-- false positives: admins
-- Actual description
-- Later line ignored
SELECT 1;";
        let parsed = parse_query_text(text);
        assert_eq!(parsed.description.as_deref(), Some("Actual description"));
    }

    #[test]
    fn test_body_keeps_interleaved_comments() {
        let text = "\
-- Description
-- tags: a

SELECT pid
-- tags: not-a-directive-anymore
FROM processes -- trailing
-- platform: windows
;
";
        let parsed = parse_query_text(text);
        assert_eq!(parsed.tags, vec!["a"]);
        assert_eq!(parsed.platform, None);
        assert_eq!(
            parsed.query,
            "SELECT pid\n-- tags: not-a-directive-anymore\nFROM processes -- trailing\n-- platform: windows\n;"
        );
    }

    #[test]
    fn test_blank_lines_between_header_comments_are_dropped() {
        let text = "-- Desc\n\n-- tags: x\n\n\nSELECT 1;\n\n   \n";
        let parsed = parse_query_text(text);
        assert_eq!(parsed.tags, vec!["x"]);
        assert_eq!(parsed.query, "SELECT 1;");
    }

    #[test]
    fn test_platform_normalization_in_header() {
        assert_eq!(parse_query_text("-- platform: posix\nSELECT 1;").platform, Some(Platform::Posix));
        assert_eq!(parse_query_text("-- platform: amiga\nSELECT 1;").platform, None);
        assert_eq!(parse_query_text("--platform:MacOS\nSELECT 1;").platform, Some(Platform::Darwin));
    }

    #[test]
    fn test_unknown_platform_is_not_a_description() {
        let parsed = parse_query_text("-- platform: amiga\n-- Real description\nSELECT 1;");
        assert_eq!(parsed.description.as_deref(), Some("Real description"));
    }

    #[test]
    fn test_non_numeric_interval_becomes_description() {
        let parsed = parse_query_text("-- interval: hourly\nSELECT 1;");
        assert_eq!(parsed.interval, 0);
        assert_eq!(parsed.description.as_deref(), Some("interval: hourly"));
    }

    #[test]
    fn test_interval_wider_than_32_bits_survives() {
        let parsed = parse_query_text("-- interval: 5000000000\nSELECT 1;");
        assert_eq!(parsed.interval, 5_000_000_000);
        assert_eq!(parsed.description, None);
    }

    #[test]
    fn test_out_of_range_interval_is_unspecified() {
        let parsed = parse_query_text("-- interval: 99999999999999999999999\nSELECT 1;");
        assert_eq!(parsed.interval, 0);
        assert_eq!(parsed.description, None);
    }

    #[test]
    fn test_later_directive_overrides_earlier() {
        let parsed = parse_query_text("-- tags: a b\n-- tags: c\nSELECT 1;");
        assert_eq!(parsed.tags, vec!["c"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parse_query_text("-- Desc\r\n-- interval: 60\r\nSELECT 1;\r\n");
        assert_eq!(parsed.description.as_deref(), Some("Desc"));
        assert_eq!(parsed.interval, 60);
        assert_eq!(parsed.query, "SELECT 1;");
    }

    #[test]
    fn test_comment_only_file() {
        let parsed = parse_query_text("-- Just a description\n-- tags: x\n");
        assert_eq!(parsed.description.as_deref(), Some("Just a description"));
        assert_eq!(parsed.query, "");
    }

    #[test]
    fn test_leading_whitespace_of_body_trimmed() {
        let parsed = parse_query_text("-- d\n   SELECT 1\n  FROM t;  \n");
        assert_eq!(parsed.query, "SELECT 1\n  FROM t;");
    }
}
