//! Filename decoding and human-readable query names

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::Category;

/// `2-unusual-child.sql` -> level 2, `unusual-child`
static LEVEL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9])-(.+)\.sql$").unwrap());

/// Split an optional single-digit severity prefix off a filename.
///
/// Returns the level (0 when absent) and the filename used for naming.
pub fn decode_filename(filename: &str) -> (u8, String) {
    match LEVEL_PREFIX.captures(filename) {
        Some(caps) => {
            let level = caps[1].parse().unwrap_or(0);
            (level, format!("{}.sql", &caps[2]))
        }
        None => (0, filename.to_string()),
    }
}

/// Build `[category/subcategory] Title Cased Name` from a filename.
pub fn generate_name(filename: &str, category: Category, subcategory: Option<&str>) -> String {
    let stem = filename.strip_suffix(".sql").unwrap_or(filename);
    let title = title_case(&stem.replace(['-', '_'], " "));

    match subcategory {
        Some(sub) if !sub.is_empty() => format!("[{}/{}] {}", category, sub, title),
        _ => format!("[{}] {}", category, title),
    }
}

/// Upper-case every letter that starts a word, leaving the rest untouched.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_separator = true;
    for c in s.chars() {
        if prev_is_separator {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_separator = is_word_separator(c);
    }
    out
}

fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}
