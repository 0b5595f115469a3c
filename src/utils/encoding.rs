//! Source file decoding with UTF-8 fast path and legacy-encoding fallback.
//!
//! Upstream query files are nearly always UTF-8, but a stray Latin-1 comment
//! must not cost us the whole query, so non-UTF-8 input is decoded with the
//! encoding chardetng guesses instead of being rejected.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::io;
use std::path::Path;

/// Read a text file and decode it.
///
/// Strategy:
/// 1. BOM markers (UTF-8, UTF-16 LE/BE) decide the encoding and are stripped
/// 2. Strict UTF-8 (fast path)
/// 3. chardetng guess, decoding with replacement characters
///
/// Returns the decoded content and the name of the encoding used. Only I/O
/// failures are reported as errors.
pub fn read_text_file(path: &Path) -> io::Result<(String, &'static str)> {
    let bytes = std::fs::read(path)?;
    Ok(decode_bytes(&bytes))
}

pub fn decode_bytes(bytes: &[u8]) -> (String, &'static str) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (decoded.into_owned(), encoding.name());
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), UTF_8.name());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!("decoding as {} replaced invalid sequences", encoding.name());
    }
    (decoded.into_owned(), encoding.name())
}
