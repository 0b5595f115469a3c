//! Shared CLI utilities.

use std::ffi::OsString;

/// Long options that older build scripts pass with a single dash.
const LEGACY_LONG_FLAGS: &[&str] = &["upstream", "output", "report", "config"];

/// Rewrite `-upstream dir` / `-output=dir` style arguments to their `--` form.
///
/// Arguments after a literal `--` are left alone.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let rewritten = match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_legacy_flag(rest) => Some(format!("-{}", text)),
                _ => None,
            };
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

fn is_legacy_flag(rest: &str) -> bool {
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LEGACY_LONG_FLAGS.contains(&name)
}
