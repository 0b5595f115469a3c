//! Path helpers

use std::path::{Component, Path};

/// First normal component of `relative` when it has more than one component.
///
/// `execution/foo.sql` yields `execution`; `foo.sql` yields `None`.
pub fn leading_dir(relative: &Path) -> Option<String> {
    let mut components = relative.components().filter(|c| matches!(c, Component::Normal(_)));
    let first = components.next()?;
    components.next()?;
    Some(first.as_os_str().to_string_lossy().into_owned())
}
