//! Path helpers shared by the config and the index.

use std::path::{Component, Path, PathBuf};

/// Replace a leading `~/` with `base`.
pub fn expand_home(raw: &str, base: &Path) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => base.join(rest),
        None => PathBuf::from(raw),
    }
}

/// Normalize a path by resolving `.` and `..` components without
/// touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }
    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}

/// Expand `~/` against `base`, then normalize.
pub fn resolve_path(raw: &str, base: &Path) -> PathBuf {
    normalize_path(&expand_home(raw, base))
}
