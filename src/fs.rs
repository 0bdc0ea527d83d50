//! Path helpers shared by the watcher, scanner and coordinator
//!
//! Notify reports absolute, symlink-resolved paths. Everything that is used
//! as a lookup key goes through `normalize_path` so registrations, import
//! relations and change events agree.

use std::path::{Path, PathBuf};

/// Canonical form of `path`, tolerating files that do not exist (yet, or
/// any more) as long as their parent directory does.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
