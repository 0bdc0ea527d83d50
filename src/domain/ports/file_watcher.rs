//! Filesystem watcher port
//!
//! Registration side only. Change notifications travel back through the
//! channel the concrete watcher was built with.

use std::path::Path;

use crate::error::KilnResult;

pub trait FileWatcher: Send {
    /// Start delivering change notifications for `path`
    ///
    /// Fails with `KilnError::WatchRegistration` when the path cannot be
    /// watched (missing, unreadable, OS limit reached).
    fn watch(&mut self, path: &Path) -> KilnResult<()>;

    /// Stop delivering notifications for `path`. Unknown paths are ignored.
    fn unwatch(&mut self, path: &Path) -> KilnResult<()>;
}
