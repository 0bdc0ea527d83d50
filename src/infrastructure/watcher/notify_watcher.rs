//! Filesystem watcher backed by `notify`
//!
//! Each registered file's parent directory is watched non-recursively (so
//! editors that save by rename keep being observed); only events for
//! registered paths are forwarded.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{sync_channel, Receiver};
use std::sync::{Arc, RwLock};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::ports::FileWatcher;
use crate::error::{KilnError, KilnResult};
use crate::fs::normalize_path;

pub struct NotifyWatcher {
    watcher: RecommendedWatcher,
    /// Paths whose events are forwarded
    registered: Arc<RwLock<HashSet<PathBuf>>>,
    /// Watched directory -> number of registered files inside it
    directories: HashMap<PathBuf, usize>,
}

impl NotifyWatcher {
    /// Watcher plus the stream of changed paths
    ///
    /// The stream holds at most `capacity` paths; the notify thread blocks
    /// while it is full.
    pub fn channel(capacity: usize) -> KilnResult<(Self, Receiver<PathBuf>)> {
        let (tx, rx) = sync_channel(capacity.max(1));
        let registered: Arc<RwLock<HashSet<PathBuf>>> = Arc::default();
        let filter = registered.clone();

        let watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!(error = %e, "filesystem watcher error");
                        return;
                    }
                };
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                for path in event.paths {
                    let path = normalize_path(&path);
                    let wanted = filter
                        .read()
                        .map(|set| set.contains(&path))
                        .unwrap_or(false);
                    if wanted && tx.send(path).is_err() {
                        // Loop has stopped
                        return;
                    }
                }
            },
            Config::default(),
        )?;

        Ok((
            Self {
                watcher,
                registered,
                directories: HashMap::new(),
            },
            rx,
        ))
    }

    pub fn is_registered(&self, path: &Path) -> bool {
        self.registered
            .read()
            .map(|set| set.contains(path))
            .unwrap_or(false)
    }

    /// Number of directories currently handed to notify
    pub fn watched_directories(&self) -> usize {
        self.directories.len()
    }

    fn registered_mut(&self) -> std::sync::RwLockWriteGuard<'_, HashSet<PathBuf>> {
        self.registered
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn parent_dir(path: &Path) -> KilnResult<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| KilnError::WatchRegistration {
            path: path.to_path_buf(),
            message: "path has no parent directory".to_string(),
        })
}

impl FileWatcher for NotifyWatcher {
    fn watch(&mut self, path: &Path) -> KilnResult<()> {
        if !path.is_file() {
            return Err(KilnError::WatchRegistration {
                path: path.to_path_buf(),
                message: "no such file".to_string(),
            });
        }
        let path = normalize_path(path);
        if self.is_registered(&path) {
            return Ok(());
        }

        let dir = parent_dir(&path)?;
        let count = self.directories.get(&dir).copied().unwrap_or(0);
        if count == 0 {
            self.watcher.watch(&dir, RecursiveMode::NonRecursive)?;
            tracing::trace!(dir = %dir.display(), "watching directory");
        }
        self.directories.insert(dir, count + 1);
        self.registered_mut().insert(path);
        Ok(())
    }

    fn unwatch(&mut self, path: &Path) -> KilnResult<()> {
        let path = normalize_path(path);
        if !self.registered_mut().remove(&path) {
            return Ok(());
        }

        let dir = parent_dir(&path)?;
        match self.directories.get(&dir).copied() {
            Some(count) if count > 1 => {
                self.directories.insert(dir, count - 1);
            }
            Some(_) => {
                self.directories.remove(&dir);
                if let Err(e) = self.watcher.unwatch(&dir) {
                    // Directory may already be gone
                    tracing::debug!(dir = %dir.display(), error = %e, "unwatch failed");
                }
            }
            None => {}
        }
        Ok(())
    }
}
