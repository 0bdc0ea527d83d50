//! Watch registry
//!
//! Owns the filesystem watcher and the WatchSet. The registered paths are
//! always the union of the direct subset (entry sources) and the import
//! subset (ImportIndex keys); a path in both subsets is registered once.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::ports::{CompileEvent, CompileEventSink, CompileRequest, FileWatcher};
use crate::domain::services::IndexDelta;

/// Paths currently registered with the filesystem watcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchSet {
    /// Entry source path -> owning project id
    pub direct: BTreeMap<PathBuf, String>,
    /// Imported paths
    pub imports: BTreeSet<PathBuf>,
}

impl WatchSet {
    pub fn contains(&self, path: &Path) -> bool {
        self.direct.contains_key(path) || self.imports.contains(path)
    }

    /// Every registered path, each once
    pub fn paths(&self) -> BTreeSet<PathBuf> {
        self.direct
            .keys()
            .cloned()
            .chain(self.imports.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.paths().len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.imports.is_empty()
    }
}

/// Receives import key changes after an ImportIndex rebuild
pub trait IndexListener: Send + Sync {
    fn index_rebuilt(&self, delta: &IndexDelta);
}

#[derive(Default)]
struct RegistryState {
    set: WatchSet,
    /// Compile targets by source path, including entries whose source
    /// could not be watched (an import change can still reach them)
    entries: BTreeMap<PathBuf, CompileRequest>,
}

pub struct WatchRegistry {
    watcher: Mutex<Box<dyn FileWatcher>>,
    state: RwLock<RegistryState>,
    sink: Arc<dyn CompileEventSink>,
}

impl WatchRegistry {
    pub fn new(watcher: Box<dyn FileWatcher>, sink: Arc<dyn CompileEventSink>) -> Self {
        Self {
            watcher: Mutex::new(watcher),
            state: RwLock::new(RegistryState::default()),
            sink,
        }
    }

    /// Replace the direct subset with `targets`
    ///
    /// Returns the number of sources successfully registered.
    pub fn replace_direct(&self, targets: Vec<CompileRequest>) -> usize {
        let mut state = self.write_state();

        let desired: BTreeSet<PathBuf> = targets.iter().map(|t| t.src.clone()).collect();
        let stale: Vec<PathBuf> = state
            .set
            .direct
            .keys()
            .filter(|p| !desired.contains(*p))
            .cloned()
            .collect();
        for path in stale {
            state.set.direct.remove(&path);
            if !state.set.imports.contains(&path) {
                self.unwatch(&path);
            }
        }

        state.entries.clear();
        let mut registered = 0;
        for target in targets {
            let src = target.src.clone();
            let project_id = target.project_id.clone();
            state.entries.insert(src.clone(), target);

            if state.set.direct.contains_key(&src) {
                registered += 1;
                continue;
            }
            if state.set.imports.contains(&src) || self.watch(&src) {
                tracing::debug!(path = %src.display(), project = %project_id, "watching entry");
                state.set.direct.insert(src, project_id);
                registered += 1;
            }
        }
        registered
    }

    /// Replace the import subset with `paths`
    pub fn replace_imports(&self, paths: BTreeSet<PathBuf>) -> usize {
        let mut state = self.write_state();

        let stale: Vec<PathBuf> = state.set.imports.difference(&paths).cloned().collect();
        for path in stale {
            self.remove_import(&mut state, &path);
        }

        let mut registered = 0;
        for path in paths {
            if self.add_import(&mut state, path) {
                registered += 1;
            }
        }
        registered
    }

    /// Compile target registered for `src`
    pub fn entry(&self, src: &Path) -> Option<CompileRequest> {
        self.read_state().entries.get(src).cloned()
    }

    /// Direct-watch lookup: the target if `path` is a watched entry source
    pub fn direct_target(&self, path: &Path) -> Option<CompileRequest> {
        let state = self.read_state();
        if state.set.direct.contains_key(path) {
            state.entries.get(path).cloned()
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> WatchSet {
        self.read_state().set.clone()
    }

    fn add_import(&self, state: &mut RegistryState, path: PathBuf) -> bool {
        if state.set.imports.contains(&path) {
            return true;
        }
        if state.set.direct.contains_key(&path) || self.watch(&path) {
            tracing::debug!(path = %path.display(), "watching import");
            state.set.imports.insert(path);
            return true;
        }
        false
    }

    fn remove_import(&self, state: &mut RegistryState, path: &Path) {
        if state.set.imports.remove(path) && !state.set.direct.contains_key(path) {
            self.unwatch(path);
        }
    }

    fn watch(&self, path: &Path) -> bool {
        let mut watcher = self.watcher.lock().unwrap_or_else(|e| e.into_inner());
        match watcher.watch(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unwatchable path");
                self.sink.on_event(CompileEvent::WatchSkipped {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    fn unwatch(&self, path: &Path) {
        let mut watcher = self.watcher.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = watcher.unwatch(path) {
            tracing::debug!(path = %path.display(), error = %e, "unwatch failed");
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl IndexListener for WatchRegistry {
    fn index_rebuilt(&self, delta: &IndexDelta) {
        if delta.is_empty() {
            return;
        }
        let mut state = self.write_state();
        for path in &delta.removed {
            self.remove_import(&mut state, path);
        }
        for path in &delta.added {
            self.add_import(&mut state, path.clone());
        }
    }
}
