//! Watch coordinator
//!
//! Keeps the watcher registration consistent with the configured projects
//! and the import graph, and resolves change events to compile targets.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::Project;
use crate::domain::ports::{
    CompileEvent, CompileEventSink, CompileRequest, Compiler, FileWatcher,
};
use crate::domain::services::ImportIndex;
use crate::fs::normalize_path;

use super::dispatcher::CompileDispatcher;
use super::index::{read_index, shared_index, write_index, SharedImportIndex};
use super::registry::{IndexListener, WatchRegistry, WatchSet};

pub struct WatchCoordinator {
    registry: Arc<WatchRegistry>,
    index: SharedImportIndex,
    dispatcher: CompileDispatcher,
    sink: Arc<dyn CompileEventSink>,
}

impl WatchCoordinator {
    pub fn new(
        watcher: Box<dyn FileWatcher>,
        compiler: Arc<dyn Compiler>,
        sink: Arc<dyn CompileEventSink>,
    ) -> Self {
        let registry = Arc::new(WatchRegistry::new(watcher, sink.clone()));
        let index = shared_index(ImportIndex::new());
        let listener: Arc<dyn IndexListener> = registry.clone();
        let dispatcher =
            CompileDispatcher::with_listener(compiler, index.clone(), sink.clone(), listener);
        Self {
            registry,
            index,
            dispatcher,
            sink,
        }
    }

    /// Register the source of every `compile = true` file for direct watching
    ///
    /// Replaces any previous direct registrations. Returns the number of
    /// sources registered; zero (and nothing registered) when no project has
    /// an entry file. Never compiles.
    pub fn start_watching_projects(&self, projects: &[Project]) -> usize {
        let targets: Vec<CompileRequest> = projects
            .iter()
            .flat_map(|project| {
                project.entry_files().map(move |file| {
                    let mut request = CompileRequest::from_entry(project.id.clone(), file);
                    request.src = normalize_path(&request.src);
                    request
                })
            })
            .collect();

        if targets.is_empty() {
            tracing::info!("no entry files to watch");
        }
        self.registry.replace_direct(targets)
    }

    /// Register every imported path and keep `index` for change resolution
    pub fn start_watching_imports(&self, index: ImportIndex) -> usize {
        let keys: BTreeSet<PathBuf> = index.keys().map(Path::to_path_buf).collect();
        *write_index(&self.index) = index;
        self.registry.replace_imports(keys)
    }

    /// Handle a change notification for `path`
    ///
    /// Every resolved target is forwarded to the dispatcher. Returns the
    /// targets, empty when the path is not watched.
    pub fn on_file_changed(&self, path: &Path) -> Vec<CompileRequest> {
        let path = normalize_path(path);
        let targets = self.resolve(&path);
        if targets.is_empty() {
            tracing::trace!(path = %path.display(), "ignoring change");
            return targets;
        }

        self.sink.on_event(CompileEvent::FileChanged {
            path: path.display().to_string(),
        });
        for target in &targets {
            self.dispatcher.dispatch(target.clone());
        }
        targets
    }

    /// Compile targets for a change to `path`, deduplicated by entry path
    ///
    /// A direct entry resolves to itself; an imported path fans out to
    /// every dependent entry; a path that is both resolves to the union.
    pub fn resolve(&self, path: &Path) -> Vec<CompileRequest> {
        // One read guard for the whole resolution
        let index = read_index(&self.index);

        let mut seen = BTreeSet::new();
        let mut targets = Vec::new();

        if let Some(target) = self.registry.direct_target(path) {
            seen.insert(target.src.clone());
            targets.push(target);
        }

        for dependent in index.dependents_of(path) {
            if !seen.insert(dependent.clone()) {
                continue;
            }
            match self.registry.entry(&dependent) {
                Some(target) => targets.push(target),
                None => {
                    tracing::debug!(
                        import = %path.display(),
                        dependent = %dependent.display(),
                        "dependent is not a configured entry file"
                    );
                }
            }
        }

        targets
    }

    /// Whether any entry `path` resolves to failed on its last compile
    pub fn has_failed_target(&self, path: &Path) -> bool {
        self.resolve(path)
            .iter()
            .any(|target| self.dispatcher.last_failed(&target.src))
    }

    /// Current direct and import subsets
    pub fn watch_set(&self) -> WatchSet {
        self.registry.snapshot()
    }

    pub fn index(&self) -> &SharedImportIndex {
        &self.index
    }

    /// Copy of the current import index
    pub fn index_snapshot(&self) -> ImportIndex {
        read_index(&self.index).clone()
    }

    pub fn dispatcher(&self) -> &CompileDispatcher {
        &self.dispatcher
    }

    /// Compile target registered for an entry source
    pub fn entry(&self, src: &Path) -> Option<CompileRequest> {
        self.registry.entry(&normalize_path(src))
    }
}
