use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use kiln::domain::ports::{
    CompileEvent, CompileEventSink, CompileFailure, CompileOutput, CompileRequest, Compiler,
    FileWatcher,
};
use kiln::KilnResult;

/// Watcher that only remembers what is registered
#[derive(Clone, Default)]
pub struct RecordingWatcher {
    watched: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl RecordingWatcher {
    pub fn watched(&self) -> BTreeSet<PathBuf> {
        self.watched.lock().unwrap().clone()
    }
}

impl FileWatcher for RecordingWatcher {
    fn watch(&mut self, path: &Path) -> KilnResult<()> {
        self.watched.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn unwatch(&mut self, path: &Path) -> KilnResult<()> {
        self.watched.lock().unwrap().remove(path);
        Ok(())
    }
}

/// Compiler that records calls and answers with preset imports
#[derive(Default)]
pub struct ScriptedCompiler {
    calls: Mutex<Vec<PathBuf>>,
    imports: Mutex<HashMap<PathBuf, Vec<PathBuf>>>,
}

impl ScriptedCompiler {
    pub fn set_imports(&self, entry: &str, imports: &[&str]) {
        self.imports.lock().unwrap().insert(
            PathBuf::from(entry),
            imports.iter().map(PathBuf::from).collect(),
        );
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl Compiler for ScriptedCompiler {
    fn compile(&self, request: &CompileRequest) -> Result<CompileOutput, CompileFailure> {
        self.calls.lock().unwrap().push(request.src.clone());
        let imports = self
            .imports
            .lock()
            .unwrap()
            .get(&request.src)
            .cloned()
            .unwrap_or_default();
        Ok(CompileOutput::with_imports(imports))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CompileEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<CompileEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl CompileEventSink for RecordingSink {
    fn on_event(&self, event: CompileEvent) {
        self.events.lock().unwrap().push(event);
    }
}
