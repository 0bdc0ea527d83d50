//! One-shot compile of a registered file

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::domain::ports::{CompileRequest, Compiler, ProjectStore};
use crate::domain::services::ImportIndex;
use crate::error::{KilnError, KilnResult};
use crate::fs::normalize_path;

/// Result of a successful one-shot compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub project_id: String,
    pub entry: PathBuf,
    pub output: PathBuf,
    pub imports: Vec<PathBuf>,
    pub duration_ms: u64,
}

/// Locate `src` in the store's projects
pub fn find_request(store: &dyn ProjectStore, src: &Path) -> Option<CompileRequest> {
    let wanted = normalize_path(src);
    store.list_projects().iter().find_map(|project| {
        project
            .files
            .iter()
            .find(|f| f.src == src || normalize_path(&f.src) == wanted)
            .map(|f| CompileRequest::from_entry(project.id.clone(), f))
    })
}

/// Compile `src` now and record its imports in `index`
///
/// Works for any registered file, whether or not it is a watch target.
pub fn compile_file(
    store: &dyn ProjectStore,
    compiler: &dyn Compiler,
    src: &Path,
    index: &mut ImportIndex,
) -> KilnResult<CompileReport> {
    let request = find_request(store, src).ok_or_else(|| KilnError::FileNotFound {
        path: src.to_path_buf(),
    })?;

    let started = Instant::now();
    let output = compiler
        .compile(&request)
        .map_err(|failure| KilnError::Compile {
            entry: request.src.clone(),
            reason: failure.reason,
        })?;

    let entry = normalize_path(&request.src);
    index.rebuild(&entry, output.imports.clone());

    Ok(CompileReport {
        project_id: request.project_id,
        entry,
        output: request.output,
        imports: output.imports,
        duration_ms: started.elapsed().as_millis() as u64,
    })
}
