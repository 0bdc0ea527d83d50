//! Compiler and import scanner ports

use std::path::{Path, PathBuf};

use crate::domain::entities::FileEntry;
use crate::domain::value_objects::{CompileOptions, FileKind};
use crate::error::KilnResult;

/// Everything needed to build one entry file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// Owning project
    pub project_id: String,
    pub src: PathBuf,
    pub output: PathBuf,
    pub options: CompileOptions,
}

impl CompileRequest {
    pub fn from_entry(project_id: impl Into<String>, entry: &FileEntry) -> Self {
        Self {
            project_id: project_id.into(),
            src: entry.src.clone(),
            output: entry.output.clone(),
            options: entry.options.clone(),
        }
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_path(&self.src)
    }
}

/// Successful compile result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutput {
    /// Files the entry (transitively) imports, as parsed during this compile
    pub imports: Vec<PathBuf>,
}

impl CompileOutput {
    pub fn with_imports(imports: Vec<PathBuf>) -> Self {
        Self { imports }
    }
}

/// Compile failure reported by the external compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    pub reason: String,
}

impl CompileFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for CompileFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

/// External compiler
///
/// Called from dispatcher worker threads; may block for as long as the
/// underlying tool runs.
pub trait Compiler: Send + Sync {
    fn compile(&self, request: &CompileRequest) -> Result<CompileOutput, CompileFailure>;
}

/// Static parser for a source file's import statements
pub trait ImportScanner: Send + Sync {
    /// Every file `entry` imports, directly or through other imports
    fn scan(&self, entry: &Path) -> KilnResult<Vec<PathBuf>>;
}
