//! Project and FileEntry entities

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CompileOptions, FileKind};

/// A source file tracked by a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Source path
    pub src: PathBuf,
    /// Where the compiled result is written
    pub output: PathBuf,
    /// Whether this file is a watch-and-build target (an entry file)
    #[serde(default)]
    pub compile: bool,
    #[serde(default)]
    pub options: CompileOptions,
}

impl FileEntry {
    /// Entry with the default output path for its kind
    ///
    /// Returns `None` for files kiln cannot compile.
    pub fn for_source(src: impl Into<PathBuf>) -> Option<Self> {
        let src = src.into();
        let kind = FileKind::from_path(&src)?;
        Some(Self {
            output: kind.default_output(&src),
            compile: !is_partial(&src),
            options: CompileOptions::default(),
            src,
        })
    }

    pub fn new(src: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            output: output.into(),
            compile: true,
            options: CompileOptions::default(),
        }
    }

    pub fn with_compile(mut self, compile: bool) -> Self {
        self.compile = compile;
        self
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_path(&self.src)
    }
}

/// Partials (`_name.scss`) are meant to be imported, not built on their own
pub fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('_'))
        .unwrap_or(false)
}

/// A configured project folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub root: PathBuf,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    /// Selected in the UI; ignored by the watch core
    #[serde(default)]
    pub active: bool,
}

impl Project {
    pub fn new(id: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());
        Self {
            id: id.into(),
            name,
            root,
            files: Vec::new(),
            active: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_file(mut self, file: FileEntry) -> Self {
        self.files.push(file);
        self
    }

    /// Files with `compile = true`
    pub fn entry_files(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.iter().filter(|f| f.compile)
    }

    pub fn file(&self, src: &Path) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.src == src)
    }

    pub fn file_mut(&mut self, src: &Path) -> Option<&mut FileEntry> {
        self.files.iter_mut().find(|f| f.src == src)
    }
}
