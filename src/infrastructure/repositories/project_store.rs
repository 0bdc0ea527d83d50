//! JSON Project Store
//!
//! Persists projects at `<settings dir>/projects.json` and the import index
//! at `<settings dir>/imports.json`. Both files are replaced atomically
//! under an exclusive lock.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use ignore::WalkBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{FileEntry, Project};
use crate::domain::ports::ProjectStore;
use crate::domain::services::ImportIndex;
use crate::domain::value_objects::ContentHash;
use crate::error::{KilnError, KilnResult};
use crate::fs::normalize_path;

pub const PROJECTS_FILE: &str = "projects.json";
pub const IMPORTS_FILE: &str = "imports.json";
const LOCK_FILE: &str = "store.lock";
const STORE_VERSION: u32 = 1;

/// Directories never scanned for sources
const SKIPPED_DIRS: &[&str] = &["node_modules", "bower_components"];

#[derive(Debug, Serialize, Deserialize)]
struct ProjectsDocument {
    version: u32,
    #[serde(default)]
    projects: Vec<Project>,
}

/// What `check_status` dropped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub removed_projects: Vec<String>,
    pub removed_files: Vec<PathBuf>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.removed_projects.is_empty() && self.removed_files.is_empty()
    }
}

/// What `refresh_project` changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    pub added: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct JsonProjectStore {
    dir: PathBuf,
    projects: Vec<Project>,
    imports: ImportIndex,
}

impl JsonProjectStore {
    /// Store rooted at `dir`, with nothing loaded yet
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            projects: Vec::new(),
            imports: ImportIndex::new(),
        }
    }

    /// Store rooted at `dir`, loaded from disk
    pub fn open(dir: impl Into<PathBuf>) -> KilnResult<Self> {
        let mut store = Self::new(dir);
        store.load()?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Replace in-memory state with what is on disk; missing files are empty
    pub fn load(&mut self) -> KilnResult<()> {
        let projects: Option<ProjectsDocument> = read_json(&self.dir.join(PROJECTS_FILE))?;
        self.projects = projects.map(|doc| doc.projects).unwrap_or_default();

        let imports: Option<BTreeMap<PathBuf, BTreeSet<PathBuf>>> =
            read_json(&self.dir.join(IMPORTS_FILE))?;
        self.imports = imports.map(ImportIndex::from_map).unwrap_or_default();

        tracing::debug!(
            dir = %self.dir.display(),
            projects = self.projects.len(),
            imports = self.imports.len(),
            "loaded project store"
        );
        Ok(())
    }

    pub fn save(&self) -> KilnResult<()> {
        fs::create_dir_all(&self.dir)?;
        let lock_file = fs::File::create(self.dir.join(LOCK_FILE))?;
        lock_file.lock_exclusive()?;

        let document = ProjectsDocument {
            version: STORE_VERSION,
            projects: self.projects.clone(),
        };
        let result = write_json(&self.dir, PROJECTS_FILE, &document)
            .and_then(|_| write_json(&self.dir, IMPORTS_FILE, &self.imports.to_map()));

        let _ = lock_file.unlock();
        result
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.projects.iter().find(|p| p.active)
    }

    /// Register `root` and every compilable file under it
    ///
    /// Ignore files (`.gitignore`, `.ignore`) and hidden paths are
    /// respected. Partials start with `compile = false`.
    pub fn add_project(&mut self, root: &Path, name: Option<&str>) -> KilnResult<&Project> {
        if !root.is_dir() {
            return Err(KilnError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }
        let root = normalize_path(root);
        let id = project_id(&root);
        if self.project(&id).is_some() {
            return Err(KilnError::Configuration {
                context: root.display().to_string(),
                message: format!("folder is already registered as project {id}"),
            });
        }

        let mut project = Project::new(id, root.clone());
        if let Some(name) = name {
            project = project.with_name(name);
        }
        project.files = scan_sources(&root);

        tracing::info!(
            root = %root.display(),
            files = project.files.len(),
            "added project"
        );
        self.projects.push(project);
        Ok(&self.projects[self.projects.len() - 1])
    }

    /// Drop a project and the import relations of its files
    pub fn remove_project(&mut self, id: &str) -> KilnResult<Project> {
        let position = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| KilnError::ProjectNotFound { id: id.to_string() })?;
        let project = self.projects.remove(position);
        for file in &project.files {
            self.imports.remove_entry(&file.src);
        }
        Ok(project)
    }

    /// Mark `id` as the selected project; all others are deselected
    pub fn set_active(&mut self, id: &str) -> KilnResult<()> {
        if self.project(id).is_none() {
            return Err(KilnError::ProjectNotFound { id: id.to_string() });
        }
        for project in &mut self.projects {
            project.active = project.id == id;
        }
        Ok(())
    }

    /// Turn building of one registered file on or off
    pub fn set_compile(&mut self, src: &Path, compile: bool) -> KilnResult<()> {
        let wanted = normalize_path(src);
        let file = self
            .projects
            .iter_mut()
            .flat_map(|p| p.files.iter_mut())
            .find(|f| f.src == wanted || f.src == src)
            .ok_or_else(|| KilnError::FileNotFound {
                path: src.to_path_buf(),
            })?;
        file.compile = compile;
        Ok(())
    }

    /// Rescan a project folder
    ///
    /// New sources are added with defaults; entries whose source is gone are
    /// dropped; existing entries keep their settings.
    pub fn refresh_project(&mut self, id: &str) -> KilnResult<RefreshReport> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| KilnError::ProjectNotFound { id: id.to_string() })?;
        if !project.root.is_dir() {
            return Err(KilnError::DirectoryNotFound {
                path: project.root.clone(),
            });
        }

        let scanned = scan_sources(&project.root);
        let mut report = RefreshReport::default();

        project.files.retain(|file| {
            let keep = scanned.iter().any(|s| s.src == file.src);
            if !keep {
                report.removed.push(file.src.clone());
            }
            keep
        });
        for file in scanned {
            if project.file(&file.src).is_none() {
                report.added.push(file.src.clone());
                project.files.push(file);
            }
        }
        project.files.sort_by(|a, b| a.src.cmp(&b.src));

        for removed in &report.removed {
            self.imports.remove_entry(removed);
        }
        Ok(report)
    }

    /// Project and entry registered for `src`
    pub fn find_file(&self, src: &Path) -> Option<(&Project, &FileEntry)> {
        let wanted = normalize_path(src);
        self.projects.iter().find_map(|project| {
            project
                .files
                .iter()
                .find(|f| f.src == wanted || f.src == src)
                .map(|f| (project, f))
        })
    }

    /// Drop projects whose folder vanished and files whose source vanished
    pub fn check_status(&mut self) -> CheckReport {
        let mut report = CheckReport::default();

        self.projects.retain(|project| {
            let exists = project.root.is_dir();
            if !exists {
                tracing::info!(id = %project.id, root = %project.root.display(), "project folder is gone");
                report.removed_projects.push(project.id.clone());
                report
                    .removed_files
                    .extend(project.files.iter().map(|f| f.src.clone()));
            }
            exists
        });

        for project in &mut self.projects {
            project.files.retain(|file| {
                let exists = file.src.is_file();
                if !exists {
                    report.removed_files.push(file.src.clone());
                }
                exists
            });
        }

        for file in &report.removed_files {
            self.imports.remove_entry(file);
        }
        report
    }

    pub fn imports(&self) -> &ImportIndex {
        &self.imports
    }

    pub fn set_imports(&mut self, index: ImportIndex) {
        self.imports = index;
    }
}

impl ProjectStore for JsonProjectStore {
    fn list_projects(&self) -> Vec<Project> {
        self.projects.clone()
    }
}

/// Stable id for a project folder: 8 hex digits of its path's SHA-256
pub fn project_id(root: &Path) -> String {
    let hash = ContentHash::from_bytes(root.to_string_lossy().as_bytes());
    hash.hex()[..8].to_string()
}

/// Compilable files under `root`, sorted by path
fn scan_sources(root: &Path) -> Vec<FileEntry> {
    let walker = WalkBuilder::new(root)
        .require_git(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| !SKIPPED_DIRS.contains(&name))
                .unwrap_or(true)
        })
        .build();

    let mut files: Vec<FileEntry> = walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter_map(|entry| FileEntry::for_source(normalize_path(entry.path())))
        .collect();
    files.sort_by(|a, b| a.src.cmp(&b.src));
    files
}

fn read_json<T: DeserializeOwned>(path: &Path) -> KilnResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| KilnError::Configuration {
            context: path.display().to_string(),
            message: e.to_string(),
        })
}

fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> KilnResult<()> {
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut temp, value)?;
    temp.write_all(b"\n")?;
    temp.persist(dir.join(name)).map_err(|e| e.error)?;
    Ok(())
}
