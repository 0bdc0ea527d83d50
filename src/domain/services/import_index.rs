//! Import Index
//!
//! Reverse mapping from an imported file to the entry files whose build
//! depends on it. Every relation is owned by the entry that contributed it,
//! so a rebuild for one entry replaces exactly that entry's relations.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::domain::ports::ImportScanner;

/// Import keys that appeared or disappeared during a rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexDelta {
    /// Paths that had no dependents before and have at least one now
    pub added: Vec<PathBuf>,
    /// Paths that had dependents before and have none now
    pub removed: Vec<PathBuf>,
}

impl IndexDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportIndex {
    /// imported path -> entry files
    dependents: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
    /// entry file -> imported paths (what the entry contributed)
    contributions: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
}

impl ImportIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index by scanning every entry file
    ///
    /// Entries that cannot be scanned contribute nothing; they are picked
    /// up again after their next successful compile.
    pub fn build<'a, I>(entries: I, scanner: &dyn ImportScanner) -> Self
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut index = Self::new();
        for entry in entries {
            match scanner.scan(entry) {
                Ok(imports) => {
                    index.rebuild(entry, imports);
                }
                Err(e) => {
                    tracing::warn!(entry = %entry.display(), error = %e, "skipping import scan");
                }
            }
        }
        index
    }

    /// Replace every relation contributed by `entry` with `imported`
    pub fn rebuild<I>(&mut self, entry: &Path, imported: I) -> IndexDelta
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let new_set: BTreeSet<PathBuf> = imported
            .into_iter()
            .filter(|p| p.as_path() != entry)
            .collect();
        let old_set = self.contributions.remove(entry).unwrap_or_default();

        let mut delta = IndexDelta::default();

        for stale in old_set.difference(&new_set) {
            if let Some(entries) = self.dependents.get_mut(stale) {
                entries.remove(entry);
                if entries.is_empty() {
                    self.dependents.remove(stale);
                    delta.removed.push(stale.clone());
                }
            }
        }

        for fresh in new_set.difference(&old_set) {
            let entries = self.dependents.entry(fresh.clone()).or_default();
            if entries.is_empty() {
                delta.added.push(fresh.clone());
            }
            entries.insert(entry.to_path_buf());
        }

        if !new_set.is_empty() {
            self.contributions.insert(entry.to_path_buf(), new_set);
        }

        delta
    }

    /// Drop every relation contributed by `entry`
    pub fn remove_entry(&mut self, entry: &Path) -> IndexDelta {
        self.rebuild(entry, std::iter::empty())
    }

    /// Entry files depending on `path`; empty if none
    pub fn dependents_of(&self, path: &Path) -> BTreeSet<PathBuf> {
        self.dependents.get(path).cloned().unwrap_or_default()
    }

    /// Files `entry` currently imports
    pub fn imports_of(&self, entry: &Path) -> BTreeSet<PathBuf> {
        self.contributions.get(entry).cloned().unwrap_or_default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.dependents.contains_key(path)
    }

    /// All imported paths (the import-watch subset)
    pub fn keys(&self) -> impl Iterator<Item = &Path> {
        self.dependents.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    /// Flat `import -> entries` map, the persisted shape
    pub fn to_map(&self) -> BTreeMap<PathBuf, BTreeSet<PathBuf>> {
        self.dependents.clone()
    }

    /// Rebuild from a persisted `import -> entries` map
    pub fn from_map(map: BTreeMap<PathBuf, BTreeSet<PathBuf>>) -> Self {
        let mut by_entry: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
        for (import, entries) in map {
            for entry in entries {
                by_entry.entry(entry).or_default().push(import.clone());
            }
        }
        let mut index = Self::new();
        for (entry, imports) in by_entry {
            index.rebuild(&entry, imports);
        }
        index
    }
}
