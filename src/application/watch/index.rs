//! Shared import index
//!
//! Single writer (the dispatcher, through `rebuild`), many readers (change
//! resolution). A reader holds its guard for the whole resolution so it
//! never sees a rebuild half applied.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::services::ImportIndex;
use crate::error::KilnError;

pub type SharedImportIndex = Arc<RwLock<ImportIndex>>;

pub fn shared_index(index: ImportIndex) -> SharedImportIndex {
    Arc::new(RwLock::new(index))
}

/// Read guard over the index
///
/// A poisoned lock means a rebuild panicked midway. That is a defect, not a
/// runtime condition, so it is reported loudly and the data used as is.
pub fn read_index(index: &SharedImportIndex) -> RwLockReadGuard<'_, ImportIndex> {
    index.read().unwrap_or_else(|poisoned| {
        report_poisoned();
        poisoned.into_inner()
    })
}

pub fn write_index(index: &SharedImportIndex) -> RwLockWriteGuard<'_, ImportIndex> {
    index.write().unwrap_or_else(|poisoned| {
        report_poisoned();
        poisoned.into_inner()
    })
}

fn report_poisoned() {
    let err = KilnError::IndexConsistency("a rebuild panicked while holding the lock".to_string());
    tracing::error!(error = %err, "import index lock poisoned");
}
