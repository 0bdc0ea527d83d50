//! Project store port
//!
//! Read-only view of the configured projects as seen by the watch core.
//! Mutation and persistence live on the concrete store.

use crate::domain::entities::Project;

pub trait ProjectStore {
    /// All configured projects, in insertion order
    fn list_projects(&self) -> Vec<Project>;
}

impl ProjectStore for Vec<Project> {
    fn list_projects(&self) -> Vec<Project> {
        self.clone()
    }
}
