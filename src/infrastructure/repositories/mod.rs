//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod project_store;

pub use project_store::{
    project_id, CheckReport, JsonProjectStore, RefreshReport, IMPORTS_FILE, PROJECTS_FILE,
};
