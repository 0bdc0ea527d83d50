//! Domain Entities
//!
//! - `Project` - A configured project folder
//! - `FileEntry` - A tracked source file and its output

mod project;

pub use project::{is_partial, FileEntry, Project};
