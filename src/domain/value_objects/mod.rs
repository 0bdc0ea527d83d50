//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod compile_options;
mod content_hash;
mod file_kind;

pub use compile_options::{CompileOptions, OutputStyle};
pub use content_hash::ContentHash;
pub use file_kind::FileKind;
