//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod compile_events;
pub mod compiler;
pub mod file_watcher;
pub mod project_store;

pub use compile_events::{CompileEvent, CompileEventSink, NoopEventSink};
pub use compiler::{CompileFailure, CompileOutput, CompileRequest, Compiler, ImportScanner};
pub use file_watcher::FileWatcher;
pub use project_store::ProjectStore;
