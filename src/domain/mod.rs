//! Domain Layer
//!
//! Projects, files and the import graph, without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Project, FileEntry
//! - `value_objects/` - FileKind, CompileOptions, ContentHash
//! - `services/` - ImportIndex
//! - `ports/` - Interfaces for the store, watcher, compiler and event sinks

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
