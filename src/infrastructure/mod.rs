//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `repositories/` - JSON project store (projects and import index)
//! - `compiler/` - External command compiler and static import scanner
//! - `watcher/` - `notify`-backed file watcher
//! - `events/` - Event sinks (NDJSON, channel)

pub mod compiler;
pub mod events;
pub mod repositories;
pub mod watcher;

// Re-export for convenience
pub use compiler::{CommandCompiler, StaticImportScanner};
pub use events::{ChannelEventSink, JsonEventSink};
pub use repositories::{CheckReport, JsonProjectStore, RefreshReport};
pub use watcher::NotifyWatcher;
