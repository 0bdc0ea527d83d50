//! Kiln - watch-and-compile coordinator
//!
//! Kiln keeps a set of project folders under watch and recompiles their
//! LESS, SCSS, Sass, Stylus and CoffeeScript entry files whenever the entry
//! itself or anything it imports changes on disk.
//!
//! ## Layers
//!
//! - `domain` - projects, the import index and the ports the core talks to
//! - `application` - the watch coordinator, compile dispatcher and watch loop
//! - `infrastructure` - JSON store, `notify` watcher, external compilers
//! - `config` - TOML configuration with `KILN_*` overrides

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod fs;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    compile_file, CompileDispatcher, CompileReport, DispatchOutcome, WatchCoordinator, WatchLoop,
    WatchOptions,
};
pub use config::Config;
pub use domain::entities::{FileEntry, Project};
pub use domain::ports::{CompileEvent, CompileEventSink};
pub use domain::services::ImportIndex;
pub use error::{KilnError, KilnResult};
