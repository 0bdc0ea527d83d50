//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `watch` - Watch projects and imports, recompile on change
//! - `compile` - One-shot compile of a registered file

pub mod compile;
pub mod watch;

pub use compile::{compile_file, CompileReport};
pub use watch::{
    CompileDispatcher, DispatchOutcome, WatchCoordinator, WatchLoop, WatchOptions, WatchSet,
    WatcherState, DEBOUNCE_MS,
};
