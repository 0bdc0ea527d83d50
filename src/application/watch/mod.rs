//! Watch Use Case
//!
//! Continuous watch-and-compile:
//! - `WatchCoordinator` - registration and change resolution
//! - `CompileDispatcher` - per-entry serialized, coalesced compiles
//! - `WatchLoop` - debounced notification loop
//!
//! ## Usage
//!
//! ```ignore
//! let coordinator = WatchCoordinator::new(watcher, compiler, sink.clone());
//! coordinator.start_watching_projects(&projects);
//! coordinator.start_watching_imports(index);
//! WatchLoop::new(&coordinator, sink, options).run(rx, running);
//! ```

mod coordinator;
mod dispatcher;
mod index;
mod registry;
mod state;
mod watch_loop;


pub use coordinator::WatchCoordinator;
pub use dispatcher::{CompileDispatcher, DispatchOutcome};
pub use index::{read_index, shared_index, write_index, SharedImportIndex};
pub use registry::{IndexListener, WatchRegistry, WatchSet};
pub use state::{WatchOptions, WatcherState, DEBOUNCE_MS};
pub use watch_loop::WatchLoop;
