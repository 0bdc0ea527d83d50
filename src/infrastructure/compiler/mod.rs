//! Compiler implementations
//!
//! - `CommandCompiler` - runs the configured external preprocessor
//! - `StaticImportScanner` - reads import statements without compiling

mod command;
mod imports;

pub use command::{build_args, CommandCompiler};
pub use imports::StaticImportScanner;
