//! Configuration module for Kiln
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KILN_*)
//! 3. `--config FILE`, else `<settings dir>/config.toml`
//! 4. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{ConfigWarning, CONFIG_FILE};
pub use types::{
    ColorMode, CompilerCommand, CompilersConfig, Config, OutputConfig, WatchConfig,
};
