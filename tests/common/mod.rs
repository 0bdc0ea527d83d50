//! Shared test utilities for kiln integration tests.
//!
//! - Fake ports: `RecordingWatcher`, `ScriptedCompiler`, `RecordingSink`
//! - Site fixtures built on `tempfile`

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

pub use fakes::*;
pub use fixtures::*;
