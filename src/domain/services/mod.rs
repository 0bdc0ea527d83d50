//! Domain Services
//!
//! - `ImportIndex` - Reverse import graph used to fan out recompiles

mod import_index;

pub use import_index::{ImportIndex, IndexDelta};
