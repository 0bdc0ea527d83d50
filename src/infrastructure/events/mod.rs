//! Event Sink Implementations
//!
//! Provides concrete implementations of CompileEventSink:
//! - JsonEventSink: NDJSON output for scripts and editor integrations
//! - ChannelEventSink: subscription streams for a UI thread

mod channel;
mod json;

pub use channel::ChannelEventSink;
pub use json::JsonEventSink;
