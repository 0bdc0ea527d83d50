//! Compile Event Port
//!
//! The outcome stream of the watch core. The terminal UI, the NDJSON
//! printer and any embedding application subscribe through a
//! `CompileEventSink`.

use std::path::Path;

use serde::Serialize;

/// Event emitted by the watch core
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CompileEvent {
    /// Watch registration finished
    WatchStarted { direct: usize, imports: usize },

    /// A path could not be registered and was skipped
    WatchSkipped { path: String, reason: String },

    /// A watched file changed on disk
    FileChanged { path: String },

    /// A change arrived while the entry was compiling; one re-run is queued
    CompileCoalesced { entry: String },

    /// Compile run started
    CompileStarted { entry: String },

    /// Compile run succeeded
    CompileSucceeded {
        entry: String,
        output: String,
        duration_ms: u64,
    },

    /// Compile run failed
    CompileFailed { entry: String, reason: String },

    /// Watch stopped
    Shutdown,
}

impl CompileEvent {
    /// The entry file this event is about, if any
    pub fn entry(&self) -> Option<&str> {
        match self {
            CompileEvent::CompileCoalesced { entry }
            | CompileEvent::CompileStarted { entry }
            | CompileEvent::CompileSucceeded { entry, .. }
            | CompileEvent::CompileFailed { entry, .. } => Some(entry),
            _ => None,
        }
    }

    /// NDJSON line with a `"command": "watch"` field
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Trait for receiving compile events
///
/// Sinks are shared with dispatcher worker threads.
pub trait CompileEventSink: Send + Sync {
    fn on_event(&self, event: CompileEvent);

    /// Report a successful compile
    fn notify_success(&self, entry: &Path, output: &Path, duration_ms: u64) {
        self.on_event(CompileEvent::CompileSucceeded {
            entry: entry.display().to_string(),
            output: output.display().to_string(),
            duration_ms,
        });
    }

    /// Report a failed compile
    fn notify_error(&self, entry: &Path, reason: &str) {
        self.on_event(CompileEvent::CompileFailed {
            entry: entry.display().to_string(),
            reason: reason.to_string(),
        });
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl CompileEventSink for NoopEventSink {
    fn on_event(&self, _event: CompileEvent) {}
}
