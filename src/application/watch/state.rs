//! Watch loop options and debounce state

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::WatchConfig;

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Options for the watch loop
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Quiet period before queued changes are resolved
    pub debounce: Duration,
    /// Events arriving this soon after start are drained unprocessed
    pub cooldown: Duration,
    /// How long the loop blocks waiting for a notification
    pub poll_interval: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            cooldown: Duration::from_millis(500),
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl WatchOptions {
    pub fn from_config(config: &WatchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            cooldown: Duration::from_millis(config.cooldown_ms),
            ..Self::default()
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

/// Watcher state for debouncing
///
/// Changes are kept in first-arrival order; repeats of a pending path are
/// merged into its existing slot.
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: Vec<PathBuf>,
    last_change: Option<Instant>,
    debounce: Duration,
}

impl Default for WatcherState {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl WatcherState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            pending_changes: Vec::new(),
            last_change: None,
            debounce,
        }
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        if !self.pending_changes.contains(&path) {
            self.pending_changes.push(path);
        }
        self.last_change = Some(Instant::now());
    }

    /// Debounce period has passed and there are pending changes
    pub fn should_flush(&self) -> bool {
        match self.last_change {
            Some(last) => !self.pending_changes.is_empty() && last.elapsed() >= self.debounce,
            None => false,
        }
    }

    /// Take all pending changes, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        self.last_change = None;
        std::mem::take(&mut self.pending_changes)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
