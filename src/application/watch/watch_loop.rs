//! The watch loop
//!
//! Single logical loop that drains filesystem notifications, debounces them
//! and hands each changed path to the coordinator in arrival order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Instant;

use crate::domain::ports::{CompileEvent, CompileEventSink};
use crate::domain::value_objects::ContentHash;
use crate::fs::normalize_path;

use super::coordinator::WatchCoordinator;
use super::state::{WatchOptions, WatcherState};

pub struct WatchLoop<'a> {
    coordinator: &'a WatchCoordinator,
    sink: Arc<dyn CompileEventSink>,
    options: WatchOptions,
    /// Last seen content of each watched file
    content_hashes: HashMap<PathBuf, ContentHash>,
}

impl<'a> WatchLoop<'a> {
    pub fn new(
        coordinator: &'a WatchCoordinator,
        sink: Arc<dyn CompileEventSink>,
        options: WatchOptions,
    ) -> Self {
        Self {
            coordinator,
            sink,
            options,
            content_hashes: HashMap::new(),
        }
    }

    /// Run until `running` clears or the notification channel closes
    ///
    /// On exit, waits for in-flight compiles before emitting `Shutdown`.
    pub fn run(&mut self, rx: Receiver<PathBuf>, running: Arc<AtomicBool>) {
        let watch_set = self.coordinator.watch_set();
        for path in watch_set.paths() {
            if let Some(hash) = hash_file(&path) {
                self.content_hashes.insert(path, hash);
            }
        }
        self.sink.on_event(CompileEvent::WatchStarted {
            direct: watch_set.direct.len(),
            imports: watch_set.imports.len(),
        });

        // notify sometimes reports existing files right after registration
        let cooldown_end = Instant::now() + self.options.cooldown;
        while Instant::now() < cooldown_end && running.load(Ordering::SeqCst) {
            let _ = rx.recv_timeout(self.options.poll_interval);
        }

        let mut state = WatcherState::new(self.options.debounce);

        while running.load(Ordering::SeqCst) {
            match rx.recv_timeout(self.options.poll_interval) {
                Ok(path) => {
                    let path = normalize_path(&path);
                    if self.content_changed(&path) {
                        state.add_change(path);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!("watcher channel closed");
                    break;
                }
            }

            if state.should_flush() {
                for path in state.take_changes() {
                    self.coordinator.on_file_changed(&path);
                }
            }
        }

        for path in state.take_changes() {
            self.coordinator.on_file_changed(&path);
        }
        self.coordinator.dispatcher().wait_idle();
        self.sink.on_event(CompileEvent::Shutdown);
    }

    /// Whether `path` differs from the last content seen for it
    ///
    /// A file that can no longer be read counts as changed, so dependents
    /// of a deleted import still get rebuilt. An identical save still counts
    /// while an entry it resolves to is failing.
    fn content_changed(&mut self, path: &Path) -> bool {
        match hash_file(path) {
            Some(hash) => {
                if self.content_hashes.get(path) == Some(&hash) {
                    return self.coordinator.has_failed_target(path);
                }
                self.content_hashes.insert(path.to_path_buf(), hash);
                true
            }
            None => {
                self.content_hashes.remove(path);
                true
            }
        }
    }
}

fn hash_file(path: &Path) -> Option<ContentHash> {
    std::fs::read(path)
        .ok()
        .map(|bytes| ContentHash::from_bytes(&bytes))
}
