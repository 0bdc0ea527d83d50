//! File watcher implementations

mod notify_watcher;

pub use notify_watcher::NotifyWatcher;
