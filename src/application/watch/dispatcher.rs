//! Compile dispatcher
//!
//! Turns "this entry needs recompiling" into a compiler invocation on a
//! worker thread. At most one run per entry file is in flight; requests that
//! arrive meanwhile collapse into a single follow-up run.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::ports::{CompileEvent, CompileEventSink, CompileRequest, Compiler};

use super::index::{write_index, SharedImportIndex};
use super::registry::IndexListener;

/// What `dispatch` did with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A new run started
    Started,
    /// A run was in flight; a follow-up run is now queued
    Coalesced,
    /// A follow-up run was already queued; this request merged into it
    AlreadyQueued,
    /// The worker thread could not be spawned
    Rejected,
}

#[derive(Debug)]
enum RunState {
    Running,
    /// Running, with the request for the follow-up run
    Pending(CompileRequest),
}

struct Inner {
    compiler: Arc<dyn Compiler>,
    index: SharedImportIndex,
    sink: Arc<dyn CompileEventSink>,
    listener: Option<Arc<dyn IndexListener>>,
    runs: Mutex<HashMap<PathBuf, RunState>>,
    idle: Condvar,
    /// Entries whose most recent run failed
    failed: Mutex<HashSet<PathBuf>>,
}

/// Cloneable handle; clones share the same in-flight state
#[derive(Clone)]
pub struct CompileDispatcher {
    inner: Arc<Inner>,
}

impl CompileDispatcher {
    pub fn new(
        compiler: Arc<dyn Compiler>,
        index: SharedImportIndex,
        sink: Arc<dyn CompileEventSink>,
    ) -> Self {
        Self::build(compiler, index, sink, None)
    }

    /// Dispatcher that reports import key changes to `listener`
    pub fn with_listener(
        compiler: Arc<dyn Compiler>,
        index: SharedImportIndex,
        sink: Arc<dyn CompileEventSink>,
        listener: Arc<dyn IndexListener>,
    ) -> Self {
        Self::build(compiler, index, sink, Some(listener))
    }

    fn build(
        compiler: Arc<dyn Compiler>,
        index: SharedImportIndex,
        sink: Arc<dyn CompileEventSink>,
        listener: Option<Arc<dyn IndexListener>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                compiler,
                index,
                sink,
                listener,
                runs: Mutex::new(HashMap::new()),
                idle: Condvar::new(),
                failed: Mutex::new(HashSet::new()),
            }),
        }
    }

    /// Request a compile of `request.src`
    pub fn dispatch(&self, request: CompileRequest) -> DispatchOutcome {
        let mut runs = self.inner.lock_runs();
        match runs.get_mut(&request.src) {
            Some(state) => {
                if let RunState::Pending(queued) = &mut *state {
                    *queued = request;
                    return DispatchOutcome::AlreadyQueued;
                }
                let entry = request.src.display().to_string();
                *state = RunState::Pending(request);
                drop(runs);
                tracing::debug!(entry = %entry, "compile in flight, queued follow-up");
                self.inner
                    .sink
                    .on_event(CompileEvent::CompileCoalesced { entry });
                DispatchOutcome::Coalesced
            }
            None => {
                let src = request.src.clone();
                runs.insert(src.clone(), RunState::Running);
                drop(runs);

                let inner = self.inner.clone();
                let spawned = thread::Builder::new()
                    .name("kiln-compile".to_string())
                    .spawn(move || inner.run_loop(request));

                match spawned {
                    Ok(_) => DispatchOutcome::Started,
                    Err(e) => {
                        tracing::error!(entry = %src.display(), error = %e, "cannot spawn compile worker");
                        self.inner.finish(&src);
                        self.inner
                            .sink
                            .notify_error(&src, &format!("cannot start compile: {}", e));
                        DispatchOutcome::Rejected
                    }
                }
            }
        }
    }

    /// Entry files with a run in flight or queued
    pub fn in_flight(&self) -> usize {
        self.inner.lock_runs().len()
    }

    pub fn is_running(&self, src: &Path) -> bool {
        self.inner.lock_runs().contains_key(src)
    }

    /// Whether the most recent run for `src` failed
    pub fn last_failed(&self, src: &Path) -> bool {
        self.inner.lock_failed().contains(src)
    }

    /// Block until no compile is in flight or queued
    pub fn wait_idle(&self) {
        let mut runs = self.inner.lock_runs();
        while !runs.is_empty() {
            runs = self.inner.idle.wait(runs).unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Like `wait_idle` with an upper bound; returns whether idle was reached
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut runs = self.inner.lock_runs();
        while !runs.is_empty() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            runs = match self.inner.idle.wait_timeout(runs, deadline - now) {
                Ok((guard, _)) => guard,
                Err(e) => e.into_inner().0,
            };
        }
        true
    }
}

impl Inner {
    fn lock_runs(&self) -> MutexGuard<'_, HashMap<PathBuf, RunState>> {
        self.runs.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_failed(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.failed.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn run_loop(&self, mut request: CompileRequest) {
        loop {
            {
                let _guard = RunGuard {
                    inner: self,
                    src: &request.src,
                };
                self.run_once(&request);
            }

            let mut runs = self.lock_runs();
            match runs.remove(&request.src) {
                Some(RunState::Pending(next)) => {
                    runs.insert(next.src.clone(), RunState::Running);
                    request = next;
                }
                _ => {
                    drop(runs);
                    self.idle.notify_all();
                    return;
                }
            }
        }
    }

    fn finish(&self, src: &Path) {
        self.lock_runs().remove(src);
        self.idle.notify_all();
    }

    fn run_once(&self, request: &CompileRequest) {
        self.sink.on_event(CompileEvent::CompileStarted {
            entry: request.src.display().to_string(),
        });

        let started = Instant::now();
        match self.compiler.compile(request) {
            Ok(output) => {
                let delta = write_index(&self.index).rebuild(&request.src, output.imports);
                if let Some(listener) = &self.listener {
                    listener.index_rebuilt(&delta);
                }
                let elapsed = started.elapsed().as_millis() as u64;
                tracing::info!(entry = %request.src.display(), ms = elapsed, "compiled");
                self.lock_failed().remove(&request.src);
                self.sink.notify_success(&request.src, &request.output, elapsed);
            }
            Err(failure) => {
                tracing::warn!(entry = %request.src.display(), reason = %failure, "compile failed");
                self.lock_failed().insert(request.src.clone());
                self.sink.notify_error(&request.src, &failure.reason);
            }
        }
    }
}

/// Releases the entry's run slot, and drops any queued follow-up, if the
/// worker unwinds mid-run. The entry counts as failed afterwards.
struct RunGuard<'a> {
    inner: &'a Inner,
    src: &'a Path,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !thread::panicking() {
            return;
        }
        tracing::error!(entry = %self.src.display(), "compile worker panicked");
        self.inner.lock_failed().insert(self.src.to_path_buf());
        self.inner.finish(self.src);
    }
}
