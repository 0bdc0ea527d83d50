//! `kiln watch`

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use kiln::application::{WatchCoordinator, WatchLoop, WatchOptions};
use kiln::domain::ports::{CompileEvent, CompileEventSink};
use kiln::domain::services::ImportIndex;
use kiln::fs::normalize_path;
use kiln::infrastructure::{CommandCompiler, JsonEventSink, NotifyWatcher, StaticImportScanner};

use crate::commands::Session;
use crate::ui::context::UiContext;
use crate::ui::views::watch::{render_watch_event, render_watch_header};

pub fn cmd_watch(session: &Session) -> Result<()> {
    let mut store = session.open_store()?;
    let check = store.check_status();
    if !check.is_clean() {
        tracing::info!(
            projects = check.removed_projects.len(),
            files = check.removed_files.len(),
            "dropped entries that no longer exist"
        );
        store.save()?;
    }
    let projects = store.projects().to_vec();

    let scanner = Arc::new(StaticImportScanner::new());
    let entries: Vec<PathBuf> = projects
        .iter()
        .flat_map(|p| p.entry_files())
        .map(|f| normalize_path(&f.src))
        .collect();
    let index = ImportIndex::build(entries.iter().map(PathBuf::as_path), scanner.as_ref());

    let (watcher, rx) = NotifyWatcher::channel(session.config.watch.queue_capacity)?;
    let compiler = Arc::new(CommandCompiler::new(
        session.config.compilers.clone(),
        scanner,
    ));
    let sink: Arc<dyn CompileEventSink> = if session.ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        print!(
            "{}",
            render_watch_header(
                &session.settings_dir.display().to_string(),
                projects.len(),
                session.ui.color,
                session.ui.unicode
            )
        );
        Arc::new(ConsoleEventSink::new(session.ui))
    };

    let coordinator = WatchCoordinator::new(Box::new(watcher), compiler, sink.clone());
    coordinator.start_watching_projects(&projects);
    coordinator.start_watching_imports(index);

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    WatchLoop::new(
        &coordinator,
        sink,
        WatchOptions::from_config(&session.config.watch),
    )
    .run(rx, running);

    store.set_imports(coordinator.index_snapshot());
    store.save()?;
    Ok(())
}

/// Renders watch events as timestamped terminal lines
struct ConsoleEventSink {
    ui: UiContext,
}

impl ConsoleEventSink {
    fn new(ui: UiContext) -> Self {
        Self { ui }
    }

    fn should_print(&self, event: &CompileEvent) -> bool {
        match event {
            CompileEvent::CompileStarted { .. } => self.ui.verbose > 0,
            _ => true,
        }
    }
}

impl CompileEventSink for ConsoleEventSink {
    fn on_event(&self, event: CompileEvent) {
        if !self.should_print(&event) {
            return;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let rendered = render_watch_event(&timestamp, &event, self.ui.color, self.ui.unicode);

        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(rendered.as_bytes());
        let _ = stdout.flush();
    }
}
