//! `kiln compile <src>`

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use kiln::application::compile_file;
use kiln::infrastructure::{CommandCompiler, StaticImportScanner};
use kiln::KilnError;

use crate::commands::{emit_json, Session};
use crate::ui::primitives::icon::Icon;
use crate::ui::views::status::render_compile_report;

pub fn cmd_compile(session: &Session, src: &Path) -> Result<()> {
    let mut store = session.open_store()?;
    let compiler = CommandCompiler::new(
        session.config.compilers.clone(),
        Arc::new(StaticImportScanner::new()),
    );

    let mut index = store.imports().clone();
    let report = match compile_file(&store, &compiler, src, &mut index) {
        Ok(report) => report,
        Err(KilnError::Compile { entry, reason }) => {
            // Reported in full here, so skip main's error line
            if session.ui.json {
                emit_json(&json!({
                    "type": "compile",
                    "success": false,
                    "entry": entry,
                    "reason": reason,
                }))?;
            } else {
                eprintln!(
                    "{} {}\n{}",
                    Icon::Error.colored(session.ui.color, session.ui.unicode),
                    entry.display(),
                    reason
                );
            }
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    store.set_imports(index);
    store.save()?;

    if session.ui.json {
        emit_json(&json!({
            "type": "compile",
            "success": true,
            "project": report.project_id,
            "entry": report.entry,
            "output": report.output,
            "imports": report.imports,
            "duration_ms": report.duration_ms,
        }))?;
    } else {
        print!(
            "{}",
            render_compile_report(&report, session.ui.color, session.ui.unicode)
        );
    }
    Ok(())
}
