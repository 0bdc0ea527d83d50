//! `kiln project ...`

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use crate::commands::{emit_json, Session};
use crate::ui::primitives::icon::Icon;
use crate::ui::views::projects::ProjectsView;
use crate::ui::views::status::{render_check_report, render_refresh_report};

pub fn cmd_add(session: &Session, dir: &Path, name: Option<&str>) -> Result<()> {
    let mut store = session.open_store()?;
    let project = store.add_project(dir, name)?.clone();
    store.save()?;

    if session.ui.json {
        return emit_json(&json!({ "type": "project_added", "project": project }));
    }
    println!(
        "{} Added {} [{}]: {} files, {} compiled",
        Icon::Success.colored(session.ui.color, session.ui.unicode),
        project.name,
        project.id,
        project.files.len(),
        project.entry_files().count()
    );
    Ok(())
}

pub fn cmd_list(session: &Session, files: bool) -> Result<()> {
    let store = session.open_store()?;

    if session.ui.json {
        return emit_json(&json!({
            "type": "projects",
            "settings_dir": session.settings_dir,
            "count": store.projects().len(),
            "projects": store.projects(),
        }));
    }

    let view = ProjectsView::new(store.projects(), &session.settings_dir)
        .with_files(files || session.ui.verbose > 0);
    print!("{}", view.render(session.ui.color, session.ui.unicode));
    Ok(())
}

pub fn cmd_remove(session: &Session, id: &str) -> Result<()> {
    let mut store = session.open_store()?;
    let project = store.remove_project(id)?;
    store.save()?;

    if session.ui.json {
        return emit_json(&json!({ "type": "project_removed", "id": project.id }));
    }
    println!(
        "{} Removed {} [{}]",
        Icon::Success.colored(session.ui.color, session.ui.unicode),
        project.name,
        project.id
    );
    Ok(())
}

pub fn cmd_activate(session: &Session, id: &str) -> Result<()> {
    let mut store = session.open_store()?;
    store.set_active(id)?;
    store.save()?;

    if session.ui.json {
        return emit_json(&json!({ "type": "project_activated", "id": id }));
    }
    println!(
        "{} Active project: {}",
        Icon::Success.colored(session.ui.color, session.ui.unicode),
        id
    );
    Ok(())
}

pub fn cmd_check(session: &Session) -> Result<()> {
    let mut store = session.open_store()?;
    let report = store.check_status();
    if !report.is_clean() {
        store.save()?;
    }

    if session.ui.json {
        return emit_json(&json!({ "type": "check", "clean": report.is_clean(), "report": report }));
    }
    print!(
        "{}",
        render_check_report(&report, session.ui.color, session.ui.unicode)
    );
    Ok(())
}

pub fn cmd_refresh(session: &Session, id: &str) -> Result<()> {
    let mut store = session.open_store()?;
    let report = store.refresh_project(id)?;
    store.save()?;

    if session.ui.json {
        return emit_json(&json!({ "type": "project_refreshed", "id": id, "report": report }));
    }
    print!(
        "{}",
        render_refresh_report(&report, session.ui.color, session.ui.unicode)
    );
    Ok(())
}
