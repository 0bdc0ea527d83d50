//! `kiln file ...`

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use crate::commands::{emit_json, Session};
use crate::ui::primitives::icon::Icon;

pub fn cmd_set_compile(session: &Session, src: &Path, compile: bool) -> Result<()> {
    let mut store = session.open_store()?;
    store.set_compile(src, compile)?;
    store.save()?;

    let (project, file) = store
        .find_file(src)
        .ok_or_else(|| kiln::KilnError::FileNotFound {
            path: src.to_path_buf(),
        })?;

    if session.ui.json {
        return emit_json(&json!({
            "type": "file",
            "project": project.id,
            "src": file.src,
            "output": file.output,
            "compile": file.compile,
        }));
    }

    let icon = if file.compile { Icon::Success } else { Icon::Pending };
    println!(
        "{} {} {}",
        icon.colored(session.ui.color, session.ui.unicode),
        file.src.display(),
        if file.compile {
            "will be compiled"
        } else {
            "will not be compiled"
        }
    );
    Ok(())
}
