//! Command handlers
//!
//! Each handler loads what it needs through a `Session`, calls into the
//! library and renders the outcome as text or JSON lines.

pub mod compile;
pub mod file;
pub mod project;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use kiln::config::Config;
use kiln::infrastructure::JsonProjectStore;

use crate::cli::{Cli, Commands, FileCommand, ProjectCommand};
use crate::ui::context::UiContext;

/// Settings shared by every command of one invocation
pub struct Session {
    pub settings_dir: PathBuf,
    pub config: Config,
    pub ui: UiContext,
}

impl Session {
    pub fn new(cli: &Cli) -> Self {
        let settings_dir = Config::resolve_settings_dir(cli.settings_dir.as_deref());
        let config = Config::load_or_default(cli.config.as_deref(), &settings_dir);
        let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
        Self {
            settings_dir,
            config,
            ui,
        }
    }

    pub fn open_store(&self) -> Result<JsonProjectStore> {
        JsonProjectStore::open(&self.settings_dir).with_context(|| {
            format!(
                "failed to load projects from {}",
                self.settings_dir.display()
            )
        })
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let session = Session::new(&cli);
    tracing::debug!(settings_dir = %session.settings_dir.display(), "starting");

    match cli.command {
        Commands::Watch => watch::cmd_watch(&session),
        Commands::Compile { src } => compile::cmd_compile(&session, &src),
        Commands::Project(command) => match command {
            ProjectCommand::Add { dir, name } => project::cmd_add(&session, &dir, name.as_deref()),
            ProjectCommand::List { files } => project::cmd_list(&session, files),
            ProjectCommand::Remove { id } => project::cmd_remove(&session, &id),
            ProjectCommand::Activate { id } => project::cmd_activate(&session, &id),
            ProjectCommand::Check => project::cmd_check(&session),
            ProjectCommand::Refresh { id } => project::cmd_refresh(&session, &id),
        },
        Commands::File(FileCommand::SetCompile { src, compile }) => {
            file::cmd_set_compile(&session, &src, compile)
        }
    }
}

/// Print one JSON line on stdout
pub(crate) fn emit_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
