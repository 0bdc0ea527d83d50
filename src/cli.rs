//! CLI argument parsing
//!
//! Global flags (`--json`, `--color`, `-v`, `--settings-dir`, `--config`)
//! are accepted before or after the subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Kiln - watch-and-compile coordinator for LESS, Sass, Stylus and CoffeeScript
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print results and events as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding projects.json, imports.json and config.toml
    #[arg(long, global = true, value_name = "DIR")]
    pub settings_dir: Option<PathBuf>,

    /// Config file to use instead of <settings dir>/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch every project and recompile entry files on change
    Watch,

    /// Compile one registered file now
    Compile {
        /// Source file
        src: PathBuf,
    },

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Manage files within projects
    #[command(subcommand)]
    File(FileCommand),
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Register a folder and every compilable file in it
    Add {
        /// Project folder
        dir: PathBuf,

        /// Display name (defaults to the folder name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List projects
    List {
        /// Also list each project's files
        #[arg(long)]
        files: bool,
    },

    /// Forget a project
    Remove {
        /// Project id
        id: String,
    },

    /// Select a project in the UI
    Activate {
        /// Project id
        id: String,
    },

    /// Drop projects and files that no longer exist on disk
    Check,

    /// Rescan a project folder for added and removed sources
    Refresh {
        /// Project id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum FileCommand {
    /// Turn building of a file on or off
    SetCompile {
        /// Source file
        src: PathBuf,

        /// Whether the file is an entry file
        #[arg(action = ArgAction::Set)]
        compile: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_watch() {
        let cli = Cli::try_parse_from(["kiln", "watch"]).unwrap();
        assert!(matches!(cli.command, Commands::Watch));
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["kiln", "watch", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["kiln", "-vv", "compile", "main.less"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Compile { src } => assert_eq!(src, PathBuf::from("main.less")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn settings_dir_and_config_are_global() {
        let cli = Cli::try_parse_from([
            "kiln",
            "project",
            "list",
            "--settings-dir",
            "/tmp/kiln",
            "--config",
            "/tmp/kiln.toml",
        ])
        .unwrap();
        assert_eq!(cli.settings_dir, Some(PathBuf::from("/tmp/kiln")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/kiln.toml")));
        assert!(matches!(
            cli.command,
            Commands::Project(ProjectCommand::List { files: false })
        ));
    }

    #[test]
    fn project_add_with_name() {
        let cli = Cli::try_parse_from(["kiln", "project", "add", "site", "--name", "Site"]).unwrap();
        match cli.command {
            Commands::Project(ProjectCommand::Add { dir, name }) => {
                assert_eq!(dir, PathBuf::from("site"));
                assert_eq!(name.as_deref(), Some("Site"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn project_id_commands() {
        for (sub, id) in [("remove", "1a2b3c4d"), ("activate", "deadbeef"), ("refresh", "00ff00ff")] {
            let cli = Cli::try_parse_from(["kiln", "project", sub, id]).unwrap();
            let parsed = match cli.command {
                Commands::Project(ProjectCommand::Remove { id })
                | Commands::Project(ProjectCommand::Activate { id })
                | Commands::Project(ProjectCommand::Refresh { id }) => id,
                other => panic!("unexpected command: {other:?}"),
            };
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn file_set_compile_takes_a_bool() {
        let cli = Cli::try_parse_from(["kiln", "file", "set-compile", "_vars.scss", "true"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::File(FileCommand::SetCompile { compile: true, .. })
        ));

        assert!(Cli::try_parse_from(["kiln", "file", "set-compile", "a.scss", "maybe"]).is_err());
    }

    #[test]
    fn color_flag() {
        let cli = Cli::try_parse_from(["kiln", "--color", "never", "project", "check"]).unwrap();
        assert_eq!(cli.color, Some(ColorWhen::Never));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["kiln"]).is_err());
    }
}
