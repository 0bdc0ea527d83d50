//! Configuration types

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::FileKind;
use crate::error::KilnResult;

use super::loader::{self, ConfigWarning};

/// Watch loop tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Quiet period before a burst of changes is resolved
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Bound on queued filesystem notifications
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Notifications in this window after start are dropped
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            queue_capacity: default_queue_capacity(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    crate::application::DEBOUNCE_MS
}

fn default_queue_capacity() -> usize {
    256
}

fn default_cooldown_ms() -> u64 {
    500
}

/// External command used to compile one file kind
///
/// `args`, `style_arg` and the flag fields may contain the placeholders
/// `{src}`, `{out}` and `{style}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerCommand {
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub style_arg: Option<String>,

    #[serde(default)]
    pub source_map_arg: Option<String>,

    #[serde(default)]
    pub line_comments_arg: Option<String>,

    /// Compiler prints the result on stdout instead of writing `{out}`
    #[serde(default)]
    pub capture_stdout: bool,
}

impl CompilerCommand {
    pub fn new(command: impl Into<String>, args: &[&str]) -> Self {
        Self {
            command: command.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            style_arg: None,
            source_map_arg: None,
            line_comments_arg: None,
            capture_stdout: false,
        }
    }

    /// Built-in command for `kind`
    pub fn builtin(kind: FileKind) -> Self {
        match kind {
            FileKind::Less => Self {
                source_map_arg: Some("--source-map".to_string()),
                line_comments_arg: Some("--line-numbers=comments".to_string()),
                ..Self::new("lessc", &["{src}", "{out}"])
            },
            FileKind::Scss | FileKind::Sass => Self {
                style_arg: Some("--style={style}".to_string()),
                source_map_arg: Some("--source-map".to_string()),
                ..Self::new("sass", &["{src}", "{out}"])
            },
            FileKind::Stylus => Self {
                source_map_arg: Some("--sourcemap".to_string()),
                line_comments_arg: Some("--line-numbers".to_string()),
                ..Self::new("stylus", &["{src}", "--out", "{out}"])
            },
            FileKind::Coffee => Self {
                source_map_arg: Some("--map".to_string()),
                capture_stdout: true,
                ..Self::new("coffee", &["--compile", "--print", "{src}"])
            },
        }
    }
}

/// Per-kind compiler overrides, keyed by `FileKind::config_key`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompilersConfig(pub BTreeMap<String, CompilerCommand>);

impl CompilersConfig {
    /// Configured command for `kind`, falling back to the built-in one
    pub fn command_for(&self, kind: FileKind) -> CompilerCommand {
        self.0
            .get(kind.config_key())
            .cloned()
            .unwrap_or_else(|| CompilerCommand::builtin(kind))
    }

    /// Keys that do not name a known file kind
    pub fn unknown_keys(&self) -> Vec<String> {
        self.0
            .keys()
            .filter(|key| !FileKind::ALL.iter().any(|k| k.config_key() == key.as_str()))
            .cloned()
            .collect()
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub compilers: CompilersConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> KilnResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> KilnResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit file, the settings directory, or defaults
    pub fn load_or_default(explicit: Option<&Path>, settings_dir: &Path) -> Self {
        loader::load_or_default(explicit, settings_dir)
    }

    /// Apply environment variable overrides (KILN_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Settings directory: flag, then `KILN_SETTINGS_DIR`, then the user
    /// config directory
    pub fn resolve_settings_dir(flag: Option<&Path>) -> PathBuf {
        loader::resolve_settings_dir(flag)
    }
}
