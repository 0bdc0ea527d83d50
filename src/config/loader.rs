//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{KilnError, KilnResult};

use super::types::Config;

/// File name of the config inside the settings directory
pub const CONFIG_FILE: &str = "config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> KilnResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| KilnError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // Compiler tables are an open map, so unknown kinds need their own check
    unknown_paths.extend(
        config
            .compilers
            .unknown_keys()
            .into_iter()
            .map(|key| format!("compilers.{key}")),
    );

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from an explicit file, the settings directory, or defaults
///
/// A config file that fails to parse is logged and replaced by defaults.
pub fn load_or_default(explicit: Option<&Path>, settings_dir: &Path) -> Config {
    let candidate = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings_dir.join(CONFIG_FILE));

    if candidate.exists() {
        match load_with_warnings(&candidate) {
            Ok((config, warnings)) => {
                for warning in &warnings {
                    tracing::warn!(
                        key = %warning.key,
                        file = %warning.file.display(),
                        line = ?warning.line,
                        suggestion = ?warning.suggestion,
                        "unknown config key"
                    );
                }
                return with_env_overrides(config);
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable config");
            }
        }
    }

    with_env_overrides(Config::default())
}

/// Apply environment variable overrides (KILN_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // KILN_DEBOUNCE_MS
    if let Some(ms) = env_number("KILN_DEBOUNCE_MS") {
        config.watch.debounce_ms = ms;
    }

    // KILN_QUEUE_CAPACITY
    if let Some(capacity) = env_number("KILN_QUEUE_CAPACITY") {
        if capacity > 0 {
            config.watch.queue_capacity = capacity as usize;
        }
    }

    // KILN_COOLDOWN_MS
    if let Some(ms) = env_number("KILN_COOLDOWN_MS") {
        config.watch.cooldown_ms = ms;
    }

    config
}

/// Settings directory: flag, then `KILN_SETTINGS_DIR`, then the user config
/// directory
pub fn resolve_settings_dir(flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Ok(dir) = std::env::var("KILN_SETTINGS_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join("kiln"))
        .unwrap_or_else(|| PathBuf::from(".kiln"))
}

fn env_number(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring non-numeric override");
            None
        }
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "watch",
        "debounce_ms",
        "queue_capacity",
        "cooldown_ms",
        "compilers",
        "less",
        "scss",
        "sass",
        "stylus",
        "coffee",
        "command",
        "args",
        "style_arg",
        "source_map_arg",
        "line_comments_arg",
        "capture_stdout",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
