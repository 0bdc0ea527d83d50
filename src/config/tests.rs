//! Tests for the config module

use super::types::*;
use crate::domain::value_objects::FileKind;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.watch.debounce_ms, 100);
    assert_eq!(config.watch.queue_capacity, 256);
    assert_eq!(config.watch.cooldown_ms, 500);
    assert!(config.compilers.0.is_empty());
    assert_eq!(config.output.color, ColorMode::Auto);
    assert!(config.output.unicode);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[watch]
debounce_ms = 250
queue_capacity = 64

[compilers.less]
command = "npx"
args = ["lessc", "{src}", "{out}"]

[output]
color = "never"
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.watch.debounce_ms, 250);
    assert_eq!(config.watch.queue_capacity, 64);
    assert_eq!(config.watch.cooldown_ms, 500);
    assert_eq!(config.output.color, ColorMode::Never);

    let less = config.compilers.command_for(FileKind::Less);
    assert_eq!(less.command, "npx");
    assert_eq!(less.args, vec!["lessc", "{src}", "{out}"]);
    assert_eq!(less.source_map_arg, None);
}

#[test]
fn test_builtin_compilers() {
    let config = Config::default();

    assert_eq!(config.compilers.command_for(FileKind::Less).command, "lessc");
    assert_eq!(
        config.compilers.command_for(FileKind::Scss).style_arg,
        Some("--style={style}".to_string())
    );
    assert_eq!(config.compilers.command_for(FileKind::Sass).command, "sass");
    assert_eq!(
        config.compilers.command_for(FileKind::Stylus).args,
        vec!["{src}", "--out", "{out}"]
    );
    assert!(config.compilers.command_for(FileKind::Coffee).capture_stdout);
}

#[test]
fn test_compiler_override_only_touches_its_kind() {
    let toml = r#"
[compilers.scss]
command = "dart-sass"
args = ["{src}", "{out}"]
"#;

    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.compilers.command_for(FileKind::Scss).command, "dart-sass");
    assert_eq!(config.compilers.command_for(FileKind::Sass).command, "sass");
}

#[test]
fn test_env_override_debounce() {
    std::env::set_var("KILN_DEBOUNCE_MS", "40");
    let config = Config::default().with_env_overrides();
    assert_eq!(config.watch.debounce_ms, 40);
    std::env::remove_var("KILN_DEBOUNCE_MS");
}

#[test]
fn test_env_override_queue_capacity_ignores_garbage() {
    std::env::set_var("KILN_QUEUE_CAPACITY", "lots");
    let config = Config::default().with_env_overrides();
    assert_eq!(config.watch.queue_capacity, 256);

    std::env::set_var("KILN_QUEUE_CAPACITY", "0");
    let config = Config::default().with_env_overrides();
    assert_eq!(config.watch.queue_capacity, 256);
    std::env::remove_var("KILN_QUEUE_CAPACITY");
}

#[test]
fn test_settings_dir_flag_wins() {
    let dir = Config::resolve_settings_dir(Some(Path::new("/tmp/kiln-flag")));
    assert_eq!(dir, Path::new("/tmp/kiln-flag"));
}

#[test]
fn test_load_or_default_reads_settings_dir() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[output]\ncolor = \"always\"\n",
    )
    .unwrap();

    let config = Config::load_or_default(None, dir.path());
    assert_eq!(config.output.color, ColorMode::Always);
}

#[test]
fn test_load_or_default_prefers_explicit_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[output]\ncolor = \"always\"\n").unwrap();
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "[output]\ncolor = \"never\"\n").unwrap();

    let config = Config::load_or_default(Some(&explicit), dir.path());
    assert_eq!(config.output.color, ColorMode::Never);
}

#[test]
fn test_load_or_default_falls_back_on_invalid_toml() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[watch\n").unwrap();

    let config = Config::load_or_default(None, dir.path());
    assert_eq!(config.output.color, ColorMode::Auto);
    assert!(config.compilers.0.is_empty());
}

#[test]
fn test_invalid_value_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[output]\ncolor = \"purple\"\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("invalid config"));
}

#[test]
fn test_config_load_with_warnings_reports_unknown_key_with_suggestion() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    fs::write(&path, "[watch]\ndebounce = 10\n").unwrap();

    let (_config, warnings) = Config::load_with_warnings(&path).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "debounce");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion, None);
}

#[test]
fn test_unknown_compiler_kind_is_a_warning() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    fs::write(&path, "[compilers.scs]\ncommand = \"sass\"\n").unwrap();

    let (_config, warnings) = Config::load_with_warnings(&path).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "scs");
    assert_eq!(warnings[0].line, Some(1));
    assert_eq!(warnings[0].suggestion, Some("scss".to_string()));
}
