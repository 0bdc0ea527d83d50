//! External Command Compiler
//!
//! Runs the configured preprocessor (`lessc`, `sass`, `stylus`, `coffee`)
//! for one entry file and reports its imports from the static scanner.

use std::fs;
use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::config::{CompilerCommand, CompilersConfig};
use crate::domain::ports::{CompileFailure, CompileOutput, CompileRequest, Compiler, ImportScanner};
use crate::domain::value_objects::OutputStyle;

pub struct CommandCompiler {
    compilers: CompilersConfig,
    scanner: Arc<dyn ImportScanner>,
}

impl CommandCompiler {
    pub fn new(compilers: CompilersConfig, scanner: Arc<dyn ImportScanner>) -> Self {
        Self { compilers, scanner }
    }
}

/// Expand placeholders and append the per-file flags
pub fn build_args(command: &CompilerCommand, request: &CompileRequest) -> Vec<String> {
    let style = request.options.output_style.as_str();
    let expand = |arg: &str| {
        arg.replace("{src}", &request.src.to_string_lossy())
            .replace("{out}", &request.output.to_string_lossy())
            .replace("{style}", style)
    };

    let mut args: Vec<String> = command.args.iter().map(|a| expand(a)).collect();

    if request.options.output_style != OutputStyle::default() {
        if let Some(arg) = &command.style_arg {
            args.push(expand(arg));
        }
    }
    if request.options.source_map {
        if let Some(arg) = &command.source_map_arg {
            args.push(expand(arg));
        }
    }
    if request.options.line_comments {
        if let Some(arg) = &command.line_comments_arg {
            args.push(expand(arg));
        }
    }
    args.extend(request.options.extra_args.iter().map(|a| expand(a)));
    args
}

impl Compiler for CommandCompiler {
    fn compile(&self, request: &CompileRequest) -> Result<CompileOutput, CompileFailure> {
        let Some(kind) = request.kind() else {
            return Err(CompileFailure::new(format!(
                "unsupported file kind: {}",
                request.src.display()
            )));
        };
        let command = self.compilers.command_for(kind);
        let args = build_args(&command, request);

        if let Some(dir) = request.output.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                CompileFailure::new(format!("cannot create {}: {}", dir.display(), e))
            })?;
        }

        tracing::debug!(program = %command.command, ?args, "running compiler");

        let mut cmd = Command::new(&command.command);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = request.src.parent().filter(|d| !d.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            CompileFailure::new(format!("failed to run {}: {}", command.command, e))
        })?;

        if !output.status.success() {
            return Err(CompileFailure::new(failure_reason(
                &output.stderr,
                &output.stdout,
                output.status.code(),
            )));
        }

        if command.capture_stdout {
            fs::write(&request.output, &output.stdout).map_err(|e| {
                CompileFailure::new(format!("cannot write {}: {}", request.output.display(), e))
            })?;
        }

        let imports = match self.scanner.scan(&request.src) {
            Ok(imports) => imports,
            Err(e) => {
                tracing::warn!(entry = %request.src.display(), error = %e, "import scan failed");
                Vec::new()
            }
        };
        Ok(CompileOutput::with_imports(imports))
    }
}

fn failure_reason(stderr: &[u8], stdout: &[u8], code: Option<i32>) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    if !stderr.trim().is_empty() {
        return stderr.trim().to_string();
    }
    // Some compilers report errors on stdout
    let stdout = String::from_utf8_lossy(stdout);
    if !stdout.trim().is_empty() {
        return stdout.trim().to_string();
    }
    match code {
        Some(code) => format!("compiler exited with status {code}"),
        None => "compiler terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FileEntry;
    use crate::domain::value_objects::{CompileOptions, FileKind};
    use crate::infrastructure::compiler::StaticImportScanner;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn request(src: &str, out: &str, options: CompileOptions) -> CompileRequest {
        CompileRequest::from_entry("site", &FileEntry::new(src, out).with_options(options))
    }

    #[test]
    fn args_expand_placeholders_and_flags() {
        let command = CompilerCommand::builtin(FileKind::Scss);
        let options = CompileOptions::default()
            .with_output_style(OutputStyle::Compressed)
            .with_source_map(true);

        let args = build_args(&command, &request("a/main.scss", "a/main.css", options));

        assert_eq!(
            args,
            vec!["a/main.scss", "a/main.css", "--style=compressed", "--source-map"]
        );
    }

    #[test]
    fn default_style_adds_no_style_flag() {
        let command = CompilerCommand::builtin(FileKind::Scss);
        let args = build_args(
            &command,
            &request("main.scss", "main.css", CompileOptions::default()),
        );
        assert_eq!(args, vec!["main.scss", "main.css"]);
    }

    #[test]
    fn extra_args_come_last() {
        let command = CompilerCommand::builtin(FileKind::Less);
        let mut options = CompileOptions::default();
        options.line_comments = true;
        options.extra_args = vec!["--strict-math=on".to_string()];

        let args = build_args(&command, &request("main.less", "main.css", options));
        assert_eq!(
            args,
            vec![
                "main.less",
                "main.css",
                "--line-numbers=comments",
                "--strict-math=on"
            ]
        );
    }

    fn sh(script: &str, capture_stdout: bool) -> CompilersConfig {
        let command = CompilerCommand {
            capture_stdout,
            ..CompilerCommand::new("sh", &["-c", script, "kiln", "{src}", "{out}"])
        };
        CompilersConfig(BTreeMap::from([("less".to_string(), command)]))
    }

    #[cfg(unix)]
    #[test]
    fn successful_run_writes_output_and_reports_imports() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("main.less");
        std::fs::write(&src, "@import 'vars';").unwrap();
        std::fs::write(dir.path().join("vars.less"), "@c: red;").unwrap();
        let out = dir.path().join("css/main.css");

        let compiler = CommandCompiler::new(
            sh("cp \"$1\" \"$2\"", false),
            Arc::new(StaticImportScanner::new()),
        );
        let result = compiler
            .compile(&request(
                src.to_str().unwrap(),
                out.to_str().unwrap(),
                CompileOptions::default(),
            ))
            .unwrap();

        assert!(out.exists());
        assert_eq!(result.imports.len(), 1);
        assert!(result.imports[0].ends_with("vars.less"));
    }

    #[cfg(unix)]
    #[test]
    fn stdout_is_captured_when_configured() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("main.less");
        std::fs::write(&src, ".a{}").unwrap();
        let out = dir.path().join("main.css");

        let compiler = CommandCompiler::new(
            sh("echo compiled", true),
            Arc::new(StaticImportScanner::new()),
        );
        compiler
            .compile(&request(
                src.to_str().unwrap(),
                out.to_str().unwrap(),
                CompileOptions::default(),
            ))
            .unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "compiled\n");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_reports_stderr() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("main.less");
        std::fs::write(&src, ".a{").unwrap();

        let compiler = CommandCompiler::new(
            sh("echo 'ParseError: missing }' >&2; exit 1", false),
            Arc::new(StaticImportScanner::new()),
        );
        let failure = compiler
            .compile(&request(
                src.to_str().unwrap(),
                dir.path().join("main.css").to_str().unwrap(),
                CompileOptions::default(),
            ))
            .unwrap_err();

        assert_eq!(failure.reason, "ParseError: missing }");
    }

    #[test]
    fn missing_program_is_a_failure() {
        let compilers = CompilersConfig(BTreeMap::from([(
            "less".to_string(),
            CompilerCommand::new("kiln-no-such-compiler", &["{src}"]),
        )]));
        let compiler = CommandCompiler::new(compilers, Arc::new(StaticImportScanner::new()));

        let failure = compiler
            .compile(&request("main.less", "main.css", CompileOptions::default()))
            .unwrap_err();
        assert!(failure.reason.contains("failed to run kiln-no-such-compiler"));
    }

    #[test]
    fn unknown_kind_is_a_failure() {
        let compiler =
            CommandCompiler::new(CompilersConfig::default(), Arc::new(StaticImportScanner::new()));
        let failure = compiler
            .compile(&request("notes.txt", "notes.css", CompileOptions::default()))
            .unwrap_err();
        assert!(failure.reason.contains("unsupported file kind"));
    }

    #[test]
    fn failure_reason_falls_back_to_exit_code() {
        assert_eq!(
            failure_reason(b"", b"  ", Some(2)),
            "compiler exited with status 2"
        );
    }
}
