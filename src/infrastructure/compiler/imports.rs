//! Static import scanner
//!
//! Reads `@import` / `@use` / `@forward` / `@require` statements without
//! running a compiler, resolves them the way each preprocessor does and
//! follows them transitively.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::ports::ImportScanner;
use crate::domain::value_objects::FileKind;
use crate::error::{KilnError, KilnResult};
use crate::fs::normalize_path;

const KEYWORDS: &[&str] = &["@import", "@use", "@forward", "@require"];

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticImportScanner;

impl StaticImportScanner {
    pub fn new() -> Self {
        Self
    }

    /// Files `file` imports directly, resolved against its directory
    ///
    /// Imports that resolve to no existing file are dropped.
    pub fn direct_imports(&self, file: &Path, kind: FileKind) -> KilnResult<Vec<PathBuf>> {
        let content = fs::read_to_string(file)?;
        let dir = file.parent().unwrap_or_else(|| Path::new(""));

        let mut resolved = Vec::new();
        for name in import_names(&content) {
            match resolve(dir, &name, kind) {
                Some(path) => resolved.push(normalize_path(&path)),
                None => {
                    tracing::debug!(file = %file.display(), import = %name, "unresolved import");
                }
            }
        }
        Ok(resolved)
    }
}

impl ImportScanner for StaticImportScanner {
    fn scan(&self, entry: &Path) -> KilnResult<Vec<PathBuf>> {
        let kind = FileKind::from_path(entry).ok_or_else(|| KilnError::UnsupportedFileKind {
            path: entry.to_path_buf(),
        })?;
        let entry = normalize_path(entry);
        if !kind.is_stylesheet() {
            return Ok(Vec::new());
        }

        let mut seen: HashSet<PathBuf> = HashSet::from([entry.clone()]);
        let mut found = Vec::new();
        let mut queue = VecDeque::from([entry.clone()]);

        while let Some(file) = queue.pop_front() {
            let imports = match self.direct_imports(&file, kind) {
                Ok(imports) => imports,
                // The entry itself must be readable; nested files may vanish
                Err(e) if file == entry => return Err(e),
                Err(e) => {
                    tracing::debug!(file = %file.display(), error = %e, "cannot read import");
                    continue;
                }
            };
            for import in imports {
                if seen.insert(import.clone()) {
                    found.push(import.clone());
                    queue.push_back(import);
                }
            }
        }

        Ok(found)
    }
}

/// Import targets named in `content`, in source order
fn import_names(content: &str) -> Vec<String> {
    let code = strip_comments(content);
    let mut names = Vec::new();

    for (start, _) in code.match_indices('@') {
        let rest = &code[start..];
        let Some(keyword) = KEYWORDS.iter().find(|k| {
            rest.starts_with(**k)
                && rest[k.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_whitespace() || c == '"' || c == '\'' || c == '(')
        }) else {
            continue;
        };

        let clause = &rest[keyword.len()..];
        let end = clause.find([';', '\n', '{']).unwrap_or(clause.len());
        let clause = clause[..end].trim();

        let targets = if clause.contains(['"', '\'']) {
            let quoted = quoted_strings(clause);
            // `@use "x" as y` / `@forward "x" show z` name one module
            if *keyword == "@use" || *keyword == "@forward" {
                quoted.into_iter().take(1).collect()
            } else {
                quoted
            }
        } else {
            // Indented Sass and Stylus allow bare names
            skip_less_options(clause)
                .split(',')
                .filter_map(|s| s.split_whitespace().next())
                .map(str::to_string)
                .collect()
        };

        names.extend(targets.into_iter().filter(|t| is_local(t)));
    }

    names
}

fn skip_less_options(clause: &str) -> &str {
    // `@import (reference) foo`
    if clause.starts_with('(') {
        if let Some(close) = clause.find(')') {
            return clause[close + 1..].trim_start();
        }
    }
    clause
}

fn quoted_strings(clause: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = clause.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '"' && c != '\'' {
            continue;
        }
        let body = &clause[i + 1..];
        if let Some(len) = body.find(c) {
            out.push(body[..len].to_string());
            // Skip past the closing quote
            for _ in 0..=body[..len].chars().count() {
                chars.next();
            }
        }
    }
    out
}

/// Whether an import names a file on disk that the preprocessor inlines
fn is_local(target: &str) -> bool {
    !(target.is_empty()
        || target.starts_with("http://")
        || target.starts_with("https://")
        || target.starts_with("//")
        || target.starts_with("url(")
        || target.starts_with("sass:")
        || target.contains("#{")
        || target.ends_with(".css"))
}

/// Drop `/* */` and `//` comments, keeping string literals intact
fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    if c == '\n' {
                        out.push('\n');
                    }
                    prev = c;
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// First existing file `name` refers to from `dir`
fn resolve(dir: &Path, name: &str, kind: FileKind) -> Option<PathBuf> {
    candidates(&dir.join(name), kind)
        .into_iter()
        .find(|p| p.is_file())
}

fn candidates(base: &Path, kind: FileKind) -> Vec<PathBuf> {
    let has_ext = FileKind::from_path(base).is_some();

    match kind {
        FileKind::Less => {
            if base.extension().is_some() {
                vec![base.to_path_buf()]
            } else {
                vec![with_suffix(base, ".less")]
            }
        }
        FileKind::Scss | FileKind::Sass => {
            if has_ext {
                vec![base.to_path_buf(), partial(base)]
            } else {
                let mut out = Vec::new();
                for ext in ["scss", "sass"] {
                    let file = with_suffix(base, &format!(".{ext}"));
                    let underscored = partial(&file);
                    out.push(file);
                    out.push(underscored);
                }
                for index in ["_index.scss", "index.scss", "_index.sass", "index.sass"] {
                    out.push(base.join(index));
                }
                out
            }
        }
        FileKind::Stylus => {
            if has_ext {
                vec![base.to_path_buf()]
            } else {
                vec![with_suffix(base, ".styl"), base.join("index.styl")]
            }
        }
        FileKind::Coffee => Vec::new(),
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// `dir/name.scss` -> `dir/_name.scss`
fn partial(file: &Path) -> PathBuf {
    match file.file_name() {
        Some(name) => {
            let mut underscored = std::ffi::OsString::from("_");
            underscored.push(name);
            file.with_file_name(underscored)
        }
        None => file.to_path_buf(),
    }
}
