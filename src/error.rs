//! Error types for Kiln
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Kiln operations
pub type KilnResult<T> = Result<T, KilnError>;

/// Main error type for Kiln operations
#[derive(Error, Debug)]
pub enum KilnError {
    /// Bad or missing project / file entry. Skipped, never fatal to a watch.
    #[error("configuration error in {context}: {message}")]
    Configuration { context: String, message: String },

    /// Path could not be registered with the filesystem watcher
    #[error("cannot watch {path}: {message}")]
    WatchRegistration { path: PathBuf, message: String },

    /// External compiler reported a failure
    #[error("failed to compile {entry}: {reason}")]
    Compile { entry: PathBuf, reason: String },

    /// The import index was observed in an inconsistent state
    #[error("import index is inconsistent: {0}")]
    IndexConsistency(String),

    /// Project id not present in the store
    #[error("project not found: {id}")]
    ProjectNotFound { id: String },

    /// Source file not registered in any project
    #[error("file not registered in any project: {path}")]
    FileNotFound { path: PathBuf },

    /// No compiler is known for this source extension
    #[error("unsupported file kind: {path}")]
    UnsupportedFileKind { path: PathBuf },

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (settings store) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid TOML configuration
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },
}

impl From<notify::Error> for KilnError {
    fn from(err: notify::Error) -> Self {
        let path = err.paths.first().cloned().unwrap_or_default();
        KilnError::WatchRegistration {
            path,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_compile() {
        let err = KilnError::Compile {
            entry: PathBuf::from("site/main.less"),
            reason: "unexpected token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to compile site/main.less: unexpected token"
        );
    }

    #[test]
    fn test_error_display_watch_registration() {
        let err = KilnError::WatchRegistration {
            path: PathBuf::from("gone.less"),
            message: "no such file".to_string(),
        };
        assert_eq!(err.to_string(), "cannot watch gone.less: no such file");
    }
}
