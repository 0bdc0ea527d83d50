//! File Kind Value Object
//!
//! Classifies a source file by extension. The kind decides the default
//! output extension, the import syntax the scanner understands, and the
//! compiler command that runs it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Compilable source kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Less,
    Scss,
    Sass,
    Stylus,
    Coffee,
}

impl FileKind {
    /// All known kinds, in display order
    pub const ALL: [FileKind; 5] = [
        FileKind::Less,
        FileKind::Scss,
        FileKind::Sass,
        FileKind::Stylus,
        FileKind::Coffee,
    ];

    /// Detect the kind from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "less" => Some(FileKind::Less),
            "scss" => Some(FileKind::Scss),
            "sass" => Some(FileKind::Sass),
            "styl" => Some(FileKind::Stylus),
            "coffee" => Some(FileKind::Coffee),
            _ => None,
        }
    }

    /// Source extension (without dot)
    pub fn source_extension(&self) -> &'static str {
        match self {
            FileKind::Less => "less",
            FileKind::Scss => "scss",
            FileKind::Sass => "sass",
            FileKind::Stylus => "styl",
            FileKind::Coffee => "coffee",
        }
    }

    /// Output extension (without dot)
    pub fn output_extension(&self) -> &'static str {
        match self {
            FileKind::Coffee => "js",
            _ => "css",
        }
    }

    /// Whether files of this kind are stylesheets with `@import`
    pub fn is_stylesheet(&self) -> bool {
        !matches!(self, FileKind::Coffee)
    }

    /// Default output path: sibling file with the mapped extension
    pub fn default_output(&self, src: &Path) -> PathBuf {
        src.with_extension(self.output_extension())
    }

    /// Config key for this kind (`[compilers.<key>]`)
    pub fn config_key(&self) -> &'static str {
        match self {
            FileKind::Less => "less",
            FileKind::Scss => "scss",
            FileKind::Sass => "sass",
            FileKind::Stylus => "stylus",
            FileKind::Coffee => "coffee",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.config_key())
    }
}

impl FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "less" => Ok(FileKind::Less),
            "scss" => Ok(FileKind::Scss),
            "sass" => Ok(FileKind::Sass),
            "stylus" | "styl" => Ok(FileKind::Stylus),
            "coffee" | "coffeescript" => Ok(FileKind::Coffee),
            other => Err(format!("unknown file kind '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_kind_from_extension() {
        assert_eq!(FileKind::from_path(Path::new("a/main.less")), Some(FileKind::Less));
        assert_eq!(FileKind::from_path(Path::new("a/_vars.SCSS")), Some(FileKind::Scss));
        assert_eq!(FileKind::from_path(Path::new("app.styl")), Some(FileKind::Stylus));
        assert_eq!(FileKind::from_path(Path::new("readme.md")), None);
        assert_eq!(FileKind::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn default_output_maps_extension() {
        assert_eq!(
            FileKind::Less.default_output(Path::new("site/main.less")),
            PathBuf::from("site/main.css")
        );
        assert_eq!(
            FileKind::Coffee.default_output(Path::new("app.coffee")),
            PathBuf::from("app.js")
        );
    }

    #[test]
    fn parses_aliases() {
        assert_eq!("styl".parse::<FileKind>().unwrap(), FileKind::Stylus);
        assert!("jade".parse::<FileKind>().is_err());
    }
}
