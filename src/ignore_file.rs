//! Ignore-file parsing.
//!
//! An ignore file is plain text with one glob pattern per line. Lines are
//! trimmed of surrounding whitespace and blank lines are skipped; every
//! remaining line is kept verbatim as a pattern. There is no comment syntax:
//! a line starting with `#` is treated as a literal pattern (which will
//! almost certainly match nothing), not as documentation.

use std::io;
use std::path::{Path, PathBuf};

/// Ignore file consulted before the main build step.
pub const EARLY_IGNORE_FILE: &str = ".earlyslugignore";

/// Ignore file consulted after the main build step.
pub const LATE_IGNORE_FILE: &str = ".lateslugignore";

/// A parsed ignore file: its source path plus the glob patterns it lists.
///
/// Pattern order is preserved but has no effect on the outcome of a sweep;
/// every match of every pattern is deleted.
#[derive(Debug, Clone)]
pub struct IgnoreFile {
    path: PathBuf,
    patterns: Vec<String>,
}

impl IgnoreFile {
    /// Load and parse an ignore file.
    ///
    /// Returns `Ok(None)` if the file does not exist; absence is the common
    /// case and not an error. I/O failures on an existing file are returned
    /// as errors.
    pub fn load(path: &Path) -> io::Result<Option<IgnoreFile>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(Some(IgnoreFile {
            path: path.to_path_buf(),
            patterns: parse_patterns(&content),
        }))
    }

    /// The path this ignore file was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The glob patterns listed in the file, in file order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True if the file contained no patterns (only blank lines).
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Split ignore-file content into patterns: trim each line, drop blanks.
fn parse_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
