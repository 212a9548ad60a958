//! Glob-pattern file sweep.
//!
//! A sweep reads an ignore file at the project root, expands every pattern
//! recursively against the tree, and deletes each matching entry that is not
//! a directory. Directories are never removed, so an overly broad pattern
//! cannot take out a whole subtree.
//!
//! Every pattern is expanded as `<root>/**/<pattern>`, where `**` matches
//! zero or more directories, so a pattern matches both immediate and nested
//! paths. Matching is shell-style: wildcards do not match a leading dot, so
//! `*.log` leaves `.secret.log` alone and never descends into hidden
//! directories such as `.git/`; a hidden file must be named with an explicit
//! leading dot in the pattern. Note that the expansion makes every pattern a
//! full-tree walk; on large trees the matching phase dominates the cost of
//! the sweep.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use serde::Serialize;

use crate::ignore_file::IgnoreFile;

/// Options controlling a sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Match and report without deleting anything.
    pub dry_run: bool,
}

/// Summary of one completed sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// The ignore file that drove the sweep.
    pub ignore_file: PathBuf,
    /// Number of patterns parsed from the ignore file.
    pub patterns: usize,
    /// Number of candidate paths matched, duplicates included.
    pub candidates: usize,
    /// Number of files actually deleted.
    pub deleted: usize,
    /// Number of matched directories left untouched.
    pub skipped_dirs: usize,
}

/// Result of asking for a sweep.
#[derive(Debug)]
pub enum SweepOutcome {
    /// The ignore file was not found; the tree was left untouched.
    Skipped { ignore_file: PathBuf },
    /// The sweep ran to completion.
    Swept(SweepReport),
}

/// Deletes files matching ignore-file patterns under an explicit project
/// root. The root is always passed in; the sweeper never consults the
/// process working directory.
pub struct Sweeper {
    root: PathBuf,
    options: SweepOptions,
}

impl Sweeper {
    /// Create a sweeper for the given project root with default options.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_options(root, SweepOptions::default())
    }

    /// Create a sweeper with explicit options.
    pub fn with_options(root: impl Into<PathBuf>, options: SweepOptions) -> Self {
        Sweeper {
            root: root.into(),
            options,
        }
    }

    /// The project root this sweeper operates on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run one sweep driven by the named ignore file at the project root.
    ///
    /// A missing ignore file yields `SweepOutcome::Skipped`. Matched
    /// directories are skipped; a candidate that is already gone by the time
    /// its deletion runs (matched by two patterns, say) is a no-op. Any
    /// other filesystem error aborts the sweep.
    pub fn sweep(&self, ignore_file_name: &str) -> io::Result<SweepOutcome> {
        let ignore_path = self.root.join(ignore_file_name);

        let Some(ignore_file) = IgnoreFile::load(&ignore_path)? else {
            return Ok(SweepOutcome::Skipped {
                ignore_file: ignore_path,
            });
        };

        let candidates = self.matches(&ignore_file)?;
        let (deleted, skipped_dirs) = self.delete(&candidates)?;

        Ok(SweepOutcome::Swept(SweepReport {
            ignore_file: ignore_path,
            patterns: ignore_file.patterns().len(),
            candidates: candidates.len(),
            deleted,
            skipped_dirs,
        }))
    }

    /// Expand every pattern in the ignore file against the project tree and
    /// merge the results into one flat candidate list.
    ///
    /// Duplicates are allowed by design: a path matched by two patterns
    /// appears twice, and its second deletion attempt is a no-op.
    pub fn matches(&self, ignore_file: &IgnoreFile) -> io::Result<Vec<PathBuf>> {
        let root = self.root.to_str().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "project root is not valid UTF-8",
            )
        })?;
        // The root is path text, not pattern text; a directory name like
        // "app[prod]" must match itself literally.
        let root = Pattern::escape(root);

        // Wildcards must not match a leading dot, per shell globbing.
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };

        let mut candidates = Vec::new();

        for pattern in ignore_file.patterns() {
            if Path::new(pattern).is_absolute() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("absolute pattern '{}' would escape the project root", pattern),
                ));
            }

            let full = Path::new(&root).join("**").join(pattern);
            let full = full.to_str().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("pattern '{}' is not valid UTF-8 against this root", pattern),
                )
            })?;

            let paths = glob_with(full, options).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid pattern '{}': {}", pattern, e),
                )
            })?;

            for entry in paths {
                match entry {
                    Ok(path) => candidates.push(path),
                    // An unreadable directory mid-walk is a real error, not
                    // a miss.
                    Err(e) => return Err(e.into_error()),
                }
            }
        }

        Ok(candidates)
    }

    /// Delete every candidate that is not a directory.
    ///
    /// Returns `(deleted, skipped_dirs)`. In dry-run mode nothing is
    /// removed and `deleted` counts the files that would have been.
    pub fn delete(&self, candidates: &[PathBuf]) -> io::Result<(usize, usize)> {
        let mut deleted = 0;
        let mut skipped_dirs = 0;
        // Dry run only: a real run needs no bookkeeping because the second
        // deletion of a duplicate candidate finds nothing to remove.
        let mut counted = HashSet::new();

        for path in candidates {
            if path.is_dir() {
                skipped_dirs += 1;
                continue;
            }
            if self.options.dry_run {
                if path.exists() && counted.insert(path.as_path()) {
                    deleted += 1;
                }
                continue;
            }
            if remove_file_idempotent(path)? {
                deleted += 1;
            }
        }

        Ok((deleted, skipped_dirs))
    }
}

/// Remove a file, treating "already gone" as success.
fn remove_file_idempotent(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
