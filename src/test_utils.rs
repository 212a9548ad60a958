//! Test utilities for creating temporary project trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory for testing.
///
/// Provides methods for creating files and directories. The tree is
/// automatically cleaned up when dropped.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create a new empty temporary project.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the project root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file with the given content.
    ///
    /// Creates parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
