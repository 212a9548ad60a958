//! Size-bounded cache eviction.
//!
//! Given a cache directory and a byte budget, evict the oldest files until
//! the directory's total size fits the budget. Eviction is best-effort and
//! file-granular; directory structure is left in place.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::Serialize;

/// Default cache byte budget (50MB), matching the asset-cache limit the
/// tool was originally built around.
pub const DEFAULT_CACHE_LIMIT: u64 = 52_428_800;

/// Options controlling an eviction pass.
#[derive(Debug, Clone, Default)]
pub struct EvictOptions {
    /// Select and report without deleting anything.
    pub dry_run: bool,
    /// Files older than this are evicted regardless of the byte budget.
    pub max_age: Option<Duration>,
}

/// Summary of one eviction pass.
#[derive(Debug, Clone, Serialize)]
pub struct EvictReport {
    /// The cache directory the pass ran over.
    pub cache_dir: PathBuf,
    /// Number of regular files found in the cache.
    pub examined: usize,
    /// Number of files evicted.
    pub evicted: usize,
    /// Total size of the evicted files.
    pub bytes_freed: u64,
    /// Total size of the files left in the cache.
    pub bytes_retained: u64,
}

/// One regular file in the cache, as seen by the selection pass.
#[derive(Debug, Clone)]
struct CacheEntry {
    path: PathBuf,
    size: u64,
    modified: SystemTime,
}

/// Evicts the oldest files from a cache directory until its total size is
/// at or under a byte budget.
pub struct CacheEvictor {
    dir: PathBuf,
    options: EvictOptions,
}

impl CacheEvictor {
    /// Create an evictor for the given cache directory with default options.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_options(dir, EvictOptions::default())
    }

    /// Create an evictor with explicit options.
    pub fn with_options(dir: impl Into<PathBuf>, options: EvictOptions) -> Self {
        CacheEvictor {
            dir: dir.into(),
            options,
        }
    }

    /// The cache directory this evictor operates on.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Evict oldest files until the cache's total size is at or under
    /// `byte_limit`.
    ///
    /// A missing cache directory is a no-op. A file that vanishes between
    /// scan and delete is treated as already evicted. Selection is
    /// deterministic: modification time ascending, path as tiebreaker.
    pub fn clean_over(&self, byte_limit: u64) -> io::Result<EvictReport> {
        if !self.dir.exists() {
            return Ok(EvictReport {
                cache_dir: self.dir.clone(),
                examined: 0,
                evicted: 0,
                bytes_freed: 0,
                bytes_retained: 0,
            });
        }

        let mut entries = Vec::new();
        collect_entries(&self.dir, &mut entries)?;

        let examined = entries.len();
        let total: u64 = entries.iter().map(|e| e.size).sum();
        let selected =
            select_evictions(entries, byte_limit, self.options.max_age, SystemTime::now());

        let mut evicted = 0;
        let mut bytes_freed = 0;
        for entry in &selected {
            if !self.options.dry_run {
                match std::fs::remove_file(&entry.path) {
                    Ok(()) => {}
                    // Vanished since the scan: the goal is already met.
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e),
                }
            }
            evicted += 1;
            bytes_freed += entry.size;
        }

        Ok(EvictReport {
            cache_dir: self.dir.clone(),
            examined,
            evicted,
            bytes_freed,
            bytes_retained: total - bytes_freed,
        })
    }
}

/// Recursively collect regular files with size and mtime. Symlinks and
/// other special entries are left alone.
fn collect_entries(dir: &Path, out: &mut Vec<CacheEntry>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_entries(&entry.path(), out)?;
        } else if file_type.is_file() {
            let metadata = entry.metadata()?;
            // Files with an unreadable mtime sort as oldest.
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            out.push(CacheEntry {
                path: entry.path(),
                size: metadata.len(),
                modified,
            });
        }
    }
    Ok(())
}

/// Pick the entries to evict: everything past `max_age`, then oldest-first
/// while the remaining total exceeds `byte_limit`.
fn select_evictions(
    mut entries: Vec<CacheEntry>,
    byte_limit: u64,
    max_age: Option<Duration>,
    now: SystemTime,
) -> Vec<CacheEntry> {
    entries.sort_by(|a, b| {
        a.modified
            .cmp(&b.modified)
            .then_with(|| a.path.cmp(&b.path))
    });

    let mut remaining: u64 = entries.iter().map(|e| e.size).sum();
    let mut selected = Vec::new();

    for entry in entries {
        let too_old = max_age.is_some_and(|age| {
            now.duration_since(entry.modified)
                .map(|elapsed| elapsed > age)
                .unwrap_or(false)
        });

        if too_old || remaining > byte_limit {
            remaining -= entry.size;
            selected.push(entry);
        }
    }

    selected
}
