//! Slugsweep - pattern-based build cleanup and size-bounded cache eviction

pub mod evict;
pub mod ignore_file;
pub mod output;
pub mod sweep;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use evict::{CacheEvictor, EvictOptions, EvictReport, DEFAULT_CACHE_LIMIT};
pub use ignore_file::{IgnoreFile, EARLY_IGNORE_FILE, LATE_IGNORE_FILE};
pub use output::{format_size, print_json, Reporter};
pub use sweep::{SweepOptions, SweepOutcome, SweepReport, Sweeper};
