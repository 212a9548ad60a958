//! CLI entry point for slugsweep

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use slugsweep::{
    format_size, print_json, CacheEvictor, EvictOptions, IgnoreFile, Reporter, SweepOptions,
    SweepReport, Sweeper, DEFAULT_CACHE_LIMIT, EARLY_IGNORE_FILE, LATE_IGNORE_FILE,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

/// Build phase whose default ignore file drives the sweep
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Phase {
    /// Before the main build step (.earlyslugignore)
    Early,
    /// After the main build step (.lateslugignore)
    #[default]
    Late,
}

impl Phase {
    fn ignore_file(self) -> &'static str {
        match self {
            Phase::Early => EARLY_IGNORE_FILE,
            Phase::Late => LATE_IGNORE_FILE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "slugsweep")]
#[command(about = "Pattern-based build cleanup: ignore-file sweeps and cache eviction")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete files matching the glob patterns in an ignore file
    Sweep {
        /// Project root to sweep
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Build phase whose default ignore file to use
        #[arg(long, value_enum, default_value = "late")]
        phase: Phase,

        /// Ignore file name relative to the project root, overriding --phase
        #[arg(short = 'f', long = "ignore-file", value_name = "FILE")]
        ignore_file: Option<String>,

        /// Match and report without deleting anything
        #[arg(short = 'n', long = "dry-run")]
        dry_run: bool,

        /// Output the sweep report as JSON
        #[arg(long = "json")]
        json: bool,

        /// Control color output: auto, always, never
        #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
        color: ColorMode,
    },

    /// Evict the oldest files from a cache directory until it fits a byte budget
    Evict {
        /// Cache directory to evict from
        dir: PathBuf,

        /// Byte budget with optional K/M/G suffix (default: 50M)
        #[arg(short = 'l', long = "limit", value_name = "SIZE")]
        limit: Option<String>,

        /// Also evict files older than DURATION (e.g. 30m, 7d)
        #[arg(long = "max-age", value_name = "DURATION")]
        max_age: Option<String>,

        /// Select and report without deleting anything
        #[arg(short = 'n', long = "dry-run")]
        dry_run: bool,

        /// Output the eviction report as JSON
        #[arg(long = "json")]
        json: bool,

        /// Control color output: auto, always, never
        #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
        color: ColorMode,
    },
}

/// Parse a duration string like "30m", "7d" into a Duration.
fn parse_duration_string(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

/// Parse a byte size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    Ok(num * multiplier)
}

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Sweep {
            root,
            phase,
            ignore_file,
            dry_run,
            json,
            color,
        } => {
            let name = ignore_file.unwrap_or_else(|| phase.ignore_file().to_string());
            run_sweep(&root, &name, dry_run, json, should_use_color(color))
        }
        Command::Evict {
            dir,
            limit,
            max_age,
            dry_run,
            json,
            color,
        } => {
            let limit = match limit {
                Some(ref s) => parse_byte_size(s).unwrap_or_else(|e| {
                    eprintln!("slugsweep: invalid --limit '{}': {}", s, e);
                    process::exit(1);
                }),
                None => DEFAULT_CACHE_LIMIT,
            };
            let max_age = max_age.as_ref().map(|s| {
                parse_duration_string(s).unwrap_or_else(|e| {
                    eprintln!("slugsweep: invalid --max-age '{}': {}", s, e);
                    process::exit(1);
                })
            });
            run_evict(&dir, limit, max_age, dry_run, json, should_use_color(color))
        }
    };

    if let Err(e) = result {
        eprintln!("slugsweep: {}", e);
        process::exit(1);
    }
}

fn run_sweep(
    root: &Path,
    ignore_file_name: &str,
    dry_run: bool,
    json: bool,
    use_color: bool,
) -> io::Result<()> {
    let root = if root.is_absolute() {
        root.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(root)
    };

    let mut reporter = Reporter::new(use_color);
    let sweeper = Sweeper::with_options(&root, SweepOptions { dry_run });

    let ignore_path = root.join(ignore_file_name);
    let Some(ignore_file) = IgnoreFile::load(&ignore_path)? else {
        return if json {
            print_json(&serde_json::json!({
                "skipped": true,
                "ignore_file": ignore_path,
            }))
        } else {
            reporter.topic(&format!(
                "No {} file found; nothing to sweep",
                ignore_file_name
            ))
        };
    };

    let candidates = sweeper.matches(&ignore_file)?;

    // The candidate count goes out before anything is deleted.
    if !json {
        reporter.topic(&format!("Processing {}", ignore_path.display()))?;
        let verb = if dry_run { "Would delete" } else { "Deleting" };
        reporter.status(&format!(
            "{} {} files matching {} patterns",
            verb,
            candidates.len(),
            ignore_file.patterns().len()
        ))?;
    }

    let (deleted, skipped_dirs) = sweeper.delete(&candidates)?;
    let report = SweepReport {
        ignore_file: ignore_path,
        patterns: ignore_file.patterns().len(),
        candidates: candidates.len(),
        deleted,
        skipped_dirs,
    };

    if json {
        print_json(&report)
    } else {
        if report.skipped_dirs > 0 {
            reporter.warn(&format!(
                "Skipped {} matched directories (directories are never deleted)",
                report.skipped_dirs
            ))?;
        }
        let done = if dry_run { "Would have deleted" } else { "Deleted" };
        reporter.status(&format!("{} {} files", done, report.deleted))
    }
}

fn run_evict(
    dir: &Path,
    limit: u64,
    max_age: Option<Duration>,
    dry_run: bool,
    json: bool,
    use_color: bool,
) -> io::Result<()> {
    let mut reporter = Reporter::new(use_color);
    let evictor = CacheEvictor::with_options(dir, EvictOptions { dry_run, max_age });

    let report = evictor.clean_over(limit)?;

    if json {
        return print_json(&report);
    }

    reporter.topic(&format!(
        "Cleaning {} to fit {}",
        report.cache_dir.display(),
        format_size(limit)
    ))?;
    let verb = if dry_run { "Would evict" } else { "Evicted" };
    reporter.status(&format!(
        "{} {} of {} files, freeing {}",
        verb,
        report.evicted,
        report.examined,
        format_size(report.bytes_freed)
    ))?;
    reporter.status(&format!("{} retained", format_size(report.bytes_retained)))
}
