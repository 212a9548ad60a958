//! Console reporting.
//!
//! Human-readable progress lines in the style of build logs: a colored
//! `----->` topic header followed by indented status lines.

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes progress lines to stdout, with optional color.
pub struct Reporter {
    stream: StandardStream,
}

impl Reporter {
    pub fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Reporter {
            stream: StandardStream::stdout(choice),
        }
    }

    /// Major step header with an arrow prefix.
    pub fn topic(&mut self, message: &str) -> io::Result<()> {
        self.stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(self.stream, "-----> ")?;
        self.stream.reset()?;
        writeln!(self.stream, "{}", message)
    }

    /// Indented progress line under the current topic.
    pub fn status(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.stream, "       {}", message)
    }

    /// Indented warning line.
    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        self.stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(self.stream, "       {}", message)?;
        self.stream.reset()?;
        writeln!(self.stream)
    }
}

/// Print a report as pretty-printed JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

/// Format a size in bytes to human-readable form.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}
