//! Terminal rendering of build results.
//!
//! Human output is a status line followed by indented `label: value` fields;
//! `--format json` replaces all of it with the serialized report.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Outcome of a phase, as shown at the start of its status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Done,
  Skipped,
  Failed,
}

impl Status {
  fn marker(self) -> &'static str {
    match self {
      Status::Done => "✓",
      Status::Skipped => "•",
      Status::Failed => "✗",
    }
  }
}

/// Print a status line. Failures go to stderr.
pub fn status(status: Status, message: &str) {
  let marker = status.marker();
  match status {
    Status::Done => println!("{} {}", marker.if_supports_color(Stream::Stdout, |s| s.green()), message),
    Status::Skipped => println!("{} {}", marker.if_supports_color(Stream::Stdout, |s| s.blue()), message),
    Status::Failed => eprintln!(
      "{} {}",
      marker.if_supports_color(Stream::Stderr, |s| s.red()),
      message.if_supports_color(Stream::Stderr, |s| s.red())
    ),
  }
}

pub fn field(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

/// One `$out/bin` entry: `name → ../lib/<entry>`.
pub fn bin_entry(name: &str, target: &str) {
  println!("    {} {} {}", name, "→".if_supports_color(Stream::Stdout, |s| s.dimmed()), target);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
  println!("{}", json);
  Ok(())
}

/// Byte count in binary units with one decimal, e.g. `1.5 KiB`.
pub fn human_size(bytes: u64) -> String {
  const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];

  if bytes < 1024 {
    return format!("{} B", bytes);
  }
  let mut value = bytes as f64 / 1024.0;
  let mut unit = 0;
  while value >= 1024.0 && unit + 1 < UNITS.len() {
    value /= 1024.0;
    unit += 1;
  }
  format!("{:.1} {}", value, UNITS[unit])
}

/// Wall time of a build: milliseconds under a second, then seconds.
pub fn human_elapsed(elapsed: Duration) -> String {
  if elapsed < Duration::from_secs(1) {
    format!("{}ms", elapsed.as_millis())
  } else if elapsed < Duration::from_secs(60) {
    format!("{:.2}s", elapsed.as_secs_f64())
  } else {
    let secs = elapsed.as_secs();
    format!("{}m {}s", secs / 60, secs % 60)
  }
}
