//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, merge summaries, durations, and JSON output.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use hyperglide_lib::merge::MergeSummary;

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

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const INFO: &str = "•";
  pub const ADD: &str = "+";
  pub const MODIFY: &str = "~";
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

/// Lines describing how one manifest section was merged.
///
/// Empty sections produce no lines.
pub fn merge_summary_lines(section: &str, summary: &MergeSummary) -> Vec<String> {
  if summary.total() == 0 {
    return Vec::new();
  }

  let mut lines = vec![format!("{} ({}):", section, summary.total())];
  for name in &summary.added {
    lines.push(format!("  {} Added: {}", symbols::ADD, name));
  }
  for name in &summary.overridden {
    lines.push(format!("  {} Pinned by {}: {}", symbols::MODIFY, section, name));
  }
  if !summary.retained.is_empty() {
    lines.push(format!("  {} From lock: {}", symbols::INFO, summary.retained.join(", ")));
  }
  lines
}

pub fn print_merge_summary(section: &str, summary: &MergeSummary) {
  for (i, line) in merge_summary_lines(section, summary).iter().enumerate() {
    if i == 0 {
      println!("{}", line.if_supports_color(Stream::Stdout, |s| s.bold()));
    } else if line.trim_start().starts_with(symbols::ADD) {
      println!("{}", line.if_supports_color(Stream::Stdout, |s| s.green()));
    } else if line.trim_start().starts_with(symbols::MODIFY) {
      println!("{}", line.if_supports_color(Stream::Stdout, |s| s.yellow()));
    } else {
      println!("{}", line.if_supports_color(Stream::Stdout, |s| s.dimmed()));
    }
  }
}

/// Print a failure to stderr as `error: ...`, including every cause.
pub fn print_error(err: &anyhow::Error) {
  eprintln!("{} {:#}", "error:".if_supports_color(Stream::Stderr, |s| s.red()), err);
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
