//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, durations, and the settings banner.

use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
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

/// Python-style boolean spelling, matching the `-DBUILD_SHARED_LIBS` value.
pub fn format_flag(value: bool) -> &'static str {
  if value { "True" } else { "False" }
}

/// `NAME:[value]`, the format CI logs are grepped for.
pub fn setting_line(name: &str, value: &str) -> String {
  format!("{}:[{}]", name, value)
}

pub fn print_setting(name: &str, value: &str) {
  println!("{}", setting_line(name, value));
}

/// Step heading followed by the exact command line.
pub fn print_step(title: &str, command: &str) {
  println!();
  println!(
    "{} {}:[{}]",
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
    title.if_supports_color(Stream::Stdout, |s| s.bold()),
    command
  );
  println!();
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
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
