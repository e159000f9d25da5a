//! Astral-style CLI output formatting.
//!
//! Human-readable output goes to stdout with colored symbols; `--json`
//! switches every helper to one JSON object per line
//! (`{"type": ..., "payload": ...}`) and `--quiet` drops everything except
//! warnings, errors and JSON.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};
use owo_colors::Stream::{Stderr, Stdout};
use serde_json::json;

use super::command::ColorChoice;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }

    /// Whether progress bars and spinners should draw.
    #[must_use]
    pub const fn animated(self) -> bool {
        !self.json && !self.quiet
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Route one event: JSON line in JSON mode, `human` otherwise unless quiet.
fn emit(kind: &str, payload: impl FnOnce() -> serde_json::Value, human: impl FnOnce()) {
    let config = read_config();
    if config.json {
        emit_json_line(kind, payload());
    } else if !config.quiet {
        human();
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Apply `--color`. `auto` leaves detection to the terminal; styling below
/// goes through `if_supports_color`, which honours the override.
pub fn configure_color(choice: &ColorChoice) {
    match choice {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Number of `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    emit(
        "header",
        || json!({ "app": "tradelane", "version": version }),
        || {
            println!(
                "{} {}",
                "tradelane".if_supports_color(Stdout, |t| t.bold()),
                version.if_supports_color(Stdout, |t| t.dimmed())
            );
            println!();
        },
    );
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        || json!({ "label": label, "value": value }),
        || {
            println!(
                "  {:<14} {}",
                label.if_supports_color(Stdout, |t| t.dimmed()),
                value
            );
        },
    );
}

/// Print a success line.
pub fn success(message: &str) {
    emit(
        "success",
        || json!({ "message": message }),
        || println!("  {} {}", "✓".if_supports_color(Stdout, |t| t.green()), message),
    );
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    if is_json() {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "⚠".if_supports_color(Stdout, |t| t.yellow()), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }
    eprintln!("  {} {}", "×".if_supports_color(Stderr, |t| t.red()), message);
}

/// Print a section header.
pub fn section(title: &str) {
    emit(
        "section",
        || json!({ "title": title }),
        || {
            println!();
            println!("{}", title.if_supports_color(Stdout, |t| t.bold()));
        },
    );
}

/// Print a dimmed note.
pub fn note(message: &str) {
    emit(
        "note",
        || json!({ "message": message }),
        || println!("  {}", message.if_supports_color(Stdout, |t| t.dimmed())),
    );
}

fn hint_style() -> Style {
    Style::new().cyan().dimmed()
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    emit(
        "hint",
        || json!({ "message": message }),
        || {
            println!(
                "  {}: {}",
                "hint".if_supports_color(Stdout, |t| t.style(hint_style())),
                message.if_supports_color(Stdout, |t| t.dimmed())
            );
        },
    );
}

/// Print multiple lines of content, each indented. Nothing in JSON mode;
/// callers emit a structured record instead.
pub fn lines(content: &str) {
    let config = read_config();
    if config.json || config.quiet {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a structured record (JSON mode only).
pub fn record(kind: &str, payload: serde_json::Value) {
    if is_json() {
        emit_json_line(kind, payload);
    }
}

/// Format a positive value in green.
pub fn positive(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.if_supports_color(Stdout, |t| t.green()))
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.if_supports_color(Stdout, |t| t.cyan()))
}

/// Format a dimmed/muted value.
pub fn muted(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.if_supports_color(Stdout, |t| t.dimmed()))
}

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a braille spinner. Hidden in JSON or quiet mode.
pub fn spinner(message: &str) -> ProgressBar {
    if !read_config().animated() {
        let pb = ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Start a bounded progress bar. Hidden in JSON or quiet mode.
pub fn progress(total: usize, message: &str) -> ProgressBar {
    if !read_config().animated() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("  {spinner:.cyan} {msg:<14} [{bar:30.cyan/blue}] {pos}/{len} {prefix}")
    {
        pb.set_style(style.progress_chars("=> ").tick_strings(BRAILLE_SPINNER));
    }
    pb.set_message(message.to_string());
    pb
}

/// Finish a spinner or bar with a success checkmark.
pub fn spinner_success(pb: &ProgressBar, message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("spinner_success", json!({ "message": message }));
        pb.finish_and_clear();
        return;
    }
    if config.quiet {
        pb.finish_and_clear();
        return;
    }
    pb.set_style(ProgressStyle::default_spinner());
    let mark = "✓".if_supports_color(Stdout, |t| t.green());
    pb.finish_with_message(format!("{mark} {message}"));
}

/// Finish a spinner or bar with a failure mark.
pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    if is_json() {
        emit_json_line("spinner_fail", json!({ "message": message }));
        pb.finish_and_clear();
        return;
    }
    pb.set_style(ProgressStyle::default_spinner());
    let mark = "×".if_supports_color(Stdout, |t| t.red());
    pb.finish_with_message(format!("{mark} {message}"));
}
