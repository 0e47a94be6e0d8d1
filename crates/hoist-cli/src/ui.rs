//! Terminal status output.
//!
//! Small helpers for user-facing status lines, separate from the tracing
//! log stream. Colors respect NO_COLOR/FORCE_COLOR, the `--no-color` flag,
//! and terminal detection.

use owo_colors::OwoColorize;

/// Apply the `--no-color` flag before any status output.
pub fn init_colors(no_color: bool) {
    if no_color {
        console::set_colors_enabled_stderr(false);
    }
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{}", success_line(message, should_use_color()));
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{}", info_line(message, should_use_color()));
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!("{}", warning_line(message, should_use_color()));
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{}", error_line(message, should_use_color()));
}

fn success_line(message: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "✓".green().bold(), message)
    } else {
        format!("✓ {message}")
    }
}

fn info_line(message: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "ℹ".blue().bold(), message)
    } else {
        format!("ℹ {message}")
    }
}

fn warning_line(message: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "⚠".yellow().bold(), message.yellow())
    } else {
        format!("⚠ {message}")
    }
}

fn error_line(message: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "✗".red().bold(), message.red())
    } else {
        format!("✗ {message}")
    }
}

/// Whether colored output should be used.
///
/// NO_COLOR wins over FORCE_COLOR; otherwise console's stderr color state
/// decides (terminal detection, plus any `--no-color` override applied by
/// [`init_colors`]).
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::colors_enabled_stderr()
}

/// Format an elapsed duration for the build summary.
pub fn format_duration(duration: std::time::Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
