// Rust guideline compliant 2026-10-14

//! Terminal helpers for the `ldm` CLI: color detection, width, wrapping,
//! and colored status lines on stderr.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Determines if colored output should be used.
///
/// Color is off when `--no-color` was passed, when `NO_COLOR` is set, or
/// when stdout is not a terminal.
pub fn should_use_color(no_color_flag: bool) -> bool {
    if no_color_flag || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Gets the terminal width in columns, or 80 if unknown.
pub fn get_terminal_width() -> usize {
    term_size::dimensions().map_or(80, |(width, _)| width)
}

/// Word-wraps text to `width` columns, indenting continuation lines.
///
/// Lines are never broken inside a word. Widths below 10 disable wrapping.
pub fn wrap_text(text: &str, width: usize, indent: usize) -> String {
    let available = width.saturating_sub(indent);
    if available < 10 {
        return text.to_string();
    }

    let pad = " ".repeat(indent);
    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > available {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines.join(&format!("\n{}", pad))
}

fn print_status(use_color: bool, prefix: &str, color: Color, message: &str) {
    let choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stderr, "{}", prefix);
    let _ = stderr.reset();
    let _ = writeln!(stderr, " {}", message);
}

/// Prints an error line to stderr.
pub fn print_error(use_color: bool, message: &str) {
    print_status(use_color, "Error:", Color::Red, message);
}

/// Prints a warning line to stderr.
pub fn print_warning(use_color: bool, message: &str) {
    print_status(use_color, "Warning:", Color::Yellow, message);
}
