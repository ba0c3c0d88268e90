// Rust guideline compliant 2026-10-14

//! Lead dialer CLI library.
//!
//! Exposes the command, output, and terminal modules for the `ldm` binary
//! and for tests.

pub mod commands;
pub mod logging;
pub mod output;
pub mod terminal;

pub use commands::CommandContext;
pub use output::{create_formatter, format_timestamp, OutputFormatter};
pub use terminal::{get_terminal_width, should_use_color, wrap_text};
