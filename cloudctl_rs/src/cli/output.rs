//! Diagnostic output: bang-prefixed failure lines and warnings, both on stderr.

use crate::colors::Painter;

/// Prefix of every failure line.
pub const BANG: &str = " !    ";

/// Prefix of every flushed warning.
pub const WARNING_MARKER: &str = "WARNING: ";

/// Prefix every line of `message` with [`BANG`].
pub fn bang_lines(message: &str) -> String {
    let message = message.trim_end();
    if message.is_empty() {
        return BANG.trim_end().to_string();
    }
    message
        .lines()
        .map(|line| format!("{BANG}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a failure message to stderr.
pub fn bang(painter: &Painter, message: &str) {
    eprintln!("{}", painter.error(&bang_lines(message)));
}

/// Print and drain accumulated warnings, one per line.
pub fn flush_warnings(painter: &Painter, warnings: &mut Vec<String>) {
    for warning in warnings.drain(..) {
        eprintln!("{}", painter.warn(&format!("{WARNING_MARKER}{warning}")));
    }
}
