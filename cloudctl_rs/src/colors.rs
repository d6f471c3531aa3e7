//! Terminal color utilities for CLI output.
//!
//! Provides ANSI color codes and semantic helpers for consistent
//! colorized diagnostics. Everything the dispatcher prints on its own
//! goes to stderr, so terminal detection looks at stderr.

use std::io::IsTerminal;

use serde::Deserialize;

// ============================================================================
// ANSI Color Codes
// ============================================================================

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

pub const BOLD: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";

// ============================================================================
// Color State
// ============================================================================

/// When to emit ANSI escapes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Determines if colors should be used based on ColorMode, `NO_COLOR` and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
        }
    }
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    /// A painter that never colors (tests, piped output).
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Failures - RED
    pub fn error(&self, s: &str) -> String {
        self.wrap(s, RED)
    }

    /// Warnings - YELLOW
    pub fn warn(&self, s: &str) -> String {
        self.wrap(s, YELLOW)
    }

    /// Success - GREEN
    pub fn ok(&self, s: &str) -> String {
        self.wrap(s, GREEN)
    }

    /// Section headers
    pub fn bold(&self, s: &str) -> String {
        self.wrap(s, BOLD)
    }

    fn wrap(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_painter_leaves_text_alone() {
        let painter = Painter::plain();
        assert!(!painter.enabled());
        assert_eq!(painter.error("boom"), "boom");
        assert_eq!(painter.warn("careful"), "careful");
    }

    #[test]
    fn test_always_wraps_with_reset() {
        let painter = Painter::new(ColorMode::Always);
        assert_eq!(painter.ok("done"), format!("{GREEN}done{RESET}"));
        assert_eq!(painter.bold("Usage"), format!("{BOLD}Usage{RESET}"));
    }

    #[test]
    fn test_never_disables() {
        assert!(!is_enabled(ColorMode::Never));
        assert!(is_enabled(ColorMode::Always));
    }
}
