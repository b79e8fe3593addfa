//! ANSI palette for runtime diagnostics, honoring `NO_COLOR`.

use std::env;

/// Escape sequences keyed by the role they play in a rendered diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    pub error: &'static str,
    pub warning: &'static str,
    pub hint: &'static str,
    pub reset: &'static str,
}

impl Colors {
    /// Palette for stderr: plain when `NO_COLOR` is set.
    pub fn new() -> Self {
        if colors_disabled() {
            Self::no_color()
        } else {
            Self::with_color()
        }
    }

    pub fn with_color() -> Self {
        Self {
            error: "\u{1b}[31m",
            warning: "\u{1b}[33m",
            hint: "\u{1b}[36m",
            reset: "\u{1b}[0m",
        }
    }

    pub fn no_color() -> Self {
        Self {
            error: "",
            warning: "",
            hint: "",
            reset: "",
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self::new()
    }
}

/// Any value of `NO_COLOR`, even empty, disables color.
pub fn colors_disabled() -> bool {
    env::var_os("NO_COLOR").is_some()
}
