use super::{
    colors::Colors,
    error_code::{ErrorCode, ErrorType},
    position::Position,
};

/// A rendered-on-demand runtime diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub title: &'static str,
    pub error_type: ErrorType,
    pub message: String,
    pub position: Option<Position>,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn from_code(code: &ErrorCode, args: &[&str]) -> Self {
        Self {
            code: code.code,
            title: code.title,
            error_type: code.error_type,
            message: code.format_message(args),
            position: None,
            hint: code.hint.map(str::to_string),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        if position.is_known() {
            self.position = Some(position);
        }
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Renders the diagnostic with the given palette.
    ///
    /// ```text
    /// -- Runtime error: type error [E1004]
    ///
    /// Expected Int, got Bool.
    ///
    ///   --> line 3:7
    ///
    /// Hint: ...
    /// ```
    pub fn render_with(&self, colors: &Colors) -> String {
        let header_color = match self.error_type {
            ErrorType::Runtime => colors.error,
            ErrorType::Warning => colors.warning,
        };
        let mut out = format!(
            "{}-- {}: {} [{}]{}\n",
            header_color,
            self.error_type.prefix(),
            self.title.to_lowercase(),
            self.code,
            colors.reset
        );
        out.push('\n');
        out.push_str(&self.message);
        out.push('\n');
        if let Some(position) = self.position {
            out.push_str(&format!("\n  --> line {}\n", position));
        }
        if let Some(hint) = &self.hint {
            out.push_str(&format!("\n{}Hint:{} {}\n", colors.hint, colors.reset, hint));
        }
        out
    }

    /// Renders the diagnostic, honoring `NO_COLOR`.
    pub fn render(&self) -> String {
        self.render_with(&Colors::new())
    }
}
