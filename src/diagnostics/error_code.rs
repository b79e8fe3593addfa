//! Error code types for the diagnostics system

/// Distinguishes fatal runtime errors from recoverable warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    Runtime,
    Warning,
}

impl ErrorType {
    /// Returns the prefix string used in diagnostic headers
    pub fn prefix(&self) -> &'static str {
        match self {
            ErrorType::Runtime => "Runtime error",
            ErrorType::Warning => "Runtime warning",
        }
    }
}

/// Error code with message template and optional hint
///
/// `message` uses `{}` placeholders which are filled positionally by
/// [`ErrorCode::format_message`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
    pub error_type: ErrorType,
    pub message: &'static str,
    pub hint: Option<&'static str>,
}

impl ErrorCode {
    /// Fills the `{}` placeholders of the message template in order.
    ///
    /// Missing arguments leave the placeholder empty, extra arguments are ignored.
    pub fn format_message(&self, args: &[&str]) -> String {
        let mut out = String::with_capacity(self.message.len() + 16);
        let mut rest = self.message;
        let mut args = args.iter();
        while let Some(idx) = rest.find("{}") {
            out.push_str(&rest[..idx]);
            if let Some(arg) = args.next() {
                out.push_str(arg);
            }
            rest = &rest[idx + 2..];
        }
        out.push_str(rest);
        out
    }
}
