//! Runtime diagnostics: error code table, positions and rendering.

pub mod colors;
pub mod diagnostic;
pub mod error_code;
pub mod position;
pub mod runtime_errors;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCode, ErrorType};
pub use position::Position;
pub use runtime_errors::*;
