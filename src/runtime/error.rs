use std::fmt;

use crate::diagnostics::{
    CONVERSION_FAILED, DIVISION_BY_ZERO_RUNTIME, Diagnostic, ErrorCode, FIELD_NOT_FOUND,
    FOREIGN_CALL_SETUP, FUNCTION_NOT_FOUND, INDEX_OUT_OF_BOUNDS, INVALID_OPERATION,
    INVALID_PROGRAM_TABLES, MALFORMED_RECORD, Position, RUNTIME_NOT_INITIALIZED,
    RUNTIME_TYPE_ERROR, TYPE_NOT_FOUND, UNDEFINED_IDENTIFIER, UNSUPPORTED_OPERATION,
    WRONG_NUMBER_OF_ARGUMENTS,
};

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Every failure a runtime primitive can report.
///
/// All kinds except [`RuntimeError::FieldNotFound`] are fatal once they reach
/// the ABI boundary; see [`fatal`].
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    TypeMismatch {
        expected: String,
        found: String,
    },
    /// An `Unknown`-tagged value was dereferenced.
    UndefinedIdentifier {
        name: String,
    },
    ArityMismatch {
        function: String,
        arity: usize,
        captured: usize,
        supplied: usize,
        position: Position,
    },
    FunctionNotFound {
        index: usize,
        table_len: usize,
        position: Position,
    },
    FunctionTypeNotFound {
        type_name: String,
    },
    FieldNotFound {
        field: String,
        constructor: String,
        position: Position,
    },
    UnsupportedOperandType {
        operation: &'static str,
        type_name: String,
    },
    UnsupportedOperation {
        kind: &'static str,
        code: i64,
        type_name: String,
    },
    DivisionByZero {
        type_name: String,
    },
    ForeignCallSetupFailure {
        function: String,
        reason: String,
    },
    ConversionFailure {
        input: String,
        target: &'static str,
    },
    MalformedRecord {
        type_name: String,
        reason: String,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
        collection: &'static str,
    },
    InvalidProgramTables {
        reason: String,
    },
    RuntimeNotInitialized,
}

impl RuntimeError {
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        RuntimeError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn error_code(&self) -> &'static ErrorCode {
        match self {
            RuntimeError::TypeMismatch { .. } => &RUNTIME_TYPE_ERROR,
            RuntimeError::UndefinedIdentifier { .. } => &UNDEFINED_IDENTIFIER,
            RuntimeError::ArityMismatch { .. } => &WRONG_NUMBER_OF_ARGUMENTS,
            RuntimeError::FunctionNotFound { .. } => &FUNCTION_NOT_FOUND,
            RuntimeError::FunctionTypeNotFound { .. } => &TYPE_NOT_FOUND,
            RuntimeError::FieldNotFound { .. } => &FIELD_NOT_FOUND,
            RuntimeError::UnsupportedOperandType { .. } => &INVALID_OPERATION,
            RuntimeError::UnsupportedOperation { .. } => &UNSUPPORTED_OPERATION,
            RuntimeError::DivisionByZero { .. } => &DIVISION_BY_ZERO_RUNTIME,
            RuntimeError::ForeignCallSetupFailure { .. } => &FOREIGN_CALL_SETUP,
            RuntimeError::ConversionFailure { .. } => &CONVERSION_FAILED,
            RuntimeError::MalformedRecord { .. } => &MALFORMED_RECORD,
            RuntimeError::IndexOutOfBounds { .. } => &INDEX_OUT_OF_BOUNDS,
            RuntimeError::InvalidProgramTables { .. } => &INVALID_PROGRAM_TABLES,
            RuntimeError::RuntimeNotInitialized => &RUNTIME_NOT_INITIALIZED,
        }
    }

    pub fn is_fatal(&self) -> bool {
        !matches!(self, RuntimeError::FieldNotFound { .. })
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            RuntimeError::ArityMismatch { position, .. }
            | RuntimeError::FunctionNotFound { position, .. }
            | RuntimeError::FieldNotFound { position, .. } => Some(*position),
            _ => None,
        }
    }

    fn message_args(&self) -> Vec<String> {
        match self {
            RuntimeError::TypeMismatch { expected, found } => vec![expected.clone(), found.clone()],
            RuntimeError::UndefinedIdentifier { name } => vec![name.clone()],
            RuntimeError::ArityMismatch {
                function,
                arity,
                captured,
                supplied,
                ..
            } => vec![
                function.clone(),
                arity.to_string(),
                captured.to_string(),
                supplied.to_string(),
            ],
            RuntimeError::FunctionNotFound {
                index, table_len, ..
            } => vec![index.to_string(), table_len.to_string()],
            RuntimeError::FunctionTypeNotFound { type_name } => vec![type_name.clone()],
            RuntimeError::FieldNotFound {
                field, constructor, ..
            } => vec![field.clone(), constructor.clone()],
            RuntimeError::UnsupportedOperandType {
                operation,
                type_name,
            } => vec![operation.to_string(), type_name.clone()],
            RuntimeError::UnsupportedOperation {
                kind,
                code,
                type_name,
            } => vec![kind.to_string(), code.to_string(), type_name.clone()],
            RuntimeError::DivisionByZero { type_name } => vec![type_name.clone()],
            RuntimeError::ForeignCallSetupFailure { function, reason } => {
                vec![function.clone(), reason.clone()]
            }
            RuntimeError::ConversionFailure { input, target } => {
                vec![input.clone(), target.to_string()]
            }
            RuntimeError::MalformedRecord { type_name, reason } => {
                vec![type_name.clone(), reason.clone()]
            }
            RuntimeError::IndexOutOfBounds {
                index,
                len,
                collection,
            } => vec![index.to_string(), collection.to_string(), len.to_string()],
            RuntimeError::InvalidProgramTables { reason } => vec![reason.clone()],
            RuntimeError::RuntimeNotInitialized => vec![],
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let args = self.message_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let diag = Diagnostic::from_code(self.error_code(), &args);
        match self.position() {
            Some(position) => diag.with_position(position),
            None => diag,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diag = self.to_diagnostic();
        write!(f, "[{}] {}", diag.code, diag.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Reports a fatal error and terminates the process.
///
/// There is no unwinding or recovery past this point: the compiler is
/// trusted to have type-checked the program, so reaching here is a contract
/// violation in generated code.
pub fn fatal(err: &RuntimeError) -> ! {
    eprint!("{}", err.to_diagnostic().render());
    std::process::exit(1)
}

/// Reports a non-fatal diagnostic and continues.
pub fn warn(err: &RuntimeError) {
    eprint!("{}", err.to_diagnostic().render());
}
