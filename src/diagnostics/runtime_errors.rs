use super::error_code::{ErrorCode, ErrorType};

pub const WRONG_NUMBER_OF_ARGUMENTS: ErrorCode = ErrorCode {
    code: "E1000",
    title: "WRONG NUMBER OF ARGUMENTS",
    error_type: ErrorType::Runtime,
    message: "Function `{}` takes {} params, but got {} captured and {} supplied.",
    hint: Some("Closures support a single partial application step."),
};

pub const FUNCTION_NOT_FOUND: ErrorCode = ErrorCode {
    code: "E1002",
    title: "FUNCTION NOT FOUND",
    error_type: ErrorType::Runtime,
    message: "No function with id {}, the function table has {} entries.",
    hint: Some("The function table does not match the compiled program."),
};

pub const RUNTIME_TYPE_ERROR: ErrorCode = ErrorCode {
    code: "E1004",
    title: "TYPE ERROR",
    error_type: ErrorType::Runtime,
    message: "Expected {}, got {}.",
    hint: None,
};

pub const DIVISION_BY_ZERO_RUNTIME: ErrorCode = ErrorCode {
    code: "E1008",
    title: "DIVISION BY ZERO",
    error_type: ErrorType::Runtime,
    message: "Cannot divide {} by zero.",
    hint: Some("Check divisor is non-zero before division."),
};

pub const INVALID_OPERATION: ErrorCode = ErrorCode {
    code: "E1009",
    title: "INVALID OPERATION",
    error_type: ErrorType::Runtime,
    message: "Cannot {} {} values.",
    hint: None,
};

pub const UNSUPPORTED_OPERATION: ErrorCode = ErrorCode {
    code: "E1010",
    title: "UNSUPPORTED OPERATION",
    error_type: ErrorType::Runtime,
    message: "Unsupported {} operation {} on {}.",
    hint: None,
};

pub const UNDEFINED_IDENTIFIER: ErrorCode = ErrorCode {
    code: "E1011",
    title: "UNDEFINED IDENTIFIER",
    error_type: ErrorType::Runtime,
    message: "Undefined identifier `{}`.",
    hint: None,
};

pub const TYPE_NOT_FOUND: ErrorCode = ErrorCode {
    code: "E1012",
    title: "TYPE NOT FOUND",
    error_type: ErrorType::Runtime,
    message: "Couldn't find type `{}` in the type table.",
    hint: Some("The type table does not match the compiled program."),
};

pub const FIELD_NOT_FOUND: ErrorCode = ErrorCode {
    code: "E1013",
    title: "FIELD NOT FOUND",
    error_type: ErrorType::Warning,
    message: "Couldn't find field `{}` on constructor `{}`.",
    hint: None,
};

pub const FOREIGN_CALL_SETUP: ErrorCode = ErrorCode {
    code: "E1014",
    title: "FOREIGN CALL SETUP FAILED",
    error_type: ErrorType::Runtime,
    message: "Cannot call function `{}`: {}.",
    hint: None,
};

pub const CONVERSION_FAILED: ErrorCode = ErrorCode {
    code: "E1015",
    title: "CONVERSION FAILED",
    error_type: ErrorType::Runtime,
    message: "Couldn't convert `{}` to {}.",
    hint: None,
};

pub const MALFORMED_RECORD: ErrorCode = ErrorCode {
    code: "E1016",
    title: "MALFORMED RECORD",
    error_type: ErrorType::Runtime,
    message: "Cannot build a `{}` value: {}.",
    hint: None,
};

pub const INDEX_OUT_OF_BOUNDS: ErrorCode = ErrorCode {
    code: "E1017",
    title: "INDEX OUT OF BOUNDS",
    error_type: ErrorType::Runtime,
    message: "Index {} is out of bounds for {} of length {}.",
    hint: None,
};

pub const INVALID_PROGRAM_TABLES: ErrorCode = ErrorCode {
    code: "E1018",
    title: "INVALID PROGRAM TABLES",
    error_type: ErrorType::Runtime,
    message: "Program tables are invalid: {}.",
    hint: None,
};

pub const RUNTIME_NOT_INITIALIZED: ErrorCode = ErrorCode {
    code: "E1019",
    title: "RUNTIME NOT INITIALIZED",
    error_type: ErrorType::Runtime,
    message: "A runtime primitive was called before the runtime was initialized.",
    hint: Some("Call rt_init_runtime once before any other entry point."),
};
