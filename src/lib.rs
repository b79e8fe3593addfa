pub mod abi;
pub mod diagnostics;
pub mod runtime;
