//! Collections, text and conversion primitives.

mod array_ops;
mod conversion_ops;
mod string_ops;

pub use conversion_ops::{byte_to_int, int_to_byte};
