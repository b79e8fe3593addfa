//! Runtime value model and the primitives compiled programs call into.
//!
//! Every value crossing into or out of generated code is a [`value::Value`]:
//! a shared handle to an immutable [`value::Boxed`] payload. All operations
//! hang off a single [`bootstrap::Runtime`] context which owns the program
//! tables, the interned singletons and the process environment.
//!
//! # Reclamation
//! Boxes are reference counted. Everything except a reference cell is
//! immutable after construction, so value graphs are acyclic unless a program
//! stores a reference cell inside itself (directly or through an array or
//! record). Such a cycle is never reclaimed and `to_string` on it does not
//! terminate; generated code must not build one.

pub mod alloc_stats;
pub mod apply;
pub mod bootstrap;
pub mod boxing;
pub mod bridge;
pub mod builtins;
pub mod closure;
pub mod error;
pub mod interned;
pub mod ops;
pub mod select;
pub mod tables;
pub mod type_id;
pub mod value;

pub use bootstrap::{Environment, Runtime, RuntimeConfig};
pub use bridge::{CallBridge, NativeBridge};
pub use error::{RuntimeError, RuntimeResult};
pub use ops::{BinaryOp, UnaryOp};
pub use tables::{
    Constructor, ExternTarget, FunctionEntry, NativeFn, NativeTarget, ProgramTables,
    ProgramTablesBuilder, TablesError, TypeEntry,
};
pub use type_id::TypeId;
pub use value::{Boxed, DataValue, Resource, ResourceKind, Value};

#[cfg(test)]
mod select_test;
#[cfg(test)]
mod test_support;
