//! C-ABI entry points called by compiled program code.
//!
//! Values cross the boundary as `*const Boxed`. Every pointer returned by an
//! `rt_*` function carries one owned reference, released with [`rt_release`];
//! pointer arguments are only borrowed for the duration of the call.
//!
//! This is the outermost boundary: a [`RuntimeError`] reaching it is reported
//! on stderr and the process exits with status 1.

use std::{
    cell::OnceCell,
    ffi::{CStr, c_char, c_void},
    rc::Rc,
    slice,
    sync::Arc,
};

use crate::{
    diagnostics::Position,
    runtime::{
        bootstrap::{Runtime, RuntimeConfig},
        builtins::{byte_to_int, int_to_byte},
        error::{RuntimeError, RuntimeResult, fatal},
        tables::{ExternTarget, NativeTarget, ProgramTables},
        type_id::TypeId,
        value::{Boxed, Value},
    },
};

thread_local! {
    static RUNTIME: OnceCell<Rc<Runtime>> = const { OnceCell::new() };
}

/// One function-table entry as laid out by generated code.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RtFunction {
    /// NUL-terminated name, may be null.
    pub name: *const c_char,
    pub arity: i64,
    /// C-ABI function taking `arity` box pointers; see [`crate::runtime::bridge`].
    pub target: *const c_void,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Installs a runtime built in Rust as this thread's runtime.
///
/// Returns `false` when a runtime is already installed; the first one stays.
pub fn install(runtime: Runtime) -> bool {
    RUNTIME.with(|cell| cell.set(Rc::new(runtime)).is_ok())
}

fn current() -> Rc<Runtime> {
    RUNTIME
        .with(|cell| cell.get().cloned())
        .unwrap_or_else(|| fatal(&RuntimeError::RuntimeNotInitialized))
}

/// Runs `f` against the installed runtime, aborting on error.
fn run<T>(f: impl FnOnce(&Runtime) -> RuntimeResult<T>) -> T {
    let runtime = current();
    match f(&runtime) {
        Ok(value) => value,
        Err(err) => fatal(&err),
    }
}

fn owned(value: Value) -> *const Boxed {
    value.into_raw()
}

unsafe fn arg(ptr: *const Boxed) -> Value {
    if ptr.is_null() {
        fatal(&RuntimeError::type_mismatch("a value", "null pointer"));
    }
    unsafe { Value::clone_from_raw(ptr) }
}

unsafe fn args(argc: i64, argv: *const *const Boxed) -> Vec<Value> {
    let len = usize::try_from(argc).unwrap_or(0);
    if len == 0 {
        return Vec::new();
    }
    if argv.is_null() {
        fatal(&RuntimeError::type_mismatch("an argument vector", "null pointer"));
    }
    unsafe { slice::from_raw_parts(argv, len) }
        .iter()
        .map(|&ptr| unsafe { arg(ptr) })
        .collect()
}

unsafe fn utf8<'a>(ptr: *const u8, len: usize) -> &'a str {
    if len == 0 || ptr.is_null() {
        return "";
    }
    let bytes = unsafe { slice::from_raw_parts(ptr, len) };
    std::str::from_utf8(bytes).unwrap_or_else(|_| {
        fatal(&RuntimeError::ConversionFailure {
            input: String::from_utf8_lossy(bytes).into_owned(),
            target: "String",
        })
    })
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

/// `initRuntime`: builds the program tables and the runtime for this thread.
///
/// Later calls are ignored.
///
/// # Safety
/// `functions` must point to `function_count` entries and `types_json` to
/// `types_json_len` bytes (either may be null when its count is zero).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_init_runtime(
    functions: *const RtFunction,
    function_count: usize,
    types_json: *const u8,
    types_json_len: usize,
    verbose: bool,
) {
    if RUNTIME.with(|cell| cell.get().is_some()) {
        return;
    }

    let mut builder = ProgramTables::builder();
    if function_count > 0 && !functions.is_null() {
        for entry in unsafe { slice::from_raw_parts(functions, function_count) } {
            let name = if entry.name.is_null() {
                String::from("<anonymous>")
            } else {
                unsafe { CStr::from_ptr(entry.name) }
                    .to_string_lossy()
                    .into_owned()
            };
            let Ok(arity) = usize::try_from(entry.arity) else {
                fatal(&RuntimeError::InvalidProgramTables {
                    reason: format!("function `{}` has negative arity {}", name, entry.arity),
                });
            };
            builder.add_function(name, arity, NativeTarget::Extern(ExternTarget::new(entry.target)));
        }
    }

    let manifest = unsafe { utf8(types_json, types_json_len) };
    if !manifest.is_empty() {
        if let Err(err) = builder.types_from_json(manifest) {
            fatal(&err.into());
        }
    }
    let tables = builder.build().unwrap_or_else(|err| fatal(&err.into()));

    let mut config = RuntimeConfig::from_env();
    config.verbose |= verbose;
    install(Runtime::with_config(Arc::new(tables), config));
}

/// `initEnvironment`: captures the process arguments.
///
/// # Safety
/// `argv` must point to `argc` NUL-terminated strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_init_environment(argc: i64, argv: *const *const c_char) {
    let len = usize::try_from(argc).unwrap_or(0);
    let args: Vec<String> = if len == 0 || argv.is_null() {
        Vec::new()
    } else {
        unsafe { slice::from_raw_parts(argv, len) }
            .iter()
            .map(|&ptr| {
                if ptr.is_null() {
                    String::new()
                } else {
                    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
                }
            })
            .collect()
    };
    current().init_environment(args);
}

#[unsafe(no_mangle)]
pub extern "C" fn rt_get_args() -> *const Boxed {
    owned(current().get_args())
}

/// Prints allocation counters when the runtime is verbose.
#[unsafe(no_mangle)]
pub extern "C" fn rt_report_stats() {
    current().report_stats();
}

/// Drops one reference obtained from an `rt_*` function. Null is ignored.
///
/// # Safety
/// `value` must be an owned reference returned by this module.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_release(value: *const Boxed) {
    if !value.is_null() {
        drop(unsafe { Value::from_raw(value) });
    }
}

// ---------------------------------------------------------------------------
// Boxing
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn rt_box_int(n: i64) -> *const Boxed {
    owned(current().box_int(n))
}

#[unsafe(no_mangle)]
pub extern "C" fn rt_box_bool(n: i64) -> *const Boxed {
    owned(current().box_bool(n != 0))
}

#[unsafe(no_mangle)]
pub extern "C" fn rt_box_float64(x: f64) -> *const Boxed {
    owned(current().box_float64(x))
}

#[unsafe(no_mangle)]
pub extern "C" fn rt_box_byte(n: i8) -> *const Boxed {
    owned(current().box_byte(n))
}

/// # Safety
/// `bytes` must point to `len` bytes of UTF-8 text.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_make_string(bytes: *const u8, len: usize) -> *const Boxed {
    let text = unsafe { utf8(bytes, len) };
    owned(current().make_string(text))
}

/// Boxes an `Unknown` value naming an unresolved identifier.
///
/// # Safety
/// `bytes` must point to `len` bytes of UTF-8 text.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_box_error(bytes: *const u8, len: usize) -> *const Boxed {
    let name = unsafe { utf8(bytes, len) };
    owned(current().box_error(name))
}

/// # Safety
/// `value` must be a live box pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_unbox_int(value: *const Boxed) -> i64 {
    let value = unsafe { arg(value) };
    run(|rt| rt.unbox_int(&value))
}

/// # Safety
/// `value` must be a live box pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_unbox_float64(value: *const Boxed) -> f64 {
    let value = unsafe { arg(value) };
    run(|rt| rt.unbox_float64(&value))
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// # Safety
/// `lhs` and `rhs` must be live box pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_binary_op(code: i64, lhs: *const Boxed, rhs: *const Boxed) -> *const Boxed {
    let (lhs, rhs) = unsafe { (arg(lhs), arg(rhs)) };
    owned(run(|rt| rt.binary_op_code(code, &lhs, &rhs)))
}

/// # Safety
/// `value` must be a live box pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_unary_op(code: i64, value: *const Boxed) -> *const Boxed {
    let value = unsafe { arg(value) };
    owned(run(|rt| rt.unary_op_code(code, &value)))
}

// ---------------------------------------------------------------------------
// Closures, selection, references
// ---------------------------------------------------------------------------

/// # Safety
/// `argv` must point to `argc` live box pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_box_closure(function: i64, argc: i64, argv: *const *const Boxed) -> *const Boxed {
    let captured = unsafe { args(argc, argv) };
    let runtime = current();
    // A negative index can never resolve; apply reports it as not found.
    let function = usize::try_from(function).unwrap_or(usize::MAX);
    owned(runtime.box_closure(function, captured))
}

/// # Safety
/// `callee` must be a live box pointer and `argv` must point to `argc` of them.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_apply(
    callee: *const Boxed,
    argc: i64,
    argv: *const *const Boxed,
    position: Position,
) -> *const Boxed {
    let callee = unsafe { arg(callee) };
    let args = unsafe { args(argc, argv) };
    owned(run(|rt| rt.apply(&callee, &args, position)))
}

/// # Safety
/// `receiver` and `member` must be live box pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_select(
    receiver: *const Boxed,
    member: *const Boxed,
    position: Position,
) -> *const Boxed {
    let (receiver, member) = unsafe { (arg(receiver), arg(member)) };
    owned(run(|rt| rt.select(&receiver, &member, position)))
}

/// Builds a user value of type `type_index` with constructor `tag`.
///
/// # Safety
/// `argv` must point to `argc` live box pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_box_data(
    type_index: i64,
    tag: i64,
    argc: i64,
    argv: *const *const Boxed,
) -> *const Boxed {
    let values = unsafe { args(argc, argv) };
    owned(run(|rt| {
        let type_id = usize::try_from(type_index).map_or(TypeId::Unknown, TypeId::User);
        let tag = usize::try_from(tag).unwrap_or(usize::MAX);
        rt.box_data(type_id, tag, values)
    }))
}

/// # Safety
/// `value` and `name` must be live box pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_is_constructor_named(value: *const Boxed, name: *const Boxed) -> i64 {
    let (value, name) = unsafe { (arg(value), arg(name)) };
    i64::from(run(|rt| rt.is_constructor_named(&value, &name)))
}

/// # Safety
/// `value` must be a live box pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_check_tag(value: *const Boxed, tag: i64) -> i64 {
    let value = unsafe { arg(value) };
    let matched = run(|rt| match usize::try_from(tag) {
        Ok(tag) => rt.check_tag(&value, tag),
        Err(_) => rt.unbox_data(&value).map(|_| false),
    });
    i64::from(matched)
}

/// # Safety
/// `value` must be a live box pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_box_ref(value: *const Boxed) -> *const Boxed {
    let value = unsafe { arg(value) };
    owned(current().box_ref(value))
}

/// # Safety
/// `cell` and `value` must be live box pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_update_ref(cell: *const Boxed, value: *const Boxed) -> *const Boxed {
    let (cell, value) = unsafe { (arg(cell), arg(value)) };
    owned(run(|rt| rt.update_ref(&cell, value)))
}

// ---------------------------------------------------------------------------
// Collections and text
// ---------------------------------------------------------------------------

/// # Safety
/// `argv` must point to `argc` live box pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_box_array(argc: i64, argv: *const *const Boxed) -> *const Boxed {
    let elements = unsafe { args(argc, argv) };
    owned(current().box_array(elements))
}

/// # Safety
/// `value` must be a live box pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_to_string(value: *const Boxed) -> *const Boxed {
    let value = unsafe { arg(value) };
    owned(run(|rt| rt.to_string(&value)))
}

/// # Safety
/// `strings` must be a live box pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_concat(strings: *const Boxed) -> *const Boxed {
    let strings = unsafe { arg(strings) };
    owned(run(|rt| rt.concat(&strings)))
}

/// # Safety
/// `text` must be a live box pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rt_to_int(text: *const Boxed) -> i64 {
    let text = unsafe { arg(text) };
    run(|rt| rt.to_int(&text))
}

#[unsafe(no_mangle)]
pub extern "C" fn rt_int_to_byte(n: i64) -> i8 {
    int_to_byte(n)
}

#[unsafe(no_mangle)]
pub extern "C" fn rt_byte_to_int(byte: i8) -> i64 {
    byte_to_int(byte)
}
