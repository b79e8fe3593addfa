//! The capability `apply` uses to perform a call once arguments are assembled.
//!
//! Rust targets are called directly. Extern targets are C-ABI functions
//! taking one `*const Boxed` per declared parameter and returning a
//! `*const Boxed`:
//!
//! - argument pointers are borrowed for the duration of the call;
//! - the returned pointer carries one owned reference (as produced by
//!   [`Value::into_raw`]) which the bridge takes over;
//! - a null return is reported as a failed call.

use std::{mem, ptr};

use crate::runtime::{
    bootstrap::Runtime,
    error::{RuntimeError, RuntimeResult},
    tables::{ExternTarget, FunctionEntry, NativeTarget},
    value::{Boxed, Value},
};

/// Largest arity the extern trampoline can call.
pub const MAX_EXTERN_ARITY: usize = 8;

/// Performs a synchronous call of a table function with a complete argument list.
pub trait CallBridge {
    fn call(&self, runtime: &Runtime, function: &FunctionEntry, args: &[Value]) -> RuntimeResult<Value>;
}

/// Default bridge: direct calls for Rust targets, C calling convention for
/// extern targets.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBridge;

impl CallBridge for NativeBridge {
    fn call(&self, runtime: &Runtime, function: &FunctionEntry, args: &[Value]) -> RuntimeResult<Value> {
        if args.len() != function.arity {
            return Err(setup_failure(
                function,
                format!(
                    "described with {} parameters but given {} argument slots",
                    function.arity,
                    args.len()
                ),
            ));
        }
        match function.target {
            NativeTarget::Rust(func) => func(runtime, args),
            NativeTarget::Extern(target) => call_extern(function, target, args),
        }
    }
}

fn setup_failure(function: &FunctionEntry, reason: impl Into<String>) -> RuntimeError {
    RuntimeError::ForeignCallSetupFailure {
        function: function.name.clone(),
        reason: reason.into(),
    }
}

fn call_extern(function: &FunctionEntry, target: ExternTarget, args: &[Value]) -> RuntimeResult<Value> {
    if target.is_null() {
        return Err(setup_failure(function, "native target is null"));
    }
    if args.len() > MAX_EXTERN_ARITY {
        return Err(setup_failure(
            function,
            format!(
                "{} parameters exceed the supported maximum of {}",
                args.len(),
                MAX_EXTERN_ARITY
            ),
        ));
    }

    let argv: Vec<*const Boxed> = args.iter().map(Value::as_ptr).collect();
    // SAFETY: the table promises `target` is a C-ABI function of exactly
    // `function.arity` box-pointer parameters, checked against `argv` above.
    let result = unsafe { invoke(target.as_ptr(), &argv) };
    if result.is_null() {
        return Err(setup_failure(function, "native target returned no value"));
    }
    // SAFETY: extern targets return an owned reference.
    Ok(unsafe { Value::from_raw(result) })
}

type Arg = *const Boxed;
type Fn0 = unsafe extern "C" fn() -> Arg;
type Fn1 = unsafe extern "C" fn(Arg) -> Arg;
type Fn2 = unsafe extern "C" fn(Arg, Arg) -> Arg;
type Fn3 = unsafe extern "C" fn(Arg, Arg, Arg) -> Arg;
type Fn4 = unsafe extern "C" fn(Arg, Arg, Arg, Arg) -> Arg;
type Fn5 = unsafe extern "C" fn(Arg, Arg, Arg, Arg, Arg) -> Arg;
type Fn6 = unsafe extern "C" fn(Arg, Arg, Arg, Arg, Arg, Arg) -> Arg;
type Fn7 = unsafe extern "C" fn(Arg, Arg, Arg, Arg, Arg, Arg, Arg) -> Arg;
type Fn8 = unsafe extern "C" fn(Arg, Arg, Arg, Arg, Arg, Arg, Arg, Arg) -> Arg;

/// Calls `code` with the pointer-sized arguments in `a`.
///
/// # Safety
/// `code` must be a C-ABI function taking exactly `a.len()` pointer arguments
/// and returning a pointer.
unsafe fn invoke(code: *const (), a: &[Arg]) -> Arg {
    unsafe {
        match a.len() {
            0 => mem::transmute::<*const (), Fn0>(code)(),
            1 => mem::transmute::<*const (), Fn1>(code)(a[0]),
            2 => mem::transmute::<*const (), Fn2>(code)(a[0], a[1]),
            3 => mem::transmute::<*const (), Fn3>(code)(a[0], a[1], a[2]),
            4 => mem::transmute::<*const (), Fn4>(code)(a[0], a[1], a[2], a[3]),
            5 => mem::transmute::<*const (), Fn5>(code)(a[0], a[1], a[2], a[3], a[4]),
            6 => mem::transmute::<*const (), Fn6>(code)(a[0], a[1], a[2], a[3], a[4], a[5]),
            7 => mem::transmute::<*const (), Fn7>(code)(a[0], a[1], a[2], a[3], a[4], a[5], a[6]),
            8 => mem::transmute::<*const (), Fn8>(code)(
                a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7],
            ),
            _ => ptr::null(),
        }
    }
}
