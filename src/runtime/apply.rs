use std::borrow::Cow;

use crate::{
    diagnostics::Position,
    runtime::{
        bootstrap::Runtime,
        closure::Closure,
        error::{RuntimeError, RuntimeResult},
        tables::FunctionEntry,
        value::{Boxed, Value},
    },
};

impl Runtime {
    /// `boxClosure`: partial application of function `function` to `captured`.
    ///
    /// Neither the index nor the captured count is checked here; a closure
    /// capturing more arguments than its function takes fails every `apply`
    /// with `ArityMismatch`.
    pub fn box_closure(&self, function: usize, captured: Vec<Value>) -> Value {
        Value::alloc(Boxed::Closure(Closure::new(function, captured)))
    }

    pub(crate) fn closure_target(&self, closure: &Closure, position: Position) -> RuntimeResult<&FunctionEntry> {
        self.tables()
            .function(closure.function)
            .ok_or(RuntimeError::FunctionNotFound {
                index: closure.function,
                table_len: self.tables().functions().len(),
                position,
            })
    }

    /// `apply`: completes `callee` with `args` and calls its function.
    ///
    /// The declared arity must equal captured plus supplied arguments
    /// exactly. Captured arguments come first.
    pub fn apply(&self, callee: &Value, args: &[Value], position: Position) -> RuntimeResult<Value> {
        let closure = self.unbox_closure(callee)?;
        let function = self.closure_target(closure, position)?;

        let captured = closure.captured.len();
        if function.arity != captured + args.len() {
            return Err(RuntimeError::ArityMismatch {
                function: function.name.clone(),
                arity: function.arity,
                captured,
                supplied: args.len(),
                position,
            });
        }

        let full_args: Cow<'_, [Value]> = if captured == 0 {
            Cow::Borrowed(args)
        } else {
            let mut full = Vec::with_capacity(function.arity);
            full.extend_from_slice(&closure.captured);
            full.extend_from_slice(args);
            Cow::Owned(full)
        };

        self.bridge().call(self, function, &full_args)
    }
}
