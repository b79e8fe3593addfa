use crate::runtime::{
    bootstrap::Runtime,
    error::RuntimeResult,
    value::{Boxed, Value},
};

use super::BinaryOp;

fn compare<T: PartialOrd>(op: BinaryOp, l: T, r: T) -> Option<bool> {
    let result = match op {
        BinaryOp::Eq => l == r,
        BinaryOp::Ne => l != r,
        BinaryOp::Lt => l < r,
        BinaryOp::Le => l <= r,
        BinaryOp::Ge => l >= r,
        BinaryOp::Gt => l > r,
        _ => return None,
    };
    Some(result)
}

impl Runtime {
    /// Comparisons are defined for Bool, Int, Byte and Double and produce
    /// one of the two Bool singletons.
    pub(super) fn execute_comparison(
        &self,
        op: BinaryOp,
        lhs: &Value,
        rhs: &Value,
    ) -> RuntimeResult<Value> {
        let result = match (lhs.boxed(), rhs.boxed()) {
            (Boxed::Bool(l), Boxed::Bool(r)) => compare(op, l, r),
            (Boxed::Int(l), Boxed::Int(r)) => compare(op, l, r),
            (Boxed::Byte(l), Boxed::Byte(r)) => compare(op, l, r),
            (Boxed::Double(l), Boxed::Double(r)) => compare(op, l, r),
            _ => None,
        };
        match result {
            Some(flag) => Ok(self.box_bool(flag)),
            None => Err(self.invalid_operands(op, lhs)),
        }
    }
}
