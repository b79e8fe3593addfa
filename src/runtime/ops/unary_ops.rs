use crate::runtime::{
    bootstrap::Runtime,
    error::{RuntimeError, RuntimeResult},
    value::{Boxed, Value},
};

use super::UnaryOp;

impl Runtime {
    /// `unaryOp`: negation of Int (wrapping) and Double.
    pub fn unary_op(&self, op: UnaryOp, value: &Value) -> RuntimeResult<Value> {
        match (op, value.boxed()) {
            (UnaryOp::Neg, Boxed::Int(n)) => Ok(self.box_int(n.wrapping_neg())),
            (UnaryOp::Neg, Boxed::Double(x)) => Ok(self.box_float64(-x)),
            (UnaryOp::Neg, Boxed::Unknown(name)) => Err(RuntimeError::UndefinedIdentifier {
                name: name.to_string(),
            }),
            _ => Err(RuntimeError::UnsupportedOperation {
                kind: "unary",
                code: op.code(),
                type_name: self.type_name(value.type_tag()).to_string(),
            }),
        }
    }
}
