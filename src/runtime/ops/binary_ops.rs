use crate::runtime::{
    bootstrap::Runtime,
    error::{RuntimeError, RuntimeResult},
    value::{Boxed, Value},
};

use super::BinaryOp;

impl Runtime {
    /// Int and Byte wrap on overflow; division by zero is an error for both.
    /// Double follows IEEE-754.
    pub(super) fn execute_arithmetic(
        &self,
        op: BinaryOp,
        lhs: &Value,
        rhs: &Value,
    ) -> RuntimeResult<Value> {
        match (lhs.boxed(), rhs.boxed()) {
            (Boxed::Int(l), Boxed::Int(r)) => {
                if *r == 0 && op == BinaryOp::Div {
                    return Err(RuntimeError::DivisionByZero {
                        type_name: "Int".to_string(),
                    });
                }
                let result = match op {
                    BinaryOp::Add => l.wrapping_add(*r),
                    BinaryOp::Sub => l.wrapping_sub(*r),
                    BinaryOp::Mul => l.wrapping_mul(*r),
                    BinaryOp::Div => l.wrapping_div(*r),
                    _ => return Err(self.invalid_operands(op, lhs)),
                };
                Ok(self.box_int(result))
            }
            (Boxed::Byte(l), Boxed::Byte(r)) => {
                if *r == 0 && op == BinaryOp::Div {
                    return Err(RuntimeError::DivisionByZero {
                        type_name: "Byte".to_string(),
                    });
                }
                let result = match op {
                    BinaryOp::Add => l.wrapping_add(*r),
                    BinaryOp::Sub => l.wrapping_sub(*r),
                    BinaryOp::Mul => l.wrapping_mul(*r),
                    BinaryOp::Div => l.wrapping_div(*r),
                    _ => return Err(self.invalid_operands(op, lhs)),
                };
                Ok(self.box_byte(result))
            }
            (Boxed::Double(l), Boxed::Double(r)) => {
                let result = match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    _ => return Err(self.invalid_operands(op, lhs)),
                };
                Ok(self.box_float64(result))
            }
            _ => Err(self.invalid_operands(op, lhs)),
        }
    }

    pub(super) fn invalid_operands(&self, op: BinaryOp, operand: &Value) -> RuntimeError {
        RuntimeError::UnsupportedOperandType {
            operation: op.verb(),
            type_name: self.type_name(operand.type_tag()).to_string(),
        }
    }
}
