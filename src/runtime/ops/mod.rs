//! Arithmetic and comparison dispatch over boxed values.

use crate::runtime::{
    bootstrap::Runtime,
    error::{RuntimeError, RuntimeResult},
    value::Value,
};

mod binary_ops;
mod comparison_ops;
mod unary_ops;

#[cfg(test)]
mod comparison_ops_test;
#[cfg(test)]
mod unary_ops_test;

/// Binary operator codes as emitted by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Ge,
    Gt,
}

impl BinaryOp {
    pub fn code(self) -> i64 {
        match self {
            BinaryOp::Add => 10,
            BinaryOp::Sub => 11,
            BinaryOp::Mul => 12,
            BinaryOp::Div => 13,
            BinaryOp::Eq => 42,
            BinaryOp::Ne => 43,
            BinaryOp::Lt => 44,
            BinaryOp::Le => 45,
            BinaryOp::Ge => 46,
            BinaryOp::Gt => 47,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        let op = match code {
            10 => BinaryOp::Add,
            11 => BinaryOp::Sub,
            12 => BinaryOp::Mul,
            13 => BinaryOp::Div,
            42 => BinaryOp::Eq,
            43 => BinaryOp::Ne,
            44 => BinaryOp::Lt,
            45 => BinaryOp::Le,
            46 => BinaryOp::Ge,
            47 => BinaryOp::Gt,
            _ => return None,
        };
        Some(op)
    }

    pub fn is_comparison(self) -> bool {
        !matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div
        )
    }

    /// Verb used in diagnostics: "Cannot add String values."
    pub fn verb(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "subtract",
            BinaryOp::Mul => "multiply",
            BinaryOp::Div => "divide",
            _ => "compare",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

impl UnaryOp {
    pub fn code(self) -> i64 {
        match self {
            UnaryOp::Neg => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(UnaryOp::Neg),
            _ => None,
        }
    }
}

impl Runtime {
    /// `binaryOp`: both operands must have the same type.
    pub fn binary_op(&self, op: BinaryOp, lhs: &Value, rhs: &Value) -> RuntimeResult<Value> {
        for operand in [lhs, rhs] {
            if operand.is_unknown() {
                return Err(self.mismatch("a defined value", operand));
            }
        }
        if lhs.type_tag() != rhs.type_tag() {
            return Err(RuntimeError::type_mismatch(
                self.type_name(lhs.type_tag()),
                self.type_name(rhs.type_tag()),
            ));
        }
        if op.is_comparison() {
            self.execute_comparison(op, lhs, rhs)
        } else {
            self.execute_arithmetic(op, lhs, rhs)
        }
    }

    /// `binaryOp` addressed by raw compiler opcode.
    pub fn binary_op_code(&self, code: i64, lhs: &Value, rhs: &Value) -> RuntimeResult<Value> {
        match BinaryOp::from_code(code) {
            Some(op) => self.binary_op(op, lhs, rhs),
            None => Err(RuntimeError::UnsupportedOperation {
                kind: "binary",
                code,
                type_name: self.type_name(lhs.type_tag()).to_string(),
            }),
        }
    }

    /// `unaryOp` addressed by raw compiler opcode.
    pub fn unary_op_code(&self, code: i64, value: &Value) -> RuntimeResult<Value> {
        match UnaryOp::from_code(code) {
            Some(op) => self.unary_op(op, value),
            None => Err(RuntimeError::UnsupportedOperation {
                kind: "unary",
                code,
                type_name: self.type_name(value.type_tag()).to_string(),
            }),
        }
    }
}
