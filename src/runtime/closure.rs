use crate::runtime::value::Value;

/// Partial application of a function-table entry.
#[derive(Debug, Clone)]
pub struct Closure {
    /// Index into the function table.
    pub function: usize,
    /// Arguments supplied at closure creation; they precede call-site arguments.
    pub captured: Vec<Value>,
}

impl Closure {
    pub fn new(function: usize, captured: Vec<Value>) -> Self {
        Self { function, captured }
    }
}
