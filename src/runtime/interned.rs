use crate::runtime::value::{Boxed, Value};

/// Small integers in `0..SMALL_INT_CACHE_SIZE` are interned.
pub const SMALL_INT_CACHE_SIZE: i64 = 100;

pub(crate) const UNIMPLEMENTED_SELECT: &str = "Unimplemented select";

/// Canonical boxes shared by every request for the same value.
///
/// Built once per [`Runtime`](crate::runtime::Runtime) before any user code runs.
#[derive(Debug)]
pub struct Interned {
    small_ints: Box<[Value]>,
    pub(crate) unit: Value,
    pub(crate) true_value: Value,
    pub(crate) false_value: Value,
    pub(crate) zero_double: Value,
    pub(crate) empty_string: Value,
    /// `"()"`, the rendering of Unit.
    pub(crate) unit_string: Value,
    pub(crate) unimplemented_select: Value,
}

impl Interned {
    pub fn new() -> Self {
        let small_ints = (0..SMALL_INT_CACHE_SIZE)
            .map(|n| Value::interned(Boxed::Int(n)))
            .collect();

        Self {
            small_ints,
            unit: Value::interned(Boxed::Unit),
            true_value: Value::interned(Boxed::Bool(true)),
            false_value: Value::interned(Boxed::Bool(false)),
            zero_double: Value::interned(Boxed::Double(0.0)),
            empty_string: Value::interned(Boxed::String("".into())),
            unit_string: Value::interned(Boxed::String("()".into())),
            unimplemented_select: Value::interned(Boxed::Unknown(UNIMPLEMENTED_SELECT.into())),
        }
    }

    pub fn small_int(&self, n: i64) -> Option<&Value> {
        usize::try_from(n).ok().and_then(|i| self.small_ints.get(i))
    }

    pub fn bool(&self, flag: bool) -> &Value {
        if flag { &self.true_value } else { &self.false_value }
    }
}

impl Default for Interned {
    fn default() -> Self {
        Self::new()
    }
}
