//! Boxing constructors and typed unboxers.
//!
//! Int, Bool, Double, Unit and empty-String values must be boxed through the
//! dedicated constructors here, which hand out the interned singletons.

use std::{any::Any, cell::RefCell, rc::Rc};

use crate::runtime::{
    bootstrap::Runtime,
    closure::Closure,
    error::{RuntimeError, RuntimeResult},
    type_id::TypeId,
    value::{Boxed, DataValue, Resource, ResourceKind, Value},
};

impl Runtime {
    /// Generic `box`: allocates a box for `payload`, routing interned values
    /// to their singletons.
    ///
    /// Records go through [`Runtime::box_data`], so a payload whose tag or
    /// field count disagrees with the type table is `MalformedRecord`.
    pub fn box_value(&self, payload: Boxed) -> RuntimeResult<Value> {
        let value = match payload {
            Boxed::Unit => self.box_unit(),
            Boxed::Bool(flag) => self.box_bool(flag),
            Boxed::Int(n) => self.box_int(n),
            Boxed::Double(x) => self.box_float64(x),
            Boxed::String(s) if s.is_empty() => self.interned.empty_string.clone(),
            Boxed::Data(data) => {
                return self.box_data(TypeId::User(data.type_index), data.tag, data.values.into_vec());
            }
            other => Value::alloc(other),
        };
        Ok(value)
    }

    pub fn box_unit(&self) -> Value {
        self.interned.unit.clone()
    }

    pub fn box_int(&self, n: i64) -> Value {
        match self.interned.small_int(n) {
            Some(value) => value.clone(),
            None => Value::alloc(Boxed::Int(n)),
        }
    }

    /// `-0.0 == 0.0`, so both map to the zero singleton.
    pub fn box_float64(&self, x: f64) -> Value {
        if x == 0.0 {
            self.interned.zero_double.clone()
        } else {
            Value::alloc(Boxed::Double(x))
        }
    }

    pub fn box_bool(&self, flag: bool) -> Value {
        self.interned.bool(flag).clone()
    }

    pub fn box_byte(&self, byte: i8) -> Value {
        Value::alloc(Boxed::Byte(byte))
    }

    /// Builds an `Unknown`-tagged value carrying a diagnostic name.
    pub fn box_error(&self, name: &str) -> Value {
        Value::alloc(Boxed::Unknown(name.into()))
    }

    pub fn box_resource(&self, kind: ResourceKind, payload: Rc<dyn Any>) -> Value {
        Value::alloc(Boxed::Resource(Resource { kind, payload }))
    }

    pub fn box_ref(&self, value: Value) -> Value {
        Value::alloc(Boxed::Ref(RefCell::new(value)))
    }

    /// Error for `value` not having type `expected`.
    ///
    /// Dereferencing an `Unknown` value reports the identifier it carries.
    pub(crate) fn mismatch(&self, expected: &str, value: &Value) -> RuntimeError {
        match value.boxed() {
            Boxed::Unknown(name) => RuntimeError::UndefinedIdentifier {
                name: name.to_string(),
            },
            _ => RuntimeError::type_mismatch(expected, self.type_name(value.type_tag())),
        }
    }

    /// Generic `unbox`: returns the payload when `value` has type `expected`.
    pub fn unbox<'v>(&self, expected: TypeId, value: &'v Value) -> RuntimeResult<&'v Boxed> {
        if value.type_tag() == expected {
            Ok(value.boxed())
        } else {
            Err(self.mismatch(self.type_name(expected), value))
        }
    }

    pub fn unbox_int(&self, value: &Value) -> RuntimeResult<i64> {
        match value.boxed() {
            Boxed::Int(n) => Ok(*n),
            _ => Err(self.mismatch("Int", value)),
        }
    }

    pub fn unbox_float64(&self, value: &Value) -> RuntimeResult<f64> {
        match value.boxed() {
            Boxed::Double(x) => Ok(*x),
            _ => Err(self.mismatch("Double", value)),
        }
    }

    pub fn unbox_bool(&self, value: &Value) -> RuntimeResult<bool> {
        match value.boxed() {
            Boxed::Bool(flag) => Ok(*flag),
            _ => Err(self.mismatch("Bool", value)),
        }
    }

    pub fn unbox_byte(&self, value: &Value) -> RuntimeResult<i8> {
        match value.boxed() {
            Boxed::Byte(byte) => Ok(*byte),
            _ => Err(self.mismatch("Byte", value)),
        }
    }

    pub fn unbox_str<'v>(&self, value: &'v Value) -> RuntimeResult<&'v str> {
        match value.boxed() {
            Boxed::String(s) => Ok(s),
            _ => Err(self.mismatch("String", value)),
        }
    }

    pub fn unbox_array<'v>(&self, value: &'v Value) -> RuntimeResult<&'v [Value]> {
        match value.boxed() {
            Boxed::Array(elements) => Ok(elements),
            _ => Err(self.mismatch("Array", value)),
        }
    }

    pub fn unbox_byte_array<'v>(&self, value: &'v Value) -> RuntimeResult<&'v [u8]> {
        match value.boxed() {
            Boxed::ByteArray(bytes) => Ok(bytes),
            _ => Err(self.mismatch("ByteArray", value)),
        }
    }

    pub fn unbox_closure<'v>(&self, value: &'v Value) -> RuntimeResult<&'v Closure> {
        match value.boxed() {
            Boxed::Closure(closure) => Ok(closure),
            _ => Err(self.mismatch("Closure", value)),
        }
    }

    pub fn unbox_ref<'v>(&self, value: &'v Value) -> RuntimeResult<&'v RefCell<Value>> {
        match value.boxed() {
            Boxed::Ref(cell) => Ok(cell),
            _ => Err(self.mismatch("Ref", value)),
        }
    }

    /// Unboxes any user algebraic value.
    pub fn unbox_data<'v>(&self, value: &'v Value) -> RuntimeResult<&'v DataValue> {
        match value.boxed() {
            Boxed::Data(data) => Ok(data),
            _ => Err(self.mismatch("algebraic value", value)),
        }
    }

    /// Unboxes a host resource of the given kind and payload type.
    pub fn unbox_resource<T: Any>(&self, kind: ResourceKind, value: &Value) -> RuntimeResult<Rc<T>> {
        let expected = match kind {
            ResourceKind::FileHandle => "FileHandle",
            ResourceKind::Pattern => "Pattern",
        };
        match value.boxed() {
            Boxed::Resource(resource) if resource.kind == kind => resource
                .payload
                .clone()
                .downcast::<T>()
                .map_err(|_| RuntimeError::type_mismatch(expected, "foreign resource payload")),
            _ => Err(self.mismatch(expected, value)),
        }
    }
}
