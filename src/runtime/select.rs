//! Field selection, constructor discrimination and reference cells.

use std::slice;

use crate::{
    diagnostics::Position,
    runtime::{
        bootstrap::Runtime,
        error::{self, RuntimeError, RuntimeResult},
        tables::Constructor,
        type_id::TypeId,
        value::{Boxed, DataValue, Value},
    },
};

impl Runtime {
    /// Builds a value of user type `type_id` with constructor `tag`.
    pub fn box_data(&self, type_id: TypeId, tag: usize, values: Vec<Value>) -> RuntimeResult<Value> {
        let entry = self.tables().find_type(type_id)?;
        let Some(constructor) = entry.constructors.get(tag) else {
            return Err(RuntimeError::MalformedRecord {
                type_name: entry.name.clone(),
                reason: format!(
                    "tag {} but the type has {} constructors",
                    tag,
                    entry.constructors.len()
                ),
            });
        };
        if constructor.fields.len() != values.len() {
            return Err(RuntimeError::MalformedRecord {
                type_name: entry.name.clone(),
                reason: format!(
                    "constructor `{}` has {} fields but {} values were given",
                    constructor.name,
                    constructor.fields.len(),
                    values.len()
                ),
            });
        }
        let type_index = type_id.user_index().unwrap_or_default();
        Ok(Value::alloc(Boxed::Data(DataValue {
            type_index,
            tag,
            values: values.into_boxed_slice(),
        })))
    }

    /// Constructor metadata of an algebraic value.
    pub fn constructor_of(&self, data: &DataValue) -> RuntimeResult<&Constructor> {
        let entry = self.tables().find_type(TypeId::User(data.type_index))?;
        entry
            .constructors
            .get(data.tag)
            .ok_or_else(|| RuntimeError::MalformedRecord {
                type_name: entry.name.clone(),
                reason: format!("tag {} has no constructor", data.tag),
            })
    }

    /// `select`: field access by name, or method-call sugar.
    ///
    /// - algebraic `receiver` with an `Unknown` `member` naming a field
    ///   returns that field's value;
    /// - a Closure `member` expecting exactly one more argument is applied to
    ///   `receiver`, whatever its type;
    /// - anything else yields the "Unimplemented select" sentinel. Naming a
    ///   missing field also reports a non-fatal diagnostic first.
    pub fn select(&self, receiver: &Value, member: &Value, position: Position) -> RuntimeResult<Value> {
        match (receiver.boxed(), member.boxed()) {
            (Boxed::Data(data), Boxed::Unknown(field)) => {
                let constructor = self.constructor_of(data)?;
                match constructor.field_index(field) {
                    Some(index) => {
                        return data.values.get(index).cloned().ok_or_else(|| {
                            RuntimeError::MalformedRecord {
                                type_name: self.type_name(receiver.type_tag()).to_string(),
                                reason: format!(
                                    "constructor `{}` has {} fields but the value holds {}",
                                    constructor.name,
                                    constructor.fields.len(),
                                    data.values.len()
                                ),
                            }
                        });
                    }
                    None => error::warn(&RuntimeError::FieldNotFound {
                        field: field.to_string(),
                        constructor: constructor.name.clone(),
                        position,
                    }),
                }
            }
            (_, Boxed::Closure(closure)) => {
                let function = self.closure_target(closure, position)?;
                if function.arity.checked_sub(closure.captured.len()) == Some(1) {
                    return self.apply(member, slice::from_ref(receiver), position);
                }
            }
            _ => {}
        }
        Ok(self.interned.unimplemented_select.clone())
    }

    /// `isConstructorNamed`: compares the constructor name with `name` over
    /// the shorter of the two lengths only, so `"Som"` matches `Some`.
    /// Non-algebraic values never match.
    pub fn is_constructor_named(&self, value: &Value, name: &Value) -> RuntimeResult<bool> {
        let Boxed::Data(data) = value.boxed() else {
            return Ok(false);
        };
        let name = self.unbox_str(name)?.as_bytes();
        let actual = self.constructor_of(data)?.name.as_bytes();
        let len = name.len().min(actual.len());
        Ok(actual[..len] == name[..len])
    }

    /// `checkTag`: whether an algebraic value was built with constructor `tag`.
    pub fn check_tag(&self, value: &Value, tag: usize) -> RuntimeResult<bool> {
        Ok(self.unbox_data(value)?.tag == tag)
    }

    /// Current contents of a reference cell.
    pub fn read_ref(&self, cell: &Value) -> RuntimeResult<Value> {
        Ok(self.unbox_ref(cell)?.borrow().clone())
    }

    /// `updateRef`: stores `value` in the cell and returns the previous contents.
    pub fn update_ref(&self, cell: &Value, value: Value) -> RuntimeResult<Value> {
        Ok(self.unbox_ref(cell)?.replace(value))
    }
}
