use crate::runtime::{
    bootstrap::Runtime,
    error::{RuntimeError, RuntimeResult},
    value::{Boxed, Value},
};

fn index_in(index: i64, len: usize, collection: &'static str) -> RuntimeResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(RuntimeError::IndexOutOfBounds {
            index,
            len,
            collection,
        })
}

impl Runtime {
    /// `createArray`: element storage of a fixed length, filled with Unit
    /// until generated code stores the real elements and boxes it.
    pub fn create_array(&self, len: usize) -> Vec<Value> {
        vec![self.box_unit(); len]
    }

    /// `boxArray`: the length is fixed from here on.
    pub fn box_array(&self, elements: Vec<Value>) -> Value {
        Value::alloc(Boxed::Array(elements.into_boxed_slice()))
    }

    pub fn array_length(&self, array: &Value) -> RuntimeResult<usize> {
        Ok(self.unbox_array(array)?.len())
    }

    pub fn array_get(&self, array: &Value, index: i64) -> RuntimeResult<Value> {
        let elements = self.unbox_array(array)?;
        let index = index_in(index, elements.len(), "Array")?;
        Ok(elements[index].clone())
    }

    pub fn box_byte_array(&self, bytes: Vec<u8>) -> Value {
        Value::alloc(Boxed::ByteArray(bytes.into_boxed_slice()))
    }

    pub fn byte_array_length(&self, array: &Value) -> RuntimeResult<usize> {
        Ok(self.unbox_byte_array(array)?.len())
    }

    /// Bytes are signed when read back as Byte values.
    pub fn byte_array_get(&self, array: &Value, index: i64) -> RuntimeResult<Value> {
        let bytes = self.unbox_byte_array(array)?;
        let index = index_in(index, bytes.len(), "ByteArray")?;
        Ok(self.box_byte(bytes[index] as i8))
    }
}
