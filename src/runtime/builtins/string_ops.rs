use crate::runtime::{
    bootstrap::Runtime,
    error::{RuntimeError, RuntimeResult},
    value::{Boxed, Value},
};

/// Width 12, 9 decimals, with NaN spelled `nan` like C's `%12.9f`.
fn format_double(x: f64) -> String {
    if x.is_nan() {
        format!("{:>12}", "nan")
    } else {
        format!("{:12.9}", x)
    }
}

impl Runtime {
    /// Boxes a copy of `text`; the empty string is the interned singleton.
    pub fn make_string(&self, text: &str) -> Value {
        if text.is_empty() {
            self.interned.empty_string.clone()
        } else {
            Value::alloc(Boxed::String(text.into()))
        }
    }

    pub fn box_string(&self, text: String) -> Value {
        if text.is_empty() {
            self.interned.empty_string.clone()
        } else {
            Value::alloc(Boxed::String(text.into_boxed_str()))
        }
    }

    /// `toString`: total over every value kind except `Unknown` and host
    /// resources.
    ///
    /// Strings are returned as-is, Unit renders as the shared `"()"`, and a
    /// reference cell renders as whatever it currently holds.
    pub fn to_string(&self, value: &Value) -> RuntimeResult<Value> {
        match value.boxed() {
            Boxed::String(_) => Ok(value.clone()),
            Boxed::Unit => Ok(self.interned.unit_string.clone()),
            Boxed::Ref(cell) => {
                let current = cell.borrow().clone();
                self.to_string(&current)
            }
            _ => Ok(self.box_string(self.render(value)?)),
        }
    }

    /// Rendering of [`Runtime::to_string`] as a Rust string.
    pub fn render(&self, value: &Value) -> RuntimeResult<String> {
        let mut out = String::new();
        self.write_value(&mut out, value)?;
        Ok(out)
    }

    /// Renders `values` separated by `", "` between `start` and `end`.
    pub fn join_values(&self, values: &[Value], start: &str, end: &str) -> RuntimeResult<Value> {
        let mut out = String::new();
        self.write_joined(&mut out, values, start, end)?;
        Ok(self.box_string(out))
    }

    fn write_joined(&self, out: &mut String, values: &[Value], start: &str, end: &str) -> RuntimeResult<()> {
        out.push_str(start);
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_value(out, value)?;
        }
        out.push_str(end);
        Ok(())
    }

    fn write_value(&self, out: &mut String, value: &Value) -> RuntimeResult<()> {
        match value.boxed() {
            Boxed::Unit => out.push_str("()"),
            Boxed::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
            Boxed::Int(n) => out.push_str(&n.to_string()),
            Boxed::Byte(byte) => out.push_str(&byte.to_string()),
            Boxed::Double(x) => out.push_str(&format_double(*x)),
            Boxed::String(s) => out.push_str(s),
            Boxed::Closure(_) => out.push_str("<func>"),
            Boxed::Array(elements) => self.write_joined(out, elements, "[", "]")?,
            Boxed::ByteArray(bytes) => {
                out.push('[');
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&(*byte as i8).to_string());
                }
                out.push(']');
            }
            Boxed::Ref(cell) => self.write_value(out, &cell.borrow())?,
            Boxed::Unknown(name) => {
                return Err(RuntimeError::UndefinedIdentifier {
                    name: name.to_string(),
                });
            }
            Boxed::Resource(_) => {
                return Err(RuntimeError::UnsupportedOperandType {
                    operation: "stringify",
                    type_name: self.type_name(value.type_tag()).to_string(),
                });
            }
            Boxed::Data(data) => {
                let constructor = self.constructor_of(data)?;
                out.push_str(&constructor.name);
                if !constructor.fields.is_empty() {
                    self.write_joined(out, &data.values, "(", ")")?;
                }
            }
        }
        Ok(())
    }

    /// `concat`: joins an Array of String with no separator.
    ///
    /// The result buffer is sized to the exact total length up front.
    pub fn concat(&self, strings: &Value) -> RuntimeResult<Value> {
        let elements = self.unbox_array(strings)?;
        if elements.is_empty() {
            return Ok(self.interned.empty_string.clone());
        }

        let mut len = 0;
        for element in elements {
            len += self.unbox_str(element)?.len();
        }
        let mut out = String::with_capacity(len);
        for element in elements {
            out.push_str(self.unbox_str(element)?);
        }
        Ok(Value::alloc(Boxed::String(out.into_boxed_str())))
    }
}
