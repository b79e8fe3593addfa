use crate::runtime::{
    bootstrap::Runtime,
    error::{RuntimeError, RuntimeResult},
    value::Value,
};

/// Truncates to the low 8 bits.
pub fn int_to_byte(n: i64) -> i8 {
    n as i8
}

pub fn byte_to_int(byte: i8) -> i64 {
    i64::from(byte)
}

/// Parses like C `strtol` in base 10: leading whitespace, an optional sign,
/// then as many digits as follow. Trailing text is ignored and out-of-range
/// values saturate. Returns `None` when no digit is found.
pub(super) fn parse_leading_int(text: &str) -> Option<i64> {
    let rest = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let digit = i64::from(digit - b'0');
        // Accumulate toward the sign so i64::MIN is representable.
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    seen.then_some(value)
}

impl Runtime {
    /// `toInt`: parses a String value into an Int.
    pub fn to_int(&self, text: &Value) -> RuntimeResult<i64> {
        let text = self.unbox_str(text)?;
        parse_leading_int(text).ok_or_else(|| RuntimeError::ConversionFailure {
            input: text.to_string(),
            target: "Int",
        })
    }
}
