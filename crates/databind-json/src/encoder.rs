//! `JsonEncoder` — compact JSON text encoder over a [`Value`] tree.
//!
//! No added whitespace, no trailing newline. Mapping keys are written in the
//! tree's stored order.

use databind_core::Value;

pub struct JsonEncoder {
    out: String,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    pub fn encode(&mut self, value: &Value) -> String {
        self.out.clear();
        self.write_any(value);
        std::mem::take(&mut self.out)
    }

    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Int(_) | Value::UInt(_) | Value::Float(_) => self.write_num(value),
            Value::Str(s) => self.write_str(s),
            Value::Seq(items) => self.write_seq(items),
            Value::Map(entries) => self.write_map(entries),
        }
    }

    fn write_num(&mut self, value: &Value) {
        if let Some(literal) = value.number_literal() {
            self.out.push_str(&literal);
        }
    }

    /// Writes a JSON-encoded string (with escaping).
    pub fn write_str(&mut self, s: &str) {
        // Fast path: pure ASCII printable, no quotes or backslash
        let has_special = s
            .bytes()
            .any(|b| b < 32 || b > 126 || b == b'"' || b == b'\\');
        if !has_special {
            self.out.push('"');
            self.out.push_str(s);
            self.out.push('"');
            return;
        }
        // Fall back to serde_json for proper escaping
        let escaped = serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string());
        self.out.push_str(&escaped);
    }

    fn write_seq(&mut self, items: &[Value]) {
        self.out.push('[');
        let last = items.len().saturating_sub(1);
        for (i, item) in items.iter().enumerate() {
            self.write_any(item);
            if i < last {
                self.out.push(',');
            }
        }
        self.out.push(']');
    }

    fn write_map(&mut self, entries: &[(String, Value)]) {
        self.out.push('{');
        let last = entries.len().saturating_sub(1);
        for (i, (key, val)) in entries.iter().enumerate() {
            self.write_str(key);
            self.out.push(':');
            self.write_any(val);
            if i < last {
                self.out.push(',');
            }
        }
        self.out.push('}');
    }
}
