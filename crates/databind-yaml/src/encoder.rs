//! `YamlEncoder` — block-style YAML emitter over a [`Value`] tree.
//!
//! Documents start with `---`; nested blocks indent by two spaces; strings
//! are always double-quoted; numbers and booleans are written unquoted in
//! canonical form. Empty containers use the flow forms `{}` and `[]`.

use databind_core::Value;

const INDENT: usize = 2;

pub struct YamlEncoder {
    out: String,
}

impl Default for YamlEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlEncoder {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    /// Encodes a plain document: `---` header, then the block body.
    pub fn encode(&mut self, value: &Value) -> String {
        self.out.clear();
        self.out.push_str("---\n");
        self.write_root(value);
        std::mem::take(&mut self.out)
    }

    /// Encodes a tagged document: the tag is carried in the `--- !<tag>`
    /// header, not as a body field.
    pub fn encode_tagged(&mut self, tag: &str, value: &Value) -> String {
        self.out.clear();
        self.out.push_str("--- !<");
        self.out.push_str(tag);
        self.out.push_str(">\n");
        self.write_root(value);
        std::mem::take(&mut self.out)
    }

    fn write_root(&mut self, value: &Value) {
        match value {
            Value::Map(entries) if !entries.is_empty() => self.write_map(entries, 0),
            Value::Seq(items) if !items.is_empty() => self.write_seq(items, 0),
            Value::Map(_) => self.out.push_str("{}\n"),
            Value::Seq(_) => self.out.push_str("[]\n"),
            scalar => {
                let s = scalar_literal(scalar);
                self.out.push_str(&s);
                self.out.push('\n');
            }
        }
    }

    fn write_map(&mut self, entries: &[(String, Value)], indent: usize) {
        let pad = " ".repeat(indent);
        for (key, value) in entries {
            self.write_entry(&pad, key, value, indent + INDENT);
        }
    }

    fn write_seq(&mut self, items: &[Value], indent: usize) {
        let pad = " ".repeat(indent);
        for item in items {
            match item {
                Value::Map(entries) if !entries.is_empty() => {
                    // first entry shares the dash line, the rest align under it
                    let dash = format!("{pad}- ");
                    let inner = " ".repeat(indent + INDENT);
                    let (key, value) = &entries[0];
                    self.write_entry(&dash, key, value, indent + 2 * INDENT);
                    for (key, value) in &entries[1..] {
                        self.write_entry(&inner, key, value, indent + 2 * INDENT);
                    }
                }
                Value::Seq(sub) if !sub.is_empty() => {
                    self.out.push_str(&pad);
                    self.out.push_str("-\n");
                    self.write_seq(sub, indent + INDENT);
                }
                Value::Map(_) => {
                    self.out.push_str(&pad);
                    self.out.push_str("- {}\n");
                }
                Value::Seq(_) => {
                    self.out.push_str(&pad);
                    self.out.push_str("- []\n");
                }
                scalar => {
                    self.out.push_str(&pad);
                    self.out.push_str("- ");
                    let s = scalar_literal(scalar);
                    self.out.push_str(&s);
                    self.out.push('\n');
                }
            }
        }
    }

    /// Writes one mapping entry. `prefix` carries the leading padding (plus a
    /// dash for the first entry of a sequence item); nested blocks are
    /// written at `nested_indent`.
    fn write_entry(&mut self, prefix: &str, key: &str, value: &Value, nested_indent: usize) {
        self.out.push_str(prefix);
        self.write_key(key);
        match value {
            Value::Map(entries) if !entries.is_empty() => {
                self.out.push_str(":\n");
                self.write_map(entries, nested_indent);
            }
            Value::Seq(items) if !items.is_empty() => {
                self.out.push_str(":\n");
                self.write_seq(items, nested_indent);
            }
            Value::Map(_) => self.out.push_str(": {}\n"),
            Value::Seq(_) => self.out.push_str(": []\n"),
            scalar => {
                self.out.push_str(": ");
                let s = scalar_literal(scalar);
                self.out.push_str(&s);
                self.out.push('\n');
            }
        }
    }

    fn write_key(&mut self, key: &str) {
        if is_plain_key(key) {
            self.out.push_str(key);
        } else {
            let quoted = serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string());
            self.out.push_str(&quoted);
        }
    }
}

fn scalar_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Str(s) => serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string()),
        other => other.number_literal().unwrap_or_default(),
    }
}

/// Keys that can be written unquoted: an ASCII identifier-like token that the
/// line parser cannot mistake for a dash entry or a quoted scalar.
fn is_plain_key(key: &str) -> bool {
    let mut bytes = key.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}
