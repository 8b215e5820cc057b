//! `JsonDecoder` — JSON text decoder that produces a [`Value`] tree.
//!
//! Byte-level scanner over the input; errors carry the byte offset at which
//! scanning failed.

use databind_core::{ParseError, ParseReason, Value};

pub struct JsonDecoder {
    pub data: Vec<u8>,
    pub x: usize,
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            x: 0,
        }
    }

    /// Decodes one complete JSON document. Trailing non-whitespace after the
    /// top-level value is an error.
    pub fn decode(&mut self, input: &[u8]) -> Result<Value, ParseError> {
        self.data = input.to_vec();
        self.x = 0;
        let value = self.read_any()?;
        self.skip_whitespace();
        if self.x < self.data.len() {
            return Err(ParseError::new(self.x, ParseReason::TrailingCharacters));
        }
        Ok(value)
    }

    pub fn read_any(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        let x = self.x;
        if x >= self.data.len() {
            return Err(ParseError::new(x, ParseReason::UnexpectedEnd));
        }
        match self.data[x] {
            b'"' => Ok(Value::Str(self.read_str()?)),
            b'[' => self.read_arr(),
            b'{' => self.read_obj(),
            b'f' => self.read_false(),
            b'n' => self.read_null(),
            b't' => self.read_true(),
            c if c.is_ascii_digit() || c == b'-' => self.read_num(),
            _ => Err(ParseError::new(x, ParseReason::UnexpectedCharacter)),
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.x < self.data.len() {
            match self.data[self.x] {
                b' ' | b'\t' | b'\n' | b'\r' => self.x += 1,
                _ => break,
            }
        }
    }

    fn read_literal(&mut self, literal: &[u8], value: Value) -> Result<Value, ParseError> {
        if self.x + literal.len() > self.data.len() {
            return Err(ParseError::new(self.x, ParseReason::UnexpectedEnd));
        }
        if &self.data[self.x..self.x + literal.len()] != literal {
            return Err(ParseError::new(self.x, ParseReason::UnexpectedCharacter));
        }
        self.x += literal.len();
        Ok(value)
    }

    pub fn read_null(&mut self) -> Result<Value, ParseError> {
        self.read_literal(b"null", Value::Null)
    }

    pub fn read_true(&mut self) -> Result<Value, ParseError> {
        self.read_literal(b"true", Value::Bool(true))
    }

    pub fn read_false(&mut self) -> Result<Value, ParseError> {
        self.read_literal(b"false", Value::Bool(false))
    }

    pub fn read_num(&mut self) -> Result<Value, ParseError> {
        let start = self.x;
        let data = &self.data;
        let len = data.len();
        let mut x = self.x;

        // Consume sign, digits, decimal, exponent
        if x < len && data[x] == b'-' {
            x += 1;
        }
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        let mut is_float = false;
        if x < len && data[x] == b'.' {
            is_float = true;
            x += 1;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        if x < len && (data[x] == b'e' || data[x] == b'E') {
            is_float = true;
            x += 1;
            if x < len && (data[x] == b'+' || data[x] == b'-') {
                x += 1;
            }
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        self.x = x;

        let s = std::str::from_utf8(&data[start..x])
            .map_err(|_| ParseError::new(start, ParseReason::InvalidUtf8))?;
        if is_float {
            let f: f64 = s
                .parse()
                .map_err(|_| ParseError::new(start, ParseReason::InvalidNumber))?;
            Ok(Value::Float(f))
        } else if let Ok(i) = s.parse::<i64>() {
            Ok(Value::Int(i))
        } else if let Ok(u) = s.parse::<u64>() {
            Ok(Value::UInt(u))
        } else if let Ok(f) = s.parse::<f64>() {
            // integer literal wider than u64
            Ok(Value::Float(f))
        } else {
            Err(ParseError::new(start, ParseReason::InvalidNumber))
        }
    }

    pub fn read_str(&mut self) -> Result<String, ParseError> {
        if self.x >= self.data.len() || self.data[self.x] != b'"' {
            return Err(ParseError::new(self.x, ParseReason::UnexpectedCharacter));
        }
        self.x += 1; // skip opening quote
        let x0 = self.x;
        let x1 = find_ending_quote(&self.data, x0)?;
        let s = decode_json_string(&self.data[x0..x1], x0)?;
        self.x = x1 + 1; // skip closing quote
        Ok(s)
    }

    pub fn read_arr(&mut self) -> Result<Value, ParseError> {
        if self.x >= self.data.len() || self.data[self.x] != b'[' {
            return Err(ParseError::new(self.x, ParseReason::UnexpectedCharacter));
        }
        self.x += 1;
        let mut arr = Vec::new();
        let mut first = true;
        loop {
            self.skip_whitespace();
            if self.x >= self.data.len() {
                return Err(ParseError::new(self.x, ParseReason::UnexpectedEnd));
            }
            let ch = self.data[self.x];
            if ch == b']' {
                self.x += 1;
                return Ok(Value::Seq(arr));
            }
            if ch == b',' {
                if first {
                    return Err(ParseError::new(self.x, ParseReason::UnexpectedCharacter));
                }
                self.x += 1;
            } else if !first {
                return Err(ParseError::new(self.x, ParseReason::UnexpectedCharacter));
            }
            self.skip_whitespace();
            arr.push(self.read_any()?);
            first = false;
        }
    }

    pub fn read_obj(&mut self) -> Result<Value, ParseError> {
        if self.x >= self.data.len() || self.data[self.x] != b'{' {
            return Err(ParseError::new(self.x, ParseReason::UnexpectedCharacter));
        }
        self.x += 1;
        let mut obj: Vec<(String, Value)> = Vec::new();
        let mut first = true;
        loop {
            self.skip_whitespace();
            if self.x >= self.data.len() {
                return Err(ParseError::new(self.x, ParseReason::UnexpectedEnd));
            }
            let ch = self.data[self.x];
            if ch == b'}' {
                self.x += 1;
                return Ok(Value::Map(obj));
            }
            if ch == b',' {
                if first {
                    return Err(ParseError::new(self.x, ParseReason::UnexpectedCharacter));
                }
                self.x += 1;
            } else if !first {
                return Err(ParseError::new(self.x, ParseReason::UnexpectedCharacter));
            }
            self.skip_whitespace();
            if self.x >= self.data.len() || self.data[self.x] != b'"' {
                return Err(ParseError::new(self.x, ParseReason::UnexpectedCharacter));
            }
            let key = self.read_str()?;
            self.skip_whitespace();
            if self.x >= self.data.len() || self.data[self.x] != b':' {
                return Err(ParseError::new(self.x, ParseReason::UnexpectedCharacter));
            }
            self.x += 1;
            self.skip_whitespace();
            let val = self.read_any()?;
            // duplicate keys: last occurrence wins, first position kept
            match obj.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = val,
                None => obj.push((key, val)),
            }
            first = false;
        }
    }
}

/// Finds the closing quote of a string body starting at `from`, skipping
/// backslash escapes.
fn find_ending_quote(data: &[u8], from: usize) -> Result<usize, ParseError> {
    let mut x = from;
    while x < data.len() {
        match data[x] {
            b'"' => return Ok(x),
            b'\\' => x += 2,
            _ => x += 1,
        }
    }
    Err(ParseError::new(from, ParseReason::UnexpectedEnd))
}

/// Decodes a JSON string body (between the quotes) handling escape sequences.
/// Uses serde_json for correctness.
fn decode_json_string(bytes: &[u8], position: usize) -> Result<String, ParseError> {
    // Fast path: no backslash
    if !bytes.contains(&b'\\') {
        return std::str::from_utf8(bytes)
            .map(|s| s.to_string())
            .map_err(|_| ParseError::new(position, ParseReason::InvalidUtf8));
    }
    // Wrap in quotes and use serde_json for proper unescaping
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(bytes);
    quoted.push(b'"');
    serde_json::from_slice(&quoted).map_err(|_| ParseError::new(position, ParseReason::InvalidEscape))
}
