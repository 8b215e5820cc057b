//! `YamlDecoder` — line-oriented block parser producing a [`Value`] tree.
//!
//! Supports block mappings, block sequences, plain and quoted scalars,
//! quoted keys, the flow-empty forms `{}`/`[]`, full-line `#` comments, and
//! an optional `---` document-start line with an optional `!<tag>` header.
//! Errors carry the byte offset of the offending content.

use databind_core::{ParseError, ParseReason, Value};

/// One parsed document: the optional header tag plus the root value.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlDocument {
    pub tag: Option<String>,
    pub root: Value,
}

#[derive(Debug, Clone)]
struct Line {
    indent: usize,
    text: String,
    /// byte offset of the first content character in the source
    pos: usize,
}

pub struct YamlDecoder {
    lines: Vec<Line>,
    idx: usize,
}

impl Default for YamlDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlDecoder {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            idx: 0,
        }
    }

    /// Decodes one document. The `---` start line is optional; a `!<tag>`
    /// suffix on it is captured into [`YamlDocument::tag`].
    pub fn decode(&mut self, input: &str) -> Result<YamlDocument, ParseError> {
        self.lines = split_lines(input)?;
        self.idx = 0;

        let mut tag = None;
        if let Some(first) = self.lines.first() {
            if first.indent == 0 && (first.text == "---" || first.text.starts_with("--- ")) {
                let rest = first.text[3..].trim();
                if !rest.is_empty() {
                    tag = Some(parse_header_tag(rest, first.pos + 4)?);
                }
                self.idx = 1;
            }
        }

        if self.idx >= self.lines.len() {
            return Ok(YamlDocument {
                tag,
                root: Value::Null,
            });
        }
        let root_indent = self.lines[self.idx].indent;
        let first = self.lines[self.idx].clone();
        let root = if self.lines.len() - self.idx == 1
            && !is_dash_entry(&first.text)
            && find_key_split(&first.text).is_none()
        {
            // single-line scalar document
            self.idx += 1;
            parse_scalar(&first.text, first.pos)?
        } else {
            self.parse_block(root_indent)?
        };
        if let Some(extra) = self.lines.get(self.idx) {
            // a line dedented past the root block has no parent
            return Err(ParseError::new(extra.pos, ParseReason::BadIndent));
        }
        Ok(YamlDocument { tag, root })
    }

    fn parse_block(&mut self, indent: usize) -> Result<Value, ParseError> {
        let first = &self.lines[self.idx];
        if is_dash_entry(&first.text) {
            self.parse_seq(indent)
        } else {
            self.parse_map(indent)
        }
    }

    fn parse_seq(&mut self, indent: usize) -> Result<Value, ParseError> {
        let mut items = Vec::new();
        while self.idx < self.lines.len() {
            let line = self.lines[self.idx].clone();
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(ParseError::new(line.pos, ParseReason::BadIndent));
            }
            if !is_dash_entry(&line.text) {
                return Err(ParseError::new(line.pos, ParseReason::UnexpectedCharacter));
            }
            if line.text == "-" {
                self.idx += 1;
                items.push(self.parse_nested(indent)?);
                continue;
            }
            let rest = line.text[1..].trim_start();
            let offset = line.text.len() - rest.len();
            let item_indent = indent + offset;
            if find_key_split(rest).is_some() || is_dash_entry(rest) {
                // the rest of the dash line is the first entry of a nested
                // block item; re-enter it as a line at the item's indent
                self.lines[self.idx] = Line {
                    indent: item_indent,
                    text: rest.to_string(),
                    pos: line.pos + offset,
                };
                items.push(self.parse_block(item_indent)?);
            } else {
                items.push(parse_scalar(rest, line.pos + offset)?);
                self.idx += 1;
            }
        }
        Ok(Value::Seq(items))
    }

    fn parse_map(&mut self, indent: usize) -> Result<Value, ParseError> {
        let mut entries: Vec<(String, Value)> = Vec::new();
        while self.idx < self.lines.len() {
            let line = self.lines[self.idx].clone();
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(ParseError::new(line.pos, ParseReason::BadIndent));
            }
            if is_dash_entry(&line.text) {
                return Err(ParseError::new(line.pos, ParseReason::UnexpectedCharacter));
            }
            let Some((raw_key, rest)) = find_key_split(&line.text) else {
                return Err(ParseError::new(line.pos, ParseReason::UnexpectedCharacter));
            };
            let key = decode_key(raw_key, line.pos)?;
            let value = if rest.is_empty() {
                self.idx += 1;
                self.parse_nested(indent)?
            } else {
                let offset = line.text.len() - rest.len();
                let value = parse_scalar(rest, line.pos + offset)?;
                self.idx += 1;
                value
            };
            // duplicate keys: last occurrence wins, first position kept
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
        Ok(Value::Map(entries))
    }

    /// Parses the block owned by the entry just consumed: the following lines
    /// at deeper indent, or null when there are none.
    fn parse_nested(&mut self, indent: usize) -> Result<Value, ParseError> {
        match self.lines.get(self.idx) {
            Some(next) if next.indent > indent => {
                let child_indent = next.indent;
                self.parse_block(child_indent)
            }
            _ => Ok(Value::Null),
        }
    }
}

fn is_dash_entry(text: &str) -> bool {
    text == "-" || text.starts_with("- ")
}

fn split_lines(input: &str) -> Result<Vec<Line>, ParseError> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for raw in input.split('\n') {
        let raw_len = raw.len();
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let mut indent = 0;
        for b in line.bytes() {
            match b {
                b' ' => indent += 1,
                b'\t' => return Err(ParseError::new(offset + indent, ParseReason::BadIndent)),
                _ => break,
            }
        }
        let text = line[indent..].trim_end();
        if !text.is_empty() && !text.starts_with('#') {
            lines.push(Line {
                indent,
                text: text.to_string(),
                pos: offset + indent,
            });
        }
        offset += raw_len + 1;
    }
    Ok(lines)
}

fn parse_header_tag(rest: &str, pos: usize) -> Result<String, ParseError> {
    let inner = rest
        .strip_prefix("!<")
        .and_then(|r| r.strip_suffix('>'))
        .filter(|r| !r.is_empty());
    match inner {
        Some(tag) => Ok(tag.to_string()),
        None => Err(ParseError::new(pos, ParseReason::UnexpectedCharacter)),
    }
}

/// Splits `key: rest` at the first colon that ends the key token. Returns
/// `None` when the text has no key shape (it is a plain scalar).
fn find_key_split(text: &str) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let key_end = match bytes.first()? {
        b'"' => {
            let mut x = 1;
            while x < bytes.len() {
                match bytes[x] {
                    b'"' => break,
                    b'\\' => x += 2,
                    _ => x += 1,
                }
            }
            if x >= bytes.len() {
                return None;
            }
            x + 1
        }
        b'\'' => {
            let mut x = 1;
            loop {
                if x >= bytes.len() {
                    return None;
                }
                if bytes[x] == b'\'' {
                    if bytes.get(x + 1) == Some(&b'\'') {
                        x += 2;
                        continue;
                    }
                    break;
                }
                x += 1;
            }
            x + 1
        }
        _ => {
            // plain key: first colon followed by a space or end-of-line
            let mut found = None;
            for (i, &b) in bytes.iter().enumerate() {
                if b == b':' && matches!(bytes.get(i + 1), None | Some(&b' ')) {
                    found = Some(i);
                    break;
                }
            }
            found?
        }
    };
    if bytes.get(key_end) != Some(&b':') {
        return None;
    }
    if !matches!(bytes.get(key_end + 1), None | Some(&b' ')) {
        return None;
    }
    let rest = text[key_end + 1..].trim_start();
    Some((&text[..key_end], rest))
}

fn decode_key(raw: &str, pos: usize) -> Result<String, ParseError> {
    match raw.bytes().next() {
        Some(b'"') | Some(b'\'') => match parse_scalar(raw, pos)? {
            Value::Str(s) => Ok(s),
            _ => Err(ParseError::new(pos, ParseReason::UnexpectedCharacter)),
        },
        _ => Ok(raw.to_string()),
    }
}

fn parse_scalar(text: &str, pos: usize) -> Result<Value, ParseError> {
    match text.bytes().next() {
        Some(b'"') => {
            return serde_json::from_str::<String>(text)
                .map(Value::Str)
                .map_err(|_| ParseError::new(pos, ParseReason::InvalidEscape));
        }
        Some(b'\'') => return parse_single_quoted(text, pos).map(Value::Str),
        _ => {}
    }
    match text {
        "{}" => return Ok(Value::Map(Vec::new())),
        "[]" => return Ok(Value::Seq(Vec::new())),
        "null" | "~" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    if let Ok(u) = text.parse::<u64>() {
        return Ok(Value::UInt(u));
    }
    if looks_numeric(text) {
        if let Ok(f) = text.parse::<f64>() {
            return Ok(Value::Float(f));
        }
    }
    Ok(Value::Str(text.to_string()))
}

fn parse_single_quoted(text: &str, pos: usize) -> Result<String, ParseError> {
    let bytes = text.as_bytes();
    let mut out = String::new();
    let mut x = 1;
    loop {
        if x >= bytes.len() {
            return Err(ParseError::new(pos, ParseReason::UnexpectedEnd));
        }
        if bytes[x] == b'\'' {
            if bytes.get(x + 1) == Some(&b'\'') {
                out.push('\'');
                x += 2;
                continue;
            }
            // closing quote must end the token
            if x + 1 != bytes.len() {
                return Err(ParseError::new(pos + x + 1, ParseReason::UnexpectedCharacter));
            }
            return Ok(out);
        }
        let ch_end = text[x..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| x + i)
            .unwrap_or(bytes.len());
        out.push_str(&text[x..ch_end]);
        x = ch_end;
    }
}

/// Restricts the plain-scalar float fallback to digit-bearing tokens so that
/// words like `nan` or `inf` stay strings.
fn looks_numeric(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-'))
}
