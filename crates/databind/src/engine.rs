//! Engine facade — wires a format codec, the type binder, and the
//! polymorphic resolver behind read/write operations over in-memory text
//! and files.
//!
//! All operations are synchronous single calls. File overloads acquire the
//! underlying handle for the duration of one read or write and release it on
//! every exit path; failed writes are not rolled back (callers needing
//! atomicity write to a sidecar path and rename).

use std::fs;
use std::path::Path;

use databind_core::{EngineError, Value};
use databind_json::{JsonDecoder, JsonEncoder};
use databind_yaml::{YamlDecoder, YamlEncoder};

use crate::descriptor::TypeDescriptor;
use crate::poly::PolymorphicDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

pub struct Engine {
    format: Format,
}

impl Engine {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn json() -> Self {
        Self::new(Format::Json)
    }

    pub fn yaml() -> Self {
        Self::new(Format::Yaml)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Parses without binding, for callers that only need generic traversal.
    pub fn read_tree(&self, text: &str) -> Result<Value, EngineError> {
        match self.format {
            Format::Json => Ok(JsonDecoder::new().decode(text.as_bytes())?),
            Format::Yaml => Ok(YamlDecoder::new().decode(text)?.root),
        }
    }

    /// Emits a tree without binding.
    pub fn write_tree(&self, value: &Value) -> String {
        match self.format {
            Format::Json => JsonEncoder::new().encode(value),
            Format::Yaml => YamlEncoder::new().encode(value),
        }
    }

    pub fn read_value<T>(
        &self,
        text: &str,
        descriptor: &TypeDescriptor<T>,
    ) -> Result<T, EngineError> {
        let tree = self.read_tree(text)?;
        Ok(descriptor.bind(&tree)?)
    }

    pub fn write_value<T>(&self, obj: &T, descriptor: &TypeDescriptor<T>) -> String {
        self.write_tree(&descriptor.project(obj))
    }

    /// Reads one polymorphic value. JSON carries the discriminator as a body
    /// field; YAML accepts either the `!<tag>` document header or a body
    /// field.
    pub fn read_poly<P>(
        &self,
        text: &str,
        descriptor: &PolymorphicDescriptor<P>,
    ) -> Result<P, EngineError> {
        match self.format {
            Format::Json => {
                let tree = JsonDecoder::new().decode(text.as_bytes())?;
                Ok(descriptor.bind(&tree)?)
            }
            Format::Yaml => {
                let document = YamlDecoder::new().decode(text)?;
                match document.tag {
                    Some(tag) => Ok(descriptor.descriptor_for(&tag)?.bind(&document.root)?),
                    None => Ok(descriptor.bind(&document.root)?),
                }
            }
        }
    }

    /// Writes one polymorphic value. JSON injects the discriminator as the
    /// first body key; YAML carries the tag in the document header and omits
    /// the body field.
    pub fn write_poly<P>(
        &self,
        obj: &P,
        descriptor: &PolymorphicDescriptor<P>,
    ) -> Result<String, EngineError> {
        let (tag, body) = descriptor.project(obj)?;
        match self.format {
            Format::Json => {
                let Value::Map(mut entries) = body else {
                    return Ok(self.write_tree(&body));
                };
                entries.insert(0, (descriptor.discriminator().to_string(), Value::from(tag)));
                Ok(self.write_tree(&Value::Map(entries)))
            }
            Format::Yaml => Ok(YamlEncoder::new().encode_tagged(tag, &body)),
        }
    }

    /// Binds a sequence of polymorphic mappings, each carrying the
    /// discriminator as a body field.
    pub fn read_poly_seq<P>(
        &self,
        text: &str,
        descriptor: &PolymorphicDescriptor<P>,
    ) -> Result<Vec<P>, EngineError> {
        let tree = self.read_tree(text)?;
        let items = tree
            .items()
            .ok_or(databind_core::BindError::NotSequence(descriptor.name()))?;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(descriptor.bind(item)?);
        }
        Ok(out)
    }

    // ---- File overloads ----

    pub fn read_tree_file(&self, path: impl AsRef<Path>) -> Result<Value, EngineError> {
        let text = fs::read_to_string(path)?;
        self.read_tree(&text)
    }

    pub fn read_value_file<T>(
        &self,
        path: impl AsRef<Path>,
        descriptor: &TypeDescriptor<T>,
    ) -> Result<T, EngineError> {
        let text = fs::read_to_string(path)?;
        self.read_value(&text, descriptor)
    }

    pub fn write_value_file<T>(
        &self,
        path: impl AsRef<Path>,
        obj: &T,
        descriptor: &TypeDescriptor<T>,
    ) -> Result<(), EngineError> {
        Ok(fs::write(path, self.write_value(obj, descriptor))?)
    }

    pub fn read_poly_file<P>(
        &self,
        path: impl AsRef<Path>,
        descriptor: &PolymorphicDescriptor<P>,
    ) -> Result<P, EngineError> {
        let text = fs::read_to_string(path)?;
        self.read_poly(&text, descriptor)
    }

    pub fn write_poly_file<P>(
        &self,
        path: impl AsRef<Path>,
        obj: &P,
        descriptor: &PolymorphicDescriptor<P>,
    ) -> Result<(), EngineError> {
        let text = self.write_poly(obj, descriptor)?;
        Ok(fs::write(path, text)?)
    }

    pub fn read_poly_seq_file<P>(
        &self,
        path: impl AsRef<Path>,
        descriptor: &PolymorphicDescriptor<P>,
    ) -> Result<Vec<P>, EngineError> {
        let text = fs::read_to_string(path)?;
        self.read_poly_seq(&text, descriptor)
    }
}
