//! Polymorphic subtype resolution over a closed tagged-variant set.
//!
//! A [`PolymorphicDescriptor`] maps discriminator tags to per-variant
//! [`TypeDescriptor`]s. Reading dispatches on the discriminator value found
//! in the source mapping; writing dispatches on the dynamic variant of the
//! object. How the tag travels is format-specific and decided by the engine:
//! JSON injects it as the first body field, YAML carries it in the document
//! header.

use databind_core::{BindError, Value};
use indexmap::IndexMap;

use crate::descriptor::TypeDescriptor;

pub type MatchFn<P> = fn(&P) -> bool;

struct VariantSpec<P> {
    matches: MatchFn<P>,
    descriptor: TypeDescriptor<P>,
}

pub struct PolymorphicDescriptor<P> {
    name: &'static str,
    discriminator: &'static str,
    variants: IndexMap<&'static str, VariantSpec<P>>,
}

impl<P> PolymorphicDescriptor<P> {
    pub fn new(name: &'static str, discriminator: &'static str) -> Self {
        Self {
            name,
            discriminator,
            variants: IndexMap::new(),
        }
    }

    /// Registers a subtype under `tag`. Tags are unique; each variant is
    /// reachable by exactly one tag.
    pub fn variant(
        mut self,
        tag: &'static str,
        matches: MatchFn<P>,
        descriptor: TypeDescriptor<P>,
    ) -> Self {
        assert!(!tag.is_empty(), "empty subtype tag in {}", self.name);
        let previous = self.variants.insert(
            tag,
            VariantSpec {
                matches,
                descriptor,
            },
        );
        assert!(
            previous.is_none(),
            "duplicate subtype tag \"{tag}\" in {}",
            self.name
        );
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn discriminator(&self) -> &'static str {
        self.discriminator
    }

    /// Looks up the variant descriptor registered under `tag`.
    pub fn descriptor_for(&self, tag: &str) -> Result<&TypeDescriptor<P>, BindError> {
        self.variants
            .get(tag)
            .map(|v| &v.descriptor)
            .ok_or_else(|| BindError::UnknownSubtype(tag.to_string()))
    }

    /// Resolves the variant named by the mapping's discriminator field. An
    /// absent or non-textual discriminator resolves like an empty tag.
    pub fn resolve_read(&self, value: &Value) -> Result<&TypeDescriptor<P>, BindError> {
        let entries = value
            .entries()
            .ok_or(BindError::NotMapping(self.name))?;
        let tag = entries
            .iter()
            .find(|(k, _)| k == self.discriminator)
            .and_then(|(_, v)| v.as_str())
            .unwrap_or("");
        self.descriptor_for(tag)
    }

    /// Resolves the dynamic variant of `obj`, in registration order.
    pub fn resolve_write(&self, obj: &P) -> Result<(&'static str, &TypeDescriptor<P>), BindError> {
        for (tag, spec) in &self.variants {
            if (spec.matches)(obj) {
                return Ok((tag, &spec.descriptor));
            }
        }
        Err(BindError::UnregisteredSubtype(self.name))
    }

    /// Binds a mapping through the variant its discriminator names.
    pub fn bind(&self, value: &Value) -> Result<P, BindError> {
        self.resolve_read(value)?.bind(value)
    }

    /// Projects `obj` through its variant descriptor. The returned body does
    /// not contain the discriminator; the caller places the tag according to
    /// the output format.
    pub fn project(&self, obj: &P) -> Result<(&'static str, Value), BindError> {
        let (tag, descriptor) = self.resolve_write(obj)?;
        Ok((tag, descriptor.project(obj)))
    }
}
