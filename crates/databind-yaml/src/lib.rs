//! YAML block-subset codec — block mappings and sequences, plain and quoted
//! scalars, and the `!<tag>` document-header convention for tagged values.
//!
//! The supported surface is deliberately restricted to what the engine
//! emits plus hand-authored equivalents: no anchors, no flow collections
//! (except empty `{}`/`[]`), no multi-line scalars, one document per input.
//!
//! Tagged documents are asymmetric by design: the writer carries a subtype
//! tag in the `--- !<tag>` header and omits it from the body, while the
//! reader accepts both the header form and an ordinary discriminator field
//! inside the body.

pub mod decoder;
pub mod encoder;

pub use decoder::{YamlDecoder, YamlDocument};
pub use encoder::YamlEncoder;
