//! JSON text codec — parses RFC 8259 text into a [`databind_core::Value`]
//! tree and emits the tree back as compact JSON.
//!
//! Mapping key order is preserved as encountered on parse and honored on
//! emit; duplicate object keys resolve to the last occurrence.

pub mod decoder;
pub mod encoder;

pub use decoder::JsonDecoder;
pub use encoder::JsonEncoder;
