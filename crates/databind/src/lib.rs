//! databind — typed JSON/YAML data binding over a format-agnostic value
//! tree.
//!
//! # Overview
//!
//! Reading runs text through a format codec into a [`Value`] tree, then
//! through a [`TypeDescriptor`] into a typed object; writing projects the
//! object back into a tree and emits it. A [`PolymorphicDescriptor`]
//! intercepts both directions when the target is a closed set of tagged
//! variants. Descriptors are composed once and are read-only afterwards, so
//! they can be shared freely across concurrent calls.
//!
//! # Example
//!
//! ```
//! use databind::{Engine, FieldSpec, TypeDescriptor, Value, convert};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Product {
//!     title: String,
//!     price: f64,
//! }
//!
//! let descriptor = TypeDescriptor::mutable("Product", Product::default)
//!     .field(
//!         FieldSpec::new("title", |p: &Product| Value::from(p.title.clone()))
//!             .assign(|p, v| {
//!                 p.title = convert::string(v, "title")?;
//!                 Ok(())
//!             }),
//!     )
//!     .field(
//!         FieldSpec::new("price", |p: &Product| Value::Float(p.price))
//!             .assign(|p, v| {
//!                 p.price = convert::float(v, "price")?;
//!                 Ok(())
//!             }),
//!     );
//!
//! let engine = Engine::json();
//! let text = engine.write_value(
//!     &Product { title: "pen".into(), price: 10.0 },
//!     &descriptor,
//! );
//! assert_eq!(text, r#"{"title":"pen","price":10}"#);
//!
//! let product: Product = engine.read_value(&text, &descriptor).unwrap();
//! assert_eq!(product.price, 10.0);
//! ```

pub mod convert;
pub mod descriptor;
pub mod engine;
pub mod poly;

// Re-export the core public API
pub use databind_core::{BindError, EngineError, ParseError, ParseReason, Value};
pub use databind_json::{JsonDecoder, JsonEncoder};
pub use databind_yaml::{YamlDecoder, YamlDocument, YamlEncoder};
pub use descriptor::{Args, CreatorSpec, FieldSpec, TypeDescriptor};
pub use engine::{Engine, Format};
pub use poly::PolymorphicDescriptor;
