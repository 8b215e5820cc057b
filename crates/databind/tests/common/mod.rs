//! Shared fixture types and descriptors for the binding tests.

#![allow(dead_code)]

use databind::{convert, CreatorSpec, FieldSpec, PolymorphicDescriptor, TypeDescriptor, Value};

/// Setter-based target with a no-argument initializer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
}

pub fn product_descriptor() -> TypeDescriptor<Product> {
    TypeDescriptor::mutable("Product", Product::default)
        .field(
            FieldSpec::new("title", |p: &Product| Value::from(p.title.clone())).assign(|p, v| {
                p.title = convert::string(v, "title")?;
                Ok(())
            }),
        )
        .field(
            FieldSpec::new("description", |p: &Product| Value::from(p.description.clone()))
                .assign(|p, v| {
                    p.description = convert::string(v, "description")?;
                    Ok(())
                }),
        )
        .field(
            FieldSpec::new("price", |p: &Product| Value::Float(p.price)).assign(|p, v| {
                p.price = convert::float(v, "price")?;
                Ok(())
            }),
        )
}

/// Creator-based target with two constructors of different arity; the
/// two-argument one supplies a unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableProduct {
    title: String,
    description: String,
    price: f64,
}

impl ImmutableProduct {
    pub fn new(title: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
        }
    }

    pub fn with_unit_price(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, 1.0)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

pub fn immutable_product_descriptor() -> TypeDescriptor<ImmutableProduct> {
    TypeDescriptor::with_creators(
        "ImmutableProduct",
        vec![
            CreatorSpec::new(&["title", "description", "price"], |args| {
                Ok(ImmutableProduct::new(
                    args.string("title")?,
                    args.string("description")?,
                    args.float("price")?,
                ))
            }),
            CreatorSpec::new(&["title", "description"], |args| {
                Ok(ImmutableProduct::with_unit_price(
                    args.string("title")?,
                    args.string("description")?,
                ))
            }),
        ],
    )
    .field(FieldSpec::new("title", |p: &ImmutableProduct| {
        Value::from(p.title.clone())
    }))
    .field(FieldSpec::new("description", |p: &ImmutableProduct| {
        Value::from(p.description.clone())
    }))
    .field(FieldSpec::new("price", |p: &ImmutableProduct| {
        Value::Float(p.price)
    }))
}

/// Closed tagged-variant set; each variant carries the shared base fields
/// plus its own property.
#[derive(Debug, Clone, PartialEq)]
pub enum Parent {
    ChildOne {
        name: String,
        description: String,
        child_one_property: String,
    },
    ChildTwo {
        name: String,
        description: String,
        child_two_property: String,
    },
}

impl Parent {
    pub fn name(&self) -> &str {
        match self {
            Parent::ChildOne { name, .. } | Parent::ChildTwo { name, .. } => name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Parent::ChildOne { description, .. } | Parent::ChildTwo { description, .. } => {
                description
            }
        }
    }
}

fn child_one_descriptor() -> TypeDescriptor<Parent> {
    TypeDescriptor::with_creators(
        "ChildOne",
        vec![CreatorSpec::new(
            &["name", "description", "childOneProperty"],
            |args| {
                Ok(Parent::ChildOne {
                    name: args.string("name")?,
                    description: args.string("description")?,
                    child_one_property: args.string("childOneProperty")?,
                })
            },
        )],
    )
    .field(FieldSpec::new("name", |p: &Parent| Value::from(p.name())))
    .field(FieldSpec::new("description", |p: &Parent| {
        Value::from(p.description())
    }))
    .field(FieldSpec::new("childOneProperty", |p: &Parent| match p {
        Parent::ChildOne {
            child_one_property, ..
        } => Value::from(child_one_property.clone()),
        _ => Value::Null,
    }))
}

fn child_two_descriptor() -> TypeDescriptor<Parent> {
    TypeDescriptor::with_creators(
        "ChildTwo",
        vec![CreatorSpec::new(
            &["name", "description", "childTwoProperty"],
            |args| {
                Ok(Parent::ChildTwo {
                    name: args.string("name")?,
                    description: args.string("description")?,
                    child_two_property: args.string("childTwoProperty")?,
                })
            },
        )],
    )
    .field(FieldSpec::new("name", |p: &Parent| Value::from(p.name())))
    .field(FieldSpec::new("description", |p: &Parent| {
        Value::from(p.description())
    }))
    .field(FieldSpec::new("childTwoProperty", |p: &Parent| match p {
        Parent::ChildTwo {
            child_two_property, ..
        } => Value::from(child_two_property.clone()),
        _ => Value::Null,
    }))
}

pub fn parent_descriptor() -> PolymorphicDescriptor<Parent> {
    PolymorphicDescriptor::new("Parent", "type")
        .variant(
            "childOne",
            |p| matches!(p, Parent::ChildOne { .. }),
            child_one_descriptor(),
        )
        .variant(
            "childTwo",
            |p| matches!(p, Parent::ChildTwo { .. }),
            child_two_descriptor(),
        )
}

pub fn child_one(name: &str, description: &str, property: &str) -> Parent {
    Parent::ChildOne {
        name: name.into(),
        description: description.into(),
        child_one_property: property.into(),
    }
}

pub fn child_two(name: &str, description: &str, property: &str) -> Parent {
    Parent::ChildTwo {
        name: name.into(),
        description: description.into(),
        child_two_property: property.into(),
    }
}
