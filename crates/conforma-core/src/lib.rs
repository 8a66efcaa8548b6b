//! Conforma Core - Schema validation and coercion for untyped documents
//!
//! This crate takes a programmatically constructed [`Schema`] and an
//! untyped [`Node`] tree (produced by an external YAML/JSON deserializer)
//! and produces either a fully typed, constraint-checked [`Value`] or a
//! complete, ordered set of path-annotated validation errors.
//!
//! # Main Components
//!
//! - **Document Nodes**: ordered, untyped intermediate representation of
//!   the parsed input
//! - **Schema Descriptors**: composable shape descriptions with
//!   constraints, optionals, lists, objects, and unions
//! - **Coercion Engine**: best-effort scalar coercion (numeric string to
//!   number) with an explicit strict opt-out
//! - **Error Reporting**: one pass reports every violation in the
//!   document, not just the first
//!
//! # Example
//!
//! ```rust
//! use conforma_core::document::Node;
//! use conforma_core::schema::{Constraint, ObjectSchema, PrimitiveKind, Schema};
//! use conforma_core::validation::validate;
//!
//! let schema = Schema::object(
//!     ObjectSchema::builder()
//!         .field(
//!             "name",
//!             Schema::constrained(PrimitiveKind::String, vec![Constraint::MinLength(1)]),
//!         )
//!         .field("number_of_seats", Schema::positive_integer())
//!         .build()
//!         .unwrap(),
//! );
//!
//! let document = Node::from_yaml_str("name: ''\nnumber_of_seats: -5\n").unwrap();
//! let report = validate(&document, &schema).into_result().unwrap_err();
//! assert_eq!(report.len(), 2);
//! for error in report.iter() {
//!     println!("{}", error); // "$.name: length 0 is shorter than min_length 1", ...
//! }
//! ```
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

pub mod document;
pub mod schema;
pub mod validation;
pub mod value;

// Re-export the common surface for convenience
pub use document::{Node, Number, ParseError, ParseResult};
pub use schema::{
    Constraint, CrossFieldValidator, FieldSchema, LiteralValue, ObjectSchema,
    ObjectSchemaBuilder, PrimitiveKind, Schema, SchemaError, SchemaResult, UnionSchema,
};
pub use validation::{validate, ErrorKind, Outcome, Path, PathSegment, Report, ValidationError};
pub use value::Value;
