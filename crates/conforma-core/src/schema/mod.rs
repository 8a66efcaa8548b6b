//! Schema descriptors: declarative, composable descriptions of expected shape
//!
//! A [`Schema`] is built once by the calling application, is immutable from
//! then on, and may be shared across any number of concurrent validation
//! calls. Because schemas own their children outright, the descriptor tree
//! is acyclic by construction; the build-time failure modes are duplicate
//! object fields, duplicate union tags, invalid regex patterns, and empty
//! union/literal sets, all reported as [`SchemaError`] before any document
//! is seen.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

pub mod constraint;
pub mod object;

pub use constraint::Constraint;
pub use object::{CrossFieldValidator, FieldSchema, ObjectSchema, ObjectSchemaBuilder};

use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

/// Programmer errors in schema construction. Detected once at build time,
/// never reported per document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("duplicate field '{name}' in object schema")]
    DuplicateField { name: String },

    #[error("duplicate tag '{tag}' in tagged union")]
    DuplicateTag { tag: String },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("union schema must have at least one variant")]
    EmptyUnion,

    #[error("literal schema must allow at least one value")]
    EmptyLiteral,
}

/// Result type for schema-construction operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// The primitive kinds a scalar can be validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Integer,
    /// Integer required to be greater than zero; the positivity failure is
    /// reported as a constraint violation, not a type mismatch.
    PositiveInteger,
    Float,
    Boolean,
    String,
}

impl PrimitiveKind {
    /// Name used on the "expected ..." side of type-mismatch messages.
    pub fn expected_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::PositiveInteger => "positive integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::String => "string",
        }
    }
}

/// A scalar value admitted by a [`Schema::Literal`].
///
/// Floats are deliberately not representable here; literal matching is
/// equality-based and float equality is not a meaningful membership test.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Int(i) => write!(f, "{}", i),
            LiteralValue::String(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::String(s.to_string())
    }
}

impl From<i64> for LiteralValue {
    fn from(i: i64) -> Self {
        LiteralValue::Int(i)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Bool(b)
    }
}

/// Union discrimination strategy plus branch schemas.
#[derive(Debug, Clone)]
pub enum UnionSchema {
    /// Branches tried in declared order; the first full success wins. On
    /// total failure only the first branch's errors are reported.
    Untagged(Vec<Schema>),
    /// Branch selected by the string value of the discriminator field.
    Tagged {
        discriminator: String,
        variants: IndexMap<String, Schema>,
    },
}

/// A declarative, recursive description of an expected typed shape.
#[derive(Debug, Clone)]
pub enum Schema {
    /// A scalar of the given kind. With `strict` set, coercion is disabled
    /// and only an exact-kind node is accepted.
    Primitive { kind: PrimitiveKind, strict: bool },
    /// A primitive refined by an ordered constraint list; constraints run
    /// after coercion and short-circuit at the first failure.
    Constrained {
        kind: PrimitiveKind,
        strict: bool,
        rules: Vec<Constraint>,
    },
    /// A closed set of allowed scalar values.
    Literal(Vec<LiteralValue>),
    /// Absent or null is valid and yields no value; anything else
    /// validates against the inner schema.
    Optional(Box<Schema>),
    /// A homogeneous sequence, optionally with a lower size bound counted
    /// over successfully validated elements.
    List {
        element: Box<Schema>,
        min_items: Option<usize>,
    },
    /// A mapping with declared fields and cross-field validators.
    Object(ObjectSchema),
    /// One of several alternative shapes.
    Union(UnionSchema),
}

impl Schema {
    pub fn integer() -> Self {
        Schema::Primitive {
            kind: PrimitiveKind::Integer,
            strict: false,
        }
    }

    /// Integer with coercion disabled: only an integer node is accepted,
    /// a numeric string is a type mismatch.
    pub fn strict_integer() -> Self {
        Schema::Primitive {
            kind: PrimitiveKind::Integer,
            strict: true,
        }
    }

    pub fn positive_integer() -> Self {
        Schema::Primitive {
            kind: PrimitiveKind::PositiveInteger,
            strict: false,
        }
    }

    pub fn float() -> Self {
        Schema::Primitive {
            kind: PrimitiveKind::Float,
            strict: false,
        }
    }

    pub fn boolean() -> Self {
        Schema::Primitive {
            kind: PrimitiveKind::Boolean,
            strict: false,
        }
    }

    pub fn string() -> Self {
        Schema::Primitive {
            kind: PrimitiveKind::String,
            strict: false,
        }
    }

    /// A primitive refined by constraints, e.g.
    /// `Schema::constrained(PrimitiveKind::String, vec![Constraint::MinLength(1)])`.
    pub fn constrained(kind: PrimitiveKind, rules: Vec<Constraint>) -> Self {
        Schema::Constrained {
            kind,
            strict: false,
            rules,
        }
    }

    /// Constrained primitive with coercion disabled.
    pub fn strict_constrained(kind: PrimitiveKind, rules: Vec<Constraint>) -> Self {
        Schema::Constrained {
            kind,
            strict: true,
            rules,
        }
    }

    /// A closed set of allowed scalar values, e.g. the positions
    /// `Schema::literal(["Chef", "Sous Chef", "Host"])`.
    pub fn literal<I, V>(values: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<LiteralValue>,
    {
        let values: Vec<LiteralValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(SchemaError::EmptyLiteral);
        }
        Ok(Schema::Literal(values))
    }

    pub fn optional(inner: Schema) -> Self {
        Schema::Optional(Box::new(inner))
    }

    pub fn list(element: Schema) -> Self {
        Schema::List {
            element: Box::new(element),
            min_items: None,
        }
    }

    /// A list with an inclusive lower bound on the number of valid
    /// elements.
    pub fn list_min(element: Schema, min_items: usize) -> Self {
        Schema::List {
            element: Box::new(element),
            min_items: Some(min_items),
        }
    }

    pub fn object(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }

    /// An untagged union: branches are tried in the given order.
    pub fn union(variants: Vec<Schema>) -> SchemaResult<Self> {
        if variants.is_empty() {
            return Err(SchemaError::EmptyUnion);
        }
        Ok(Schema::Union(UnionSchema::Untagged(variants)))
    }

    /// A union discriminated by a field: the branch whose tag equals the
    /// string value of `discriminator` is the only one validated.
    pub fn tagged_union<D, T, I>(discriminator: D, variants: I) -> SchemaResult<Self>
    where
        D: Into<String>,
        T: Into<String>,
        I: IntoIterator<Item = (T, Schema)>,
    {
        let mut map = IndexMap::new();
        for (tag, schema) in variants {
            let tag = tag.into();
            if map.contains_key(&tag) {
                return Err(SchemaError::DuplicateTag { tag });
            }
            map.insert(tag, schema);
        }
        if map.is_empty() {
            return Err(SchemaError::EmptyUnion);
        }
        Ok(Schema::Union(UnionSchema::Tagged {
            discriminator: discriminator.into(),
            variants: map,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_literal_and_union_are_build_errors() {
        assert!(matches!(
            Schema::literal(Vec::<&str>::new()),
            Err(SchemaError::EmptyLiteral)
        ));
        assert!(matches!(Schema::union(vec![]), Err(SchemaError::EmptyUnion)));
        assert!(matches!(
            Schema::tagged_union("kind", Vec::<(&str, Schema)>::new()),
            Err(SchemaError::EmptyUnion)
        ));
    }

    #[test]
    fn test_duplicate_union_tags_abort_construction() {
        let result = Schema::tagged_union(
            "kind",
            vec![("a", Schema::integer()), ("a", Schema::string())],
        );
        assert!(matches!(result, Err(SchemaError::DuplicateTag { tag }) if tag == "a"));
    }

    #[test]
    fn test_literal_value_display() {
        assert_eq!(LiteralValue::from("Chef").to_string(), "'Chef'");
        assert_eq!(LiteralValue::from(3i64).to_string(), "3");
        assert_eq!(LiteralValue::from(true).to_string(), "true");
    }
}
