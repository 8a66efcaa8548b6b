//! Typed value tree produced by a successful validation
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::document::{Node, Number};
use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

/// A fully typed, constraint-checked value.
///
/// Built by the engine only when validation succeeds, and owned by the
/// caller from then on. `Null` is the explicit no-value representation
/// used by `Optional` schemas; absent optional fields are simply omitted
/// from `Object` entries.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field on an object value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(field))
    }

    /// Re-serialize this value into the untyped document representation,
    /// e.g. to feed the output of one validation back into another.
    pub fn to_node(&self) -> Node {
        match self {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(*b),
            Value::Int(i) => Node::Number(Number::Int(*i)),
            Value::Float(f) => Node::Number(Number::Float(*f)),
            Value::String(s) => Node::String(s.clone()),
            Value::List(items) => Node::Sequence(items.iter().map(Value::to_node).collect()),
            Value::Object(map) => Node::Mapping(
                map.iter().map(|(k, v)| (k.clone(), v.to_node())).collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => items.serialize(serializer),
            Value::Object(map) => map.serialize(serializer),
        }
    }
}
