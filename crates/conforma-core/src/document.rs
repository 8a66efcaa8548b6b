//! Untyped document tree produced by the deserializer boundary
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

/// A scalar numeric value, keeping the integer/float distinction that the
/// deserializer observed in the source text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Written without a fractional part
    Int(i64),
    /// Written with a fractional part or exponent
    Float(f64),
}

/// An untyped document node.
///
/// This is the intermediate representation handed to the validation engine
/// by an external YAML/JSON deserializer. Mapping keys are unique and keep
/// their insertion order so diagnostics line up with the source document.
/// Nodes are immutable once built; the engine only reads them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Node>),
    Mapping(IndexMap<String, Node>),
}

impl Node {
    /// Human-readable name of this node's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(Number::Int(_)) => "integer",
            Node::Number(Number::Float(_)) => "float",
            Node::String(_) => "string",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    /// Parse a JSON document into a node tree.
    pub fn from_json_str(content: &str) -> ParseResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Ok(Node::from(value))
    }

    /// Parse a YAML document into a node tree.
    ///
    /// YAML is parsed with `serde_yaml` first to surface YAML-specific
    /// errors, then bridged through `serde_json::Value` for uniform
    /// handling.
    pub fn from_yaml_str(content: &str) -> ParseResult<Self> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let json_value = serde_json::to_value(yaml_value)?;
        Ok(Node::from(json_value))
    }
}

/// Errors raised while deserializing source text into a node tree
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for deserializer-boundary operations
pub type ParseResult<T> = Result<T, ParseError>;

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Number(Number::Int(i))
                } else {
                    // u64 beyond i64::MAX or a true float
                    Node::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Array(items) => {
                Node::Sequence(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::Object(map) => Node::Mapping(
                map.into_iter().map(|(k, v)| (k, Node::from(v))).collect(),
            ),
        }
    }
}

impl From<&Node> for serde_json::Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Null => serde_json::Value::Null,
            Node::Bool(b) => serde_json::Value::Bool(*b),
            Node::Number(Number::Int(i)) => serde_json::Value::from(*i),
            Node::Number(Number::Float(f)) => serde_json::Value::from(*f),
            Node::String(s) => serde_json::Value::String(s.clone()),
            Node::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Node::Mapping(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            Node::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Node::String(s) => serializer.serialize_str(s),
            Node::Sequence(items) => items.serialize(serializer),
            Node::Mapping(map) => map.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_numbers_keep_int_float_distinction() {
        let node = Node::from_json_str(r#"{"a": 1, "b": 1.5}"#).unwrap();
        let Node::Mapping(map) = node else {
            panic!("expected mapping");
        };
        assert_eq!(map["a"], Node::Number(Number::Int(1)));
        assert_eq!(map["b"], Node::Number(Number::Float(1.5)));
    }

    #[test]
    fn test_yaml_mapping_preserves_insertion_order() {
        let node = Node::from_yaml_str("zeta: 1\nalpha: 2\nmiddle: 3\n").unwrap();
        let Node::Mapping(map) = node else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "middle"]);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Node::Null.kind(), "null");
        assert_eq!(Node::Bool(true).kind(), "boolean");
        assert_eq!(Node::Number(Number::Int(3)).kind(), "integer");
        assert_eq!(Node::Number(Number::Float(3.0)).kind(), "float");
        assert_eq!(Node::String("x".into()).kind(), "string");
        assert_eq!(Node::Sequence(vec![]).kind(), "sequence");
        assert_eq!(Node::Mapping(IndexMap::new()).kind(), "mapping");
    }

    #[test]
    fn test_round_trip_through_json_value() {
        let node = Node::from_yaml_str("name: Dine-n-Dash\nseats: 22\nto_go: false\n").unwrap();
        let value = serde_json::Value::from(&node);
        assert_eq!(Node::from(value), node);
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        assert!(Node::from_yaml_str("a: [unclosed").is_err());
        assert!(Node::from_json_str("{not json").is_err());
    }
}
