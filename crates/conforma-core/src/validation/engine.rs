//! The coercion and validation engine
//!
//! A single synchronous, depth-first walk of the document against the
//! schema. Within one object or list every child is visited and every
//! child error collected; short-circuiting happens only inside a single
//! value's ordered constraint list and across the cross-field validators
//! of one object. The walk performs no I/O and mutates nothing but its own
//! path stack and error list, so schemas and documents can be shared
//! freely across concurrent calls.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::document::{Node, Number};
use crate::schema::{ObjectSchema, PrimitiveKind, Schema, UnionSchema};
use crate::validation::error::{ErrorKind, Outcome, Report, ValidationError};
use crate::validation::path::{Path, PathSegment};
use crate::value::Value;
use indexmap::IndexMap;

/// Validate a document against a schema, producing either a fully typed
/// value or the complete ordered set of violations.
///
/// # Examples
///
/// ```rust
/// use conforma_core::document::Node;
/// use conforma_core::schema::Schema;
/// use conforma_core::validation::validate;
/// use conforma_core::value::Value;
///
/// let node = Node::from_yaml_str("'123'").unwrap();
/// assert_eq!(
///     validate(&node, &Schema::integer()).into_result().unwrap(),
///     Value::Int(123),
/// );
/// assert!(!validate(&node, &Schema::strict_integer()).is_valid());
/// ```
pub fn validate(node: &Node, schema: &Schema) -> Outcome<Value> {
    let mut walker = Walker::new();
    let value = walker.walk(node, schema);
    match value {
        Some(value) if walker.errors.is_empty() => Outcome::Valid(value),
        _ => Outcome::Invalid(Report::new(walker.errors)),
    }
}

/// Per-call mutable state: the current path and the errors found so far.
///
/// Invariant: `walk` returns `None` if and only if it pushed at least one
/// error (directly or in a subtree).
struct Walker {
    path: Vec<PathSegment>,
    errors: Vec<ValidationError>,
}

impl Walker {
    fn new() -> Self {
        Self {
            path: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scratch walker for union branch trials: same location, private
    /// error list.
    fn scratch(&self) -> Self {
        Self {
            path: self.path.clone(),
            errors: Vec::new(),
        }
    }

    fn current_path(&self) -> Path {
        Path::from_segments(self.path.clone())
    }

    fn error<M: Into<String>>(&mut self, kind: ErrorKind, message: M) {
        self.errors
            .push(ValidationError::new(self.current_path(), kind, message));
    }

    fn error_with_value<M: Into<String>>(&mut self, kind: ErrorKind, message: M, node: &Node) {
        self.errors.push(
            ValidationError::new(self.current_path(), kind, message).with_value(node.clone()),
        );
    }

    fn walk(&mut self, node: &Node, schema: &Schema) -> Option<Value> {
        match schema {
            Schema::Primitive { kind, strict } => self.coerce_primitive(node, *kind, *strict),
            Schema::Constrained {
                kind,
                strict,
                rules,
            } => {
                let value = self.coerce_primitive(node, *kind, *strict)?;
                for rule in rules {
                    if let Err(message) = rule.check(&value) {
                        self.error_with_value(ErrorKind::ConstraintViolation, message, node);
                        return None;
                    }
                }
                Some(value)
            }
            Schema::Literal(allowed) => self.match_literal(node, allowed),
            Schema::Optional(inner) => match node {
                Node::Null => Some(Value::Null),
                other => self.walk(other, inner),
            },
            Schema::List { element, min_items } => self.walk_list(node, element, *min_items),
            Schema::Object(object) => self.walk_object(node, object),
            Schema::Union(union) => self.walk_union(node, union),
        }
    }

    fn coerce_primitive(
        &mut self,
        node: &Node,
        kind: PrimitiveKind,
        strict: bool,
    ) -> Option<Value> {
        match kind {
            PrimitiveKind::Integer | PrimitiveKind::PositiveInteger => {
                let parsed = match node {
                    Node::Number(Number::Int(i)) => Some(*i),
                    // full-string parse only; partial parses fall through
                    // to the type mismatch below
                    Node::String(s) if !strict => {
                        let coerced = s.parse::<i64>().ok();
                        if coerced.is_some() {
                            log::trace!("coerced string '{}' to integer at {}", s, self.current_path());
                        }
                        coerced
                    }
                    _ => None,
                };
                match parsed {
                    Some(i) if kind == PrimitiveKind::PositiveInteger && i <= 0 => {
                        self.error_with_value(
                            ErrorKind::ConstraintViolation,
                            format!("expected a positive integer, got {}", i),
                            node,
                        );
                        None
                    }
                    Some(i) => Some(Value::Int(i)),
                    None => {
                        self.type_mismatch(node, kind.expected_name());
                        None
                    }
                }
            }
            PrimitiveKind::Float => {
                let parsed = match node {
                    Node::Number(Number::Float(f)) => Some(*f),
                    // integers widen to float; strict mode demands an
                    // exact float node
                    Node::Number(Number::Int(i)) if !strict => Some(*i as f64),
                    Node::String(s) if !strict => s.parse::<f64>().ok(),
                    _ => None,
                };
                match parsed {
                    Some(f) => Some(Value::Float(f)),
                    None => {
                        self.type_mismatch(node, kind.expected_name());
                        None
                    }
                }
            }
            PrimitiveKind::Boolean => match node {
                Node::Bool(b) => Some(Value::Bool(*b)),
                other => {
                    self.type_mismatch(other, kind.expected_name());
                    None
                }
            },
            PrimitiveKind::String => match node {
                Node::String(s) => Some(Value::String(s.clone())),
                other => {
                    self.type_mismatch(other, kind.expected_name());
                    None
                }
            },
        }
    }

    fn type_mismatch(&mut self, node: &Node, expected: &str) {
        self.error_with_value(
            ErrorKind::TypeMismatch,
            format!("expected {}, got {}", expected, node.kind()),
            node,
        );
    }

    fn match_literal(
        &mut self,
        node: &Node,
        allowed: &[crate::schema::LiteralValue],
    ) -> Option<Value> {
        use crate::schema::LiteralValue;

        let matched = allowed.iter().find(|literal| match (literal, node) {
            (LiteralValue::Bool(b), Node::Bool(n)) => b == n,
            (LiteralValue::Int(i), Node::Number(Number::Int(n))) => i == n,
            (LiteralValue::String(s), Node::String(n)) => s == n,
            _ => false,
        });
        match matched {
            Some(LiteralValue::Bool(b)) => Some(Value::Bool(*b)),
            Some(LiteralValue::Int(i)) => Some(Value::Int(*i)),
            Some(LiteralValue::String(s)) => Some(Value::String(s.clone())),
            None => {
                let listing = allowed
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                self.error_with_value(
                    ErrorKind::TypeMismatch,
                    format!("expected one of {}, got {}", listing, describe_scalar(node)),
                    node,
                );
                None
            }
        }
    }

    fn walk_list(
        &mut self,
        node: &Node,
        element: &Schema,
        min_items: Option<usize>,
    ) -> Option<Value> {
        let Node::Sequence(items) = node else {
            // element-wise validation of a non-list is meaningless
            self.type_mismatch(node, "sequence");
            return None;
        };

        let before = self.errors.len();
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push(PathSegment::Index(index));
            if let Some(value) = self.walk(item, element) {
                values.push(value);
            }
            self.path.pop();
        }

        // the bound counts elements that actually validated
        if let Some(min) = min_items {
            if values.len() < min {
                self.error(
                    ErrorKind::ConstraintViolation,
                    format!(
                        "list has {} valid item(s), fewer than min_items {}",
                        values.len(),
                        min
                    ),
                );
            }
        }

        if self.errors.len() > before {
            None
        } else {
            Some(Value::List(values))
        }
    }

    fn walk_object(&mut self, node: &Node, object: &ObjectSchema) -> Option<Value> {
        let Node::Mapping(map) = node else {
            self.type_mismatch(node, "mapping");
            return None;
        };

        let before = self.errors.len();
        let mut fields = IndexMap::new();
        for field in object.fields() {
            match map.get(&field.name) {
                None => {
                    let absence_allowed =
                        !field.required || matches!(field.schema, Schema::Optional(_));
                    if !absence_allowed {
                        self.path.push(PathSegment::Field(field.name.clone()));
                        self.error(
                            ErrorKind::MissingField,
                            format!("required field '{}' is missing", field.name),
                        );
                        self.path.pop();
                    }
                }
                Some(child) => {
                    self.path.push(PathSegment::Field(field.name.clone()));
                    if let Some(value) = self.walk(child, &field.schema) {
                        fields.insert(field.name.clone(), value);
                    }
                    self.path.pop();
                }
            }
        }

        if object.deny_unknown() {
            for key in map.keys() {
                if !object.has_field(key) {
                    self.path.push(PathSegment::Field(key.clone()));
                    self.error(
                        ErrorKind::ConstraintViolation,
                        format!("unknown field '{}' is not permitted", key),
                    );
                    self.path.pop();
                }
            }
        }

        if self.errors.len() > before {
            return None;
        }

        // every field validated on its own; only now may the relational
        // rules see the object
        let assembled = Value::Object(fields);
        for validator in object.validators() {
            if let Err(message) = validator.check(&assembled) {
                self.error(
                    ErrorKind::CrossFieldViolation,
                    format!("{}: {}", validator.name(), message),
                );
                return None;
            }
        }
        Some(assembled)
    }

    fn walk_union(&mut self, node: &Node, union: &UnionSchema) -> Option<Value> {
        match union {
            UnionSchema::Untagged(branches) => {
                let mut first_branch_errors = Vec::new();
                for (index, branch) in branches.iter().enumerate() {
                    let mut trial = self.scratch();
                    let value = trial.walk(node, branch);
                    if let Some(value) = value {
                        if trial.errors.is_empty() {
                            log::debug!(
                                "untagged union at {} matched branch {}",
                                self.current_path(),
                                index
                            );
                            return Some(value);
                        }
                    }
                    if index == 0 {
                        first_branch_errors = trial.errors;
                    }
                }
                // ambiguity is the schema author's problem; report the
                // first-listed branch only
                if first_branch_errors.is_empty() {
                    self.error_with_value(
                        ErrorKind::UnionNoVariantMatched,
                        "no union variant matched",
                        node,
                    );
                } else {
                    self.errors.extend(first_branch_errors);
                }
                None
            }
            UnionSchema::Tagged {
                discriminator,
                variants,
            } => {
                let Node::Mapping(map) = node else {
                    self.type_mismatch(node, "mapping");
                    return None;
                };
                match map.get(discriminator) {
                    None => {
                        self.error_with_value(
                            ErrorKind::UnionNoVariantMatched,
                            format!("missing discriminator field '{}'", discriminator),
                            node,
                        );
                        None
                    }
                    Some(Node::String(tag)) => match variants.get(tag) {
                        Some(branch) => {
                            log::debug!(
                                "tagged union at {} selected variant '{}'",
                                self.current_path(),
                                tag
                            );
                            self.walk(node, branch)
                        }
                        None => {
                            let known = variants.keys().cloned().collect::<Vec<_>>().join(", ");
                            self.error_with_value(
                                ErrorKind::UnionNoVariantMatched,
                                format!(
                                    "unrecognized tag '{}' for discriminator '{}' (known tags: {})",
                                    tag, discriminator, known
                                ),
                                node,
                            );
                            None
                        }
                    },
                    Some(other) => {
                        self.error_with_value(
                            ErrorKind::UnionNoVariantMatched,
                            format!(
                                "discriminator field '{}' must be a string, got {}",
                                discriminator,
                                other.kind()
                            ),
                            other,
                        );
                        None
                    }
                }
            }
        }
    }
}

fn describe_scalar(node: &Node) -> String {
    match node {
        Node::Bool(b) => b.to_string(),
        Node::Number(Number::Int(i)) => i.to_string(),
        Node::Number(Number::Float(f)) => f.to_string(),
        Node::String(s) => format!("'{}'", s),
        other => other.kind().to_string(),
    }
}
