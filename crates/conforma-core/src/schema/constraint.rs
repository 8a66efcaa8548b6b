//! Reusable post-coercion constraint predicates
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::schema::{SchemaError, SchemaResult};
use crate::value::Value;
use regex::Regex;

/// A named predicate applied to a value after coercion succeeds.
///
/// Constraints are pure: they see only the coerced value, never sibling
/// fields. Relationships between fields belong in a
/// [`CrossFieldValidator`](crate::schema::CrossFieldValidator).
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Inclusive lower bound on string code-point count or collection size
    MinLength(usize),
    /// Inclusive upper bound on string code-point count or collection size
    MaxLength(usize),
    /// Full-string regular-expression match (not search semantics)
    Pattern { regex: Regex, pattern: String },
    /// Inclusive numeric lower bound
    MinValue(f64),
}

impl Constraint {
    /// Build a `Pattern` constraint, compiling and anchoring the regex
    /// once at schema-build time.
    pub fn pattern(pattern: &str) -> SchemaResult<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            SchemaError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Constraint::Pattern {
            regex,
            pattern: pattern.to_string(),
        })
    }

    /// Apply the predicate; `Err` carries the human-readable message used
    /// in the resulting `ConstraintViolation`.
    pub(crate) fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            Constraint::MinLength(min) => {
                let len = element_count(value)?;
                if len < *min {
                    Err(format!("length {} is shorter than min_length {}", len, min))
                } else {
                    Ok(())
                }
            }
            Constraint::MaxLength(max) => {
                let len = element_count(value)?;
                if len > *max {
                    Err(format!("length {} is longer than max_length {}", len, max))
                } else {
                    Ok(())
                }
            }
            Constraint::Pattern { regex, pattern } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| "pattern constraint requires a string value".to_string())?;
                if regex.is_match(text) {
                    Ok(())
                } else {
                    Err(format!("'{}' does not match pattern '{}'", text, pattern))
                }
            }
            Constraint::MinValue(min) => {
                let number = value
                    .as_f64()
                    .ok_or_else(|| "min_value constraint requires a numeric value".to_string())?;
                if number < *min {
                    Err(format!("value {} is smaller than min_value {}", number, min))
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn element_count(value: &Value) -> Result<usize, String> {
    match value {
        Value::String(s) => Ok(s.chars().count()),
        Value::List(items) => Ok(items.len()),
        Value::Object(map) => Ok(map.len()),
        other => Err(format!(
            "length constraint requires a string or collection, got {:?}",
            other
        )),
    }
}
