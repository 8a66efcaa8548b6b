//! Validation error types and the aggregate report
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::document::Node;
use crate::validation::path::Path;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Classification of a single violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Node kind could not be converted to the expected primitive
    TypeMismatch,
    /// Coerced value failed a declared rule
    ConstraintViolation,
    /// Required object field is absent
    MissingField,
    /// No union branch accepted the node, or the tag was unrecognized
    UnionNoVariantMatched,
    /// Object-level relational rule rejected an otherwise-valid object
    CrossFieldViolation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TypeMismatch => write!(f, "type mismatch"),
            ErrorKind::ConstraintViolation => write!(f, "constraint violation"),
            ErrorKind::MissingField => write!(f, "missing field"),
            ErrorKind::UnionNoVariantMatched => write!(f, "no union variant matched"),
            ErrorKind::CrossFieldViolation => write!(f, "cross-field violation"),
        }
    }
}

/// A single violation found while walking the document, fully located by
/// its root-relative path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub path: Path,
    pub kind: ErrorKind,
    pub message: String,
    /// The offending document node, when one exists (a `MissingField` has
    /// none).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Node>,
}

impl ValidationError {
    pub fn new<M: Into<String>>(path: Path, kind: ErrorKind, message: M) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: Node) -> Self {
        self.value = Some(value);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The complete, ordered set of violations from one validation call.
///
/// Non-empty by construction: a report only exists when validation failed.
/// Errors appear in discovery order, which is depth-first declared
/// field/element order.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub struct Report {
    errors: Vec<ValidationError>,
}

impl Report {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty(), "a report must carry at least one error");
        Self { errors }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

/// The outcome of validating one document against one schema: exactly one
/// of a typed value or a non-empty error report.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Valid(T),
    Invalid(Report),
}

impl<T> Outcome<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid(_))
    }

    /// Convert to a `Result` so callers can use `?` at their boundary.
    pub fn into_result(self) -> Result<T, Report> {
        match self {
            Outcome::Valid(value) => Ok(value),
            Outcome::Invalid(report) => Err(report),
        }
    }

    /// The error report, if validation failed.
    pub fn report(&self) -> Option<&Report> {
        match self {
            Outcome::Valid(_) => None,
            Outcome::Invalid(report) => Some(report),
        }
    }
}
