//! Root-relative paths locating errors in the source document
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde::ser::{Serialize, Serializer};
use std::fmt;

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Mapping field name
    Field(String),
    /// Sequence index
    Index(usize),
}

/// A root-relative location in the document, rendered in the familiar
/// `$.employees[0].name` form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The document root, rendered as `$`.
    pub fn root() -> Self {
        Self::default()
    }

    pub(crate) fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_as_dollar() {
        assert_eq!(Path::root().to_string(), "$");
        assert!(Path::root().is_root());
    }

    #[test]
    fn test_nested_rendering() {
        let path = Path::from_segments(vec![
            PathSegment::Field("employees".to_string()),
            PathSegment::Index(0),
            PathSegment::Field("name".to_string()),
        ]);
        assert_eq!(path.to_string(), "$.employees[0].name");
        assert!(!path.is_root());
    }
}
