//! Object schemas: ordered fields and cross-field validator hooks
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::schema::{Schema, SchemaError, SchemaResult};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// A single declared field of an object schema.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: String,
    pub schema: Schema,
    /// Required fields must be present in the mapping; optional fields may
    /// be absent without producing a `MissingField` error.
    pub required: bool,
}

/// A relational check run against a fully assembled object.
///
/// Cross-field validators run only after every field validated on its own,
/// so the closure never sees a partially-invalid object. They run in
/// declaration order and the first rejection wins.
#[derive(Clone)]
pub struct CrossFieldValidator {
    name: String,
    check: Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>,
}

impl CrossFieldValidator {
    pub fn new<N, F>(name: N, check: F) -> Self
    where
        N: Into<String>,
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn check(&self, object: &Value) -> Result<(), String> {
        (self.check)(object)
    }
}

impl fmt::Debug for CrossFieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossFieldValidator")
            .field("name", &self.name)
            .finish()
    }
}

/// Declarative description of a mapping with a fixed set of fields.
///
/// Field order is caller-specified and preserved; it drives the order in
/// which errors are reported.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    fields: Vec<FieldSchema>,
    validators: Vec<CrossFieldValidator>,
    deny_unknown: bool,
}

impl ObjectSchema {
    pub fn builder() -> ObjectSchemaBuilder {
        ObjectSchemaBuilder::default()
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn validators(&self) -> &[CrossFieldValidator] {
        &self.validators
    }

    pub fn deny_unknown(&self) -> bool {
        self.deny_unknown
    }

    /// Whether `name` is a declared field of this object.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

/// Builder for [`ObjectSchema`]; `build` fails on duplicate field names.
#[derive(Debug, Default)]
pub struct ObjectSchemaBuilder {
    fields: Vec<FieldSchema>,
    validators: Vec<CrossFieldValidator>,
    deny_unknown: bool,
}

impl ObjectSchemaBuilder {
    /// Declare a required field.
    pub fn field<N: Into<String>>(mut self, name: N, schema: Schema) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            schema,
            required: true,
        });
        self
    }

    /// Declare a field that may be absent from the document.
    pub fn optional_field<N: Into<String>>(mut self, name: N, schema: Schema) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            schema,
            required: false,
        });
        self
    }

    /// Reject mapping keys that are not declared fields.
    pub fn deny_unknown_fields(mut self) -> Self {
        self.deny_unknown = true;
        self
    }

    /// Append a cross-field validator; validators run in this order.
    pub fn validator(mut self, validator: CrossFieldValidator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn build(self) -> SchemaResult<ObjectSchema> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(ObjectSchema {
            fields: self.fields,
            validators: self.validators,
            deny_unknown: self.deny_unknown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_field_order() {
        let object = ObjectSchema::builder()
            .field("zeta", Schema::string())
            .field("alpha", Schema::integer())
            .optional_field("extra", Schema::boolean())
            .build()
            .unwrap();
        let names: Vec<&str> = object.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "extra"]);
        assert!(object.fields()[0].required);
        assert!(!object.fields()[2].required);
    }

    #[test]
    fn test_duplicate_field_names_abort_construction() {
        let result = ObjectSchema::builder()
            .field("name", Schema::string())
            .field("name", Schema::integer())
            .build();
        assert!(matches!(result, Err(SchemaError::DuplicateField { name }) if name == "name"));
    }

    #[test]
    fn test_validator_names_and_order() {
        let object = ObjectSchema::builder()
            .field("n", Schema::integer())
            .validator(CrossFieldValidator::new("first", |_| Ok(())))
            .validator(CrossFieldValidator::new("second", |_| Ok(())))
            .build()
            .unwrap();
        let names: Vec<&str> = object.validators().iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
