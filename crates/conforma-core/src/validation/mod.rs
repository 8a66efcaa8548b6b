//! Validation: the engine walk, error types, and path bookkeeping
//!
//! The entry point is [`validate`], which walks an untyped
//! [`Node`](crate::document::Node) tree against a
//! [`Schema`](crate::schema::Schema) and returns an [`Outcome`]: either a
//! typed [`Value`](crate::value::Value) or a [`Report`] listing every
//! violation found, each located by a root-relative [`Path`].
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

pub mod engine;
pub mod error;
pub mod path;

pub use engine::validate;
pub use error::{ErrorKind, Outcome, Report, ValidationError};
pub use path::{Path, PathSegment};
