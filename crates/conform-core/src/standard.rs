//! # The Standard Schema Interface
//!
//! A vendor implements [`StandardSchema`] to make its schemas usable by any
//! consumer of this contract. The interface is intentionally tiny:
//!
//! - [`StandardSchema::standard`] exposes the `~standard` marker props
//!   (contract version and vendor name).
//! - [`StandardSchema::validate`] checks a value and returns a
//!   [`ValidateOutcome`].
//!
//! ## Capability Check
//!
//! Consumers that accept "anything claiming to be a schema" take
//! `&dyn SchemaLike`. Every `StandardSchema` is `SchemaLike` and reports
//! itself through [`SchemaLike::standard_schema`]. Plain data (JSON values,
//! strings) is `SchemaLike` too, but carries no marker, so the probe returns
//! `None`. Consumers narrow with that probe and never guess at shape.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::ValidateOutcome;

/// Name of the marker property in the cross-language contract.
pub const STANDARD_MARKER: &str = "~standard";

/// Contract version implemented by this crate.
pub const STANDARD_VERSION: u32 = 1;

/// The `~standard` marker props.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandardProps {
    /// Contract version. Always [`STANDARD_VERSION`] for props built here.
    pub version: u32,
    /// Name of the library that implements the schema.
    pub vendor: String,
}

impl StandardProps {
    /// Marker props for `vendor` at the current contract version.
    pub fn new(vendor: impl Into<String>) -> Self {
        Self {
            version: STANDARD_VERSION,
            vendor: vendor.into(),
        }
    }
}

/// A schema implementing the standard schema contract.
pub trait StandardSchema: Send + Sync {
    /// The `~standard` marker props.
    fn standard(&self) -> &StandardProps;

    /// Validate `value`.
    ///
    /// Vendors whose validation path never suspends return
    /// [`ValidateOutcome::Immediate`].
    fn validate(&self, value: &Value) -> ValidateOutcome;
}

impl<S: StandardSchema + ?Sized> StandardSchema for &S {
    fn standard(&self) -> &StandardProps {
        (**self).standard()
    }

    fn validate(&self, value: &Value) -> ValidateOutcome {
        (**self).validate(value)
    }
}

impl<S: StandardSchema + ?Sized> StandardSchema for Box<S> {
    fn standard(&self) -> &StandardProps {
        (**self).standard()
    }

    fn validate(&self, value: &Value) -> ValidateOutcome {
        (**self).validate(value)
    }
}

impl<S: StandardSchema + ?Sized> StandardSchema for Arc<S> {
    fn standard(&self) -> &StandardProps {
        (**self).standard()
    }

    fn validate(&self, value: &Value) -> ValidateOutcome {
        (**self).validate(value)
    }
}

/// Anything that may be handed to a consumer as "the expected schema".
pub trait SchemaLike {
    /// Returns the schema when the value carries the standard marker.
    fn standard_schema(&self) -> Option<&dyn StandardSchema>;
}

impl<S: StandardSchema> SchemaLike for S {
    fn standard_schema(&self) -> Option<&dyn StandardSchema> {
        Some(self)
    }
}

impl<'a> SchemaLike for dyn StandardSchema + 'a {
    fn standard_schema(&self) -> Option<&dyn StandardSchema> {
        Some(self)
    }
}

impl SchemaLike for Value {
    fn standard_schema(&self) -> Option<&dyn StandardSchema> {
        None
    }
}

impl SchemaLike for str {
    fn standard_schema(&self) -> Option<&dyn StandardSchema> {
        None
    }
}

impl SchemaLike for String {
    fn standard_schema(&self) -> Option<&dyn StandardSchema> {
        None
    }
}
