//! # Schema Matcher Errors
//!
//! Both variants are programmer errors: the assertion was invoked with an
//! argument it cannot work with. They are raised as `Err`, never reported
//! as a failed assertion, so a broken test is not mistaken for a value that
//! does not conform.

use thiserror::Error;

/// Programmer error raised by [`to_match_schema`](crate::to_match_schema).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaMatchError {
    /// The expected argument does not carry the standard schema marker.
    #[error("Expected schema does not implement standard schema")]
    NotAStandardSchema,

    /// The schema's `validate` returned a deferred result.
    #[error("Schema validation must be synchronous")]
    AsynchronousValidationUnsupported {
        /// Vendor of the offending schema.
        vendor: String,
    },
}
