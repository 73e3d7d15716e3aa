//! # Schema Build Errors
//!
//! Errors raised while loading or compiling a schema. Validation itself
//! never errors: a non-conforming value is a `Failure` result with issues.

use thiserror::Error;

/// Error while loading or compiling a schema.
#[derive(Error, Debug)]
pub enum SchemaBuildError {
    /// A schema file could not be read or parsed.
    #[error("schema load error for '{schema_name}': {reason}")]
    Load {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// No schema with this name is registered.
    #[error("schema '{schema_name}' not found in {dir}")]
    NotFound {
        /// Requested schema filename.
        schema_name: String,
        /// Directory the registry was loaded from.
        dir: String,
    },

    /// The schema is not a valid JSON Schema, or a `$ref` did not resolve.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    Build {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// IO error reading the schema directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
