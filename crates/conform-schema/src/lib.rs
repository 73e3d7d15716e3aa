//! # conform-schema: Standard Schema Vendors
//!
//! Implementations of the standard schema contract from `conform-core`,
//! usable with `conform-matcher`'s `to_match_schema` or on their own.
//!
//! ## JSON Schema (`json`, `registry`)
//!
//! - [`JsonSchema`] compiles an inline JSON Schema document with the
//!   `jsonschema` crate. Formats are asserted.
//! - [`SchemaRegistry`] loads a directory of `*.schema.json` / `*.schema.yaml`
//!   files and compiles them by filename, resolving cross-schema `$ref`s
//!   from the loaded set without network access.
//!
//! ## Serde types (`typed`)
//!
//! - [`TypedSchema<T>`] accepts values that deserialize into `T` and pass
//!   the registered refinements. The validated value is `T` re-serialized.
//!
//! ## Crate Policy
//!
//! - Depends only on `conform-core` internally.
//! - Validation never errors; non-conforming values produce issues.
//! - Schema loading and compilation errors are structured
//!   ([`SchemaBuildError`]).

pub mod error;
pub mod json;
pub mod registry;
pub mod typed;

pub use error::SchemaBuildError;
pub use json::JsonSchema;
pub use registry::SchemaRegistry;
pub use typed::TypedSchema;
