//! # conform-core: The Standard Schema Contract
//!
//! This crate defines the vendor-neutral contract that lets any validation
//! library plug into the `conform` assertions. It owns no validation logic;
//! it only fixes the shapes that vendors produce and matchers consume.
//!
//! ## Key Design Principles
//!
//! 1. **The marker is the capability.** A value is a schema if and only if
//!    [`SchemaLike::standard_schema`] returns `Some`. Nothing else about its
//!    shape is assumed before delegation.
//!
//! 2. **Sync and async are distinct at the type level.** A vendor's
//!    `validate` returns a [`ValidateOutcome`], which is either an
//!    `Immediate` result or a `Deferred` future. Consumers inspect the tag
//!    and never have to guess.
//!
//! 3. **Issues are opaque.** [`Issue`] carries a message and an optional
//!    path exactly as the vendor emitted them. Consumers must not reorder,
//!    deduplicate, or rewrite them.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `conform-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod issue;
pub mod result;
pub mod standard;

// Re-export primary types for ergonomic imports.
pub use issue::{Issue, PathSegment};
pub use result::{DeferredResult, ValidateOutcome, ValidationResult};
pub use standard::{SchemaLike, StandardProps, StandardSchema, STANDARD_MARKER, STANDARD_VERSION};
