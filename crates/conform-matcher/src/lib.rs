//! # conform-matcher: Schema Assertions
//!
//! Provides `to_match_schema`, an assertion that a value conforms to any
//! schema implementing the standard schema contract from `conform-core`.
//!
//! ```ignore
//! use conform_expect::{expect, object_containing};
//! use conform_matcher::{match_schema, SchemaMatchers};
//!
//! expect(&user).to_match_schema(&user_schema);
//! expect(&response).to_equal(object_containing([("user", match_schema(user_schema))]));
//! ```
//!
//! ## Contract
//!
//! - A value that does not conform is an ordinary assertion failure. The
//!   message shows the received value and the vendor's issues verbatim, in
//!   vendor order.
//! - An expected argument without the standard marker, or a schema whose
//!   validation is asynchronous, is a programmer error
//!   ([`SchemaMatchError`]), never a failed assertion.
//! - The matcher holds no state between calls. The same value and schema
//!   always produce the same outcome and message.
//!
//! ## Crate Policy
//!
//! - Depends on vendors only through `conform-core`; never branches on
//!   vendor name or contract version.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod ext;
pub mod matcher;

pub use error::SchemaMatchError;
pub use ext::{match_schema, SchemaMatchers};
pub use matcher::{as_standard_schema, mismatch_message, to_match_schema, MATCHER_NAME, MISMATCH_LEAD};
