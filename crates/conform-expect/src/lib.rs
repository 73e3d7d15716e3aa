//! # conform-expect: Expectation API
//!
//! A small, synchronous expectation API in the style of `expect(value)`
//! assertion libraries, built around one extension point: the raw matcher.
//!
//! ## Pieces
//!
//! - [`expect`] / [`Expectation`]: capture a received value, negate with
//!   [`Expectation::not`], assert with `satisfy`, `to_equal`, or any
//!   extension trait built on [`Expectation::try_satisfy`].
//! - [`RawMatcher`]: the single calling convention shared by direct
//!   assertions and embedded asymmetric matchers.
//! - [`Expected`] plus [`object_containing`], [`array_containing`],
//!   [`any_value`], [`asymmetric`]: structural expectations.
//! - [`MatcherUtils`]: message formatting (`matcher_hint`,
//!   `print_received`, `bold`, ...), configured by [`PrintConfig`].
//!
//! ## Error Classes
//!
//! A failed assertion and a misused matcher are different errors
//! ([`ExpectError::Assertion`] vs [`ExpectError::Matcher`]). Panicking
//! assertion forms panic with the text of either.
//!
//! ## Crate Policy
//!
//! - Knows nothing about schemas; schema assertions live in `conform-matcher`.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod expect;
pub mod expected;
pub mod logging;
pub mod matcher;
pub mod print;

pub use config::PrintConfig;
pub use error::ExpectError;
pub use expect::{expect, Expectation};
pub use expected::{any_value, array_containing, asymmetric, object_containing, AsymmetricMatcher, Expected};
pub use logging::init_test_tracing;
pub use matcher::{MatchResult, MatcherContext, MatcherError, RawMatcher};
pub use print::MatcherUtils;
