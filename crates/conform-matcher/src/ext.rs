//! # Registration with the Expectation API
//!
//! The same [`to_match_schema`] raw matcher is exposed in both positions:
//!
//! - directly, through the [`SchemaMatchers`] extension trait on
//!   [`Expectation`]: `expect(&user).to_match_schema(&schema)`;
//! - embedded, through [`match_schema`], inside any structural expectation:
//!   `expect(&body).to_equal(object_containing([("user", match_schema(schema))]))`.

use conform_core::SchemaLike;
use conform_expect::{asymmetric, ExpectError, Expectation, Expected};

use crate::matcher::{to_match_schema, MATCHER_NAME};

/// Schema assertions on [`Expectation`].
pub trait SchemaMatchers {
    /// Assert that the received value conforms to `schema`.
    ///
    /// # Errors
    ///
    /// [`ExpectError::Assertion`] when the value does not conform (or does,
    /// under `.not()`); [`ExpectError::Matcher`] when `schema` is not a
    /// standard schema or validates asynchronously.
    fn try_to_match_schema<S>(self, schema: &S) -> Result<(), ExpectError>
    where
        S: SchemaLike + ?Sized;

    /// Panicking form of [`SchemaMatchers::try_to_match_schema`].
    fn to_match_schema<S>(self, schema: &S)
    where
        S: SchemaLike + ?Sized;
}

impl SchemaMatchers for Expectation {
    fn try_to_match_schema<S>(self, schema: &S) -> Result<(), ExpectError>
    where
        S: SchemaLike + ?Sized,
    {
        self.try_satisfy(MATCHER_NAME, to_match_schema::<S>, schema)
    }

    #[track_caller]
    fn to_match_schema<S>(self, schema: &S)
    where
        S: SchemaLike + ?Sized,
    {
        if let Err(err) = self.try_to_match_schema(schema) {
            panic!("{err}");
        }
    }
}

/// An asymmetric matcher that accepts values conforming to `schema`.
///
/// Evaluates [`to_match_schema`] through the same calling convention as the
/// direct assertion. Programmer errors propagate out of the enclosing
/// assertion as [`ExpectError::Matcher`].
pub fn match_schema<S>(schema: S) -> Expected
where
    S: SchemaLike + Send + Sync + 'static,
{
    asymmetric(MATCHER_NAME, to_match_schema::<S>, schema)
}
