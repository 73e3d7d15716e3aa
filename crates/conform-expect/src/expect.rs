//! # Expectations
//!
//! [`expect`] captures a received value; assertion methods on the returned
//! [`Expectation`] evaluate it. Every assertion comes in two forms:
//!
//! - `try_*` returns `Result<(), ExpectError>`, for code that needs to
//!   inspect a failure (including tests of matchers themselves).
//! - the plain form panics with the failure message, for use in tests.
//!
//! Extension crates add assertions by writing a raw matcher and calling
//! [`Expectation::try_satisfy`] from an extension trait.

use serde::Serialize;
use serde_json::Value;

use crate::config::PrintConfig;
use crate::error::ExpectError;
use crate::expected::Expected;
use crate::matcher::{MatchResult, MatcherContext, MatcherError, RawMatcher};

/// A received value awaiting an assertion.
#[derive(Debug)]
#[must_use = "an expectation does nothing until an assertion method is called"]
pub struct Expectation {
    received: Result<Value, serde_json::Error>,
    is_not: bool,
    config: PrintConfig,
}

/// Start an expectation on `value`.
///
/// The value is converted to JSON once, here. Conversion failures surface
/// when an assertion runs.
pub fn expect<T: Serialize>(value: T) -> Expectation {
    Expectation {
        received: serde_json::to_value(value),
        is_not: false,
        config: PrintConfig::default(),
    }
}

impl Expectation {
    /// Negate the assertion that follows.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.is_not = !self.is_not;
        self
    }

    /// Render failure messages with `config`.
    pub fn with_config(mut self, config: PrintConfig) -> Self {
        self.config = config;
        self
    }

    /// True when the next assertion is negated.
    pub fn is_negated(&self) -> bool {
        self.is_not
    }

    /// Evaluate a raw matcher against the received value.
    ///
    /// # Errors
    ///
    /// - [`ExpectError::Matcher`] if the matcher raised a programmer error.
    /// - [`ExpectError::Assertion`] if the (possibly negated) assertion failed.
    /// - [`ExpectError::Serialize`] if the received value was not JSON-representable.
    pub fn try_satisfy<E, M>(self, name: &'static str, matcher: M, expected: &E) -> Result<(), ExpectError>
    where
        E: ?Sized,
        M: RawMatcher<E>,
    {
        let Self {
            received,
            is_not,
            config,
        } = self;
        let received = received?;
        let ctx = MatcherContext::new(is_not, config);

        tracing::trace!(matcher = name, negated = is_not, "evaluating matcher");
        let result = matcher
            .evaluate(&ctx, &received, expected)
            .map_err(|source| {
                tracing::debug!(matcher = name, error = %source, "matcher raised");
                ExpectError::Matcher { name, source }
            })?;

        if result.pass != is_not {
            return Ok(());
        }

        let message = result.message();
        let message = if message.is_empty() {
            format!(
                "{}\n\nReceived: {}",
                ctx.utils.matcher_hint(name, is_not),
                ctx.utils.print_received(&received),
            )
        } else {
            message
        };
        Err(ExpectError::Assertion(message))
    }

    /// Panicking form of [`Expectation::try_satisfy`].
    #[track_caller]
    pub fn satisfy<E, M>(self, name: &'static str, matcher: M, expected: &E)
    where
        E: ?Sized,
        M: RawMatcher<E>,
    {
        if let Err(err) = self.try_satisfy(name, matcher, expected) {
            panic!("{err}");
        }
    }

    /// Assert structural equality, with asymmetric matchers allowed anywhere
    /// in `expected`.
    ///
    /// # Errors
    ///
    /// As [`Expectation::try_satisfy`]. Programmer errors raised by embedded
    /// matchers are reported as [`ExpectError::Matcher`].
    pub fn try_to_equal(self, expected: impl Into<Expected>) -> Result<(), ExpectError> {
        let expected = expected.into();
        self.try_satisfy("to_equal", to_equal, &expected)
    }

    /// Panicking form of [`Expectation::try_to_equal`].
    #[track_caller]
    pub fn to_equal(self, expected: impl Into<Expected>) {
        if let Err(err) = self.try_to_equal(expected) {
            panic!("{err}");
        }
    }
}

/// Raw matcher behind [`Expectation::to_equal`].
pub fn to_equal(
    ctx: &MatcherContext,
    received: &Value,
    expected: &Expected,
) -> Result<MatchResult, MatcherError> {
    if expected.matches(received, ctx)? {
        return Ok(MatchResult::passed());
    }

    let utils = ctx.utils.clone();
    let is_not = ctx.is_not;
    let received = received.clone();
    let expected = expected.to_display_value();
    Ok(MatchResult::new(false, move || {
        format!(
            "{}\n\nExpected: {}\nReceived: {}",
            utils.matcher_hint("to_equal", is_not),
            utils.print_expected(&expected),
            utils.print_received(&received),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expected::{any_value, object_containing};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::convert::Infallible;

    fn is_string(
        _ctx: &MatcherContext,
        received: &Value,
        _expected: &(),
    ) -> Result<MatchResult, Infallible> {
        if received.is_string() {
            Ok(MatchResult::passed())
        } else {
            let shown = received.clone();
            Ok(MatchResult::new(false, move || format!("{shown} is not a string")))
        }
    }

    #[test]
    fn test_satisfy_pass() {
        expect("hello").satisfy("is_string", is_string, &());
    }

    #[test]
    fn test_try_satisfy_failure_message() {
        let err = expect(42).try_satisfy("is_string", is_string, &()).unwrap_err();
        assert!(err.is_assertion());
        assert_eq!(err.to_string(), "42 is not a string");
    }

    #[test]
    fn test_negated_pass_gets_generic_message() {
        let err = expect("hello")
            .not()
            .try_satisfy("is_string", is_string, &())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("expect(received).not.is_string(expected)"), "{message}");
        assert!(message.contains("Received: \"hello\""), "{message}");
    }

    #[test]
    fn test_negated_failure_passes() {
        expect(42).not().satisfy("is_string", is_string, &());
    }

    #[test]
    fn test_double_not_cancels() {
        let expectation = expect(1).not().not();
        assert!(!expectation.is_negated());
    }

    #[test]
    #[should_panic(expected = "42 is not a string")]
    fn test_satisfy_panics_with_message() {
        expect(42).satisfy("is_string", is_string, &());
    }

    #[test]
    fn test_serialize_error_surfaces() {
        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], "non-string key");
        let err = expect(&bad).try_to_equal(json!({})).unwrap_err();
        assert!(matches!(err, ExpectError::Serialize(_)), "{err:?}");
    }

    #[test]
    fn test_to_equal_with_matchers() {
        expect(json!({ "id": 3, "name": "John", "age": 30 }))
            .to_equal(object_containing([("id", any_value())]));
    }

    #[test]
    fn test_to_equal_failure_lists_both_sides() {
        let err = expect(json!({ "a": 1 }))
            .try_to_equal(json!({ "a": 2 }))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expect(received).to_equal(expected)"));
        assert!(message.contains("\"a\": 2"));
        assert!(message.contains("\"a\": 1"));
    }

    #[test]
    fn test_not_to_equal() {
        expect(json!([1, 2])).not().to_equal(json!([2, 1]));
    }
}
