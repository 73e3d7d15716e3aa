//! # Raw Matchers
//!
//! The single calling convention every assertion goes through, whether it
//! runs directly (`expect(v).satisfy(..)`) or embedded as an asymmetric
//! matcher inside [`to_equal`](crate::Expectation::to_equal):
//!
//! ```text
//! (ctx: &MatcherContext, received: &Value, expected: &E) -> Result<MatchResult, Err>
//! ```
//!
//! - `Ok(MatchResult)` is a normal evaluation. `pass` states whether the
//!   received value satisfies the expectation *before* negation; the host
//!   applies `.not()` itself.
//! - `Err(_)` is a programmer error: the matcher was invoked incorrectly.
//!   It is never folded into pass/fail.

use std::fmt;

use serde_json::Value;

use crate::config::PrintConfig;
use crate::print::MatcherUtils;

/// Boxed programmer error raised by a raw matcher.
pub type MatcherError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of one matcher evaluation.
///
/// The message is a producer so that formatting cost is only paid when a
/// failure is actually reported.
pub struct MatchResult {
    /// Whether the received value satisfies the matcher.
    pub pass: bool,
    message: Box<dyn Fn() -> String + Send + Sync>,
}

impl MatchResult {
    /// A result with a lazily produced message.
    pub fn new<F>(pass: bool, message: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            pass,
            message: Box::new(message),
        }
    }

    /// A passing result with an empty message. The host renders its own
    /// message if the pass turns into a failure under `.not()`.
    pub fn passed() -> Self {
        Self::new(true, String::new)
    }

    /// Produce the message.
    pub fn message(&self) -> String {
        (self.message)()
    }
}

impl fmt::Debug for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("pass", &self.pass)
            .finish_non_exhaustive()
    }
}

/// State the host passes to every matcher invocation.
#[derive(Debug, Clone, Default)]
pub struct MatcherContext {
    /// True when the assertion is negated with `.not()`.
    pub is_not: bool,
    /// Formatting helpers.
    pub utils: MatcherUtils,
}

impl MatcherContext {
    /// Context for a direct assertion.
    pub fn new(is_not: bool, config: PrintConfig) -> Self {
        Self {
            is_not,
            utils: MatcherUtils::new(config),
        }
    }

    /// The same context with negation cleared. Asymmetric matchers are
    /// evaluated positively regardless of the outer assertion.
    pub fn positive(&self) -> Self {
        Self {
            is_not: false,
            utils: self.utils.clone(),
        }
    }
}

/// A custom matcher following the raw calling convention.
///
/// Implemented for every function or closure with the matching signature,
/// so a plain `fn` is all a matcher author writes.
pub trait RawMatcher<E: ?Sized>: Send + Sync {
    /// Evaluate the matcher.
    fn evaluate(
        &self,
        ctx: &MatcherContext,
        received: &Value,
        expected: &E,
    ) -> Result<MatchResult, MatcherError>;
}

impl<E, F, Err> RawMatcher<E> for F
where
    E: ?Sized,
    F: Fn(&MatcherContext, &Value, &E) -> Result<MatchResult, Err> + Send + Sync,
    Err: Into<MatcherError>,
{
    fn evaluate(
        &self,
        ctx: &MatcherContext,
        received: &Value,
        expected: &E,
    ) -> Result<MatchResult, MatcherError> {
        self(ctx, received, expected).map_err(Into::into)
    }
}
