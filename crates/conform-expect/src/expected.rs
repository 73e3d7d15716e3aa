//! # Structural Expectations and Asymmetric Matchers
//!
//! [`Expected`] is the right-hand side of [`to_equal`](crate::Expectation::to_equal):
//! a JSON-shaped tree where any position may hold an asymmetric matcher
//! instead of a literal. Matching walks the received value and the tree in
//! lockstep; at a matcher position the matcher decides.
//!
//! Matchers available here:
//!
//! - [`object_containing`]: the received object has at least these keys,
//!   each matching.
//! - [`array_containing`]: every listed item matches some received element.
//! - [`any_value`]: anything except `null`.
//! - [`asymmetric`]: lifts any [`RawMatcher`] into an asymmetric matcher,
//!   so custom assertions can be embedded without a second implementation.
//!
//! Programmer errors raised by embedded raw matchers propagate out of
//! [`Expected::matches`] as `Err`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::matcher::{MatchResult, MatcherContext, MatcherError, RawMatcher};

/// A matcher that can stand in for a value inside a structural expectation.
pub trait AsymmetricMatcher: Send + Sync {
    /// Does `actual` satisfy this matcher?
    fn asymmetric_match(&self, actual: &Value, ctx: &MatcherContext) -> Result<bool, MatcherError>;

    /// Short description used when printing the expectation.
    fn describe(&self) -> String;
}

/// The expected side of a structural equality check.
#[derive(Clone)]
pub enum Expected {
    /// A literal JSON value, compared with `==`.
    Value(Value),
    /// An object whose keys must be exactly these, each matching.
    Object(BTreeMap<String, Expected>),
    /// An array of exactly this length, each position matching.
    Array(Vec<Expected>),
    /// An asymmetric matcher.
    Matcher(Arc<dyn AsymmetricMatcher>),
}

impl Expected {
    /// Wrap a matcher.
    pub fn matcher(matcher: impl AsymmetricMatcher + 'static) -> Self {
        Self::Matcher(Arc::new(matcher))
    }

    /// Build an exact-keys object expectation.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Expected>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build an exact-length array expectation.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Expected>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Recursively compare `actual` against this expectation.
    pub fn matches(&self, actual: &Value, ctx: &MatcherContext) -> Result<bool, MatcherError> {
        match self {
            Self::Value(expected) => Ok(actual == expected),
            Self::Object(entries) => {
                let Some(object) = actual.as_object() else {
                    return Ok(false);
                };
                if object.len() != entries.len() {
                    return Ok(false);
                }
                for (key, expected) in entries {
                    match object.get(key) {
                        Some(value) if expected.matches(value, ctx)? => {}
                        _ => return Ok(false),
                    }
                }
                Ok(true)
            }
            Self::Array(items) => {
                let Some(array) = actual.as_array() else {
                    return Ok(false);
                };
                if array.len() != items.len() {
                    return Ok(false);
                }
                for (value, expected) in array.iter().zip(items) {
                    if !expected.matches(value, ctx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Matcher(matcher) => matcher.asymmetric_match(actual, &ctx.positive()),
        }
    }

    /// Render the expectation as JSON, with matchers shown by description.
    pub fn to_display_value(&self) -> Value {
        match self {
            Self::Value(v) => v.clone(),
            Self::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_display_value()))
                    .collect(),
            ),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_display_value).collect()),
            Self::Matcher(m) => Value::String(m.describe()),
        }
    }
}

impl fmt::Debug for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected({})", self.to_display_value())
    }
}

impl From<Value> for Expected {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Vec<Expected>> for Expected {
    fn from(items: Vec<Expected>) -> Self {
        Self::Array(items)
    }
}

impl From<Arc<dyn AsymmetricMatcher>> for Expected {
    fn from(matcher: Arc<dyn AsymmetricMatcher>) -> Self {
        Self::Matcher(matcher)
    }
}

struct ObjectContaining {
    entries: BTreeMap<String, Expected>,
}

impl AsymmetricMatcher for ObjectContaining {
    fn asymmetric_match(&self, actual: &Value, ctx: &MatcherContext) -> Result<bool, MatcherError> {
        let Some(object) = actual.as_object() else {
            return Ok(false);
        };
        for (key, expected) in &self.entries {
            match object.get(key) {
                Some(value) if expected.matches(value, ctx)? => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    fn describe(&self) -> String {
        let entries: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_display_value()))
            .collect();
        format!("ObjectContaining {}", Value::Object(entries))
    }
}

/// Matches any object that has at least `entries`, each matching.
/// Keys not listed are ignored.
pub fn object_containing<I, K, V>(entries: I) -> Expected
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Expected>,
{
    Expected::matcher(ObjectContaining {
        entries: entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
    })
}

struct ArrayContaining {
    items: Vec<Expected>,
}

impl AsymmetricMatcher for ArrayContaining {
    fn asymmetric_match(&self, actual: &Value, ctx: &MatcherContext) -> Result<bool, MatcherError> {
        let Some(array) = actual.as_array() else {
            return Ok(false);
        };
        'items: for expected in &self.items {
            for value in array {
                if expected.matches(value, ctx)? {
                    continue 'items;
                }
            }
            return Ok(false);
        }
        Ok(true)
    }

    fn describe(&self) -> String {
        let items: Vec<Value> = self.items.iter().map(Expected::to_display_value).collect();
        format!("ArrayContaining {}", Value::Array(items))
    }
}

/// Matches any array where each of `items` matches at least one element.
pub fn array_containing<I, V>(items: I) -> Expected
where
    I: IntoIterator<Item = V>,
    V: Into<Expected>,
{
    Expected::matcher(ArrayContaining {
        items: items.into_iter().map(Into::into).collect(),
    })
}

struct AnyValue;

impl AsymmetricMatcher for AnyValue {
    fn asymmetric_match(&self, actual: &Value, _ctx: &MatcherContext) -> Result<bool, MatcherError> {
        Ok(!actual.is_null())
    }

    fn describe(&self) -> String {
        "Anything".to_string()
    }
}

/// Matches anything except `null`.
pub fn any_value() -> Expected {
    Expected::matcher(AnyValue)
}

/// A raw matcher bound to its expected argument.
struct Lifted<M, E> {
    name: &'static str,
    matcher: M,
    expected: E,
}

impl<M, E> AsymmetricMatcher for Lifted<M, E>
where
    M: RawMatcher<E>,
    E: Send + Sync,
{
    fn asymmetric_match(&self, actual: &Value, ctx: &MatcherContext) -> Result<bool, MatcherError> {
        let result: MatchResult = self.matcher.evaluate(ctx, actual, &self.expected)?;
        Ok(result.pass)
    }

    fn describe(&self) -> String {
        format!("{}()", self.name)
    }
}

/// Embed a raw matcher as an asymmetric matcher.
///
/// The matcher is evaluated through the same calling convention as a
/// direct assertion; only its `pass` flag is used.
pub fn asymmetric<M, E>(name: &'static str, matcher: M, expected: E) -> Expected
where
    M: RawMatcher<E> + 'static,
    E: Send + Sync + 'static,
{
    Expected::matcher(Lifted {
        name,
        matcher,
        expected,
    })
}
