//! # Expectation Errors
//!
//! A failed expectation is reported in one of two ways, and they must never
//! be confused:
//!
//! - [`ExpectError::Assertion`]: the matcher ran and the received value did
//!   not satisfy it. The payload is the rendered failure message.
//! - [`ExpectError::Matcher`]: the matcher refused to run because it was
//!   invoked incorrectly (a programmer error in the test itself).

use thiserror::Error;

use crate::matcher::MatcherError;

/// Error returned by the `try_*` assertion methods.
#[derive(Error, Debug)]
pub enum ExpectError {
    /// The assertion evaluated and failed.
    #[error("{0}")]
    Assertion(String),

    /// The matcher raised a programmer error.
    #[error("{source}")]
    Matcher {
        /// Name of the matcher that raised.
        name: &'static str,
        /// The matcher's error.
        source: MatcherError,
    },

    /// The received value could not be converted to JSON.
    #[error("received value could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ExpectError {
    /// Returns true for an ordinary assertion failure.
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }

    /// Returns the programmer error, if this is one.
    pub fn matcher_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Matcher { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
