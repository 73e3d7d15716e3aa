//! # Validation Issues
//!
//! An [`Issue`] is one problem a vendor found while validating a value.
//! The message text and the path are vendor-defined; the only structure the
//! contract fixes is the serialized shape:
//!
//! ```json
//! { "message": "\"thirty\" is not of type \"number\"", "path": ["age"] }
//! ```
//!
//! The `path` key is omitted when the issue applies to the value as a whole.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One segment of the path from the validated root to the offending value.
///
/// Serialized untagged: keys as JSON strings, indices as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Position inside an array.
    Index(usize),
    /// Property name inside an object.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A single validation issue reported by a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Human-readable description, verbatim from the vendor.
    pub message: String,
    /// Location of the offending value, or `None` for the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
}

impl Issue {
    /// Create an issue that applies to the validated value as a whole.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Attach a path. An empty path is normalized to `None`.
    pub fn at<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        let segments: Vec<PathSegment> = path.into_iter().map(Into::into).collect();
        self.path = if segments.is_empty() {
            None
        } else {
            Some(segments)
        };
        self
    }

    /// Returns the path as a dotted string, e.g. `users.0.email`.
    pub fn dotted_path(&self) -> Option<String> {
        self.path.as_ref().map(|segments| {
            segments
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(".")
        })
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dotted_path() {
            Some(path) => write!(f, "{path}: {}", self.message),
            None => write!(f, "(root): {}", self.message),
        }
    }
}
