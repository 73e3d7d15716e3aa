//! # Serde-Typed Vendor
//!
//! [`TypedSchema<T>`] treats a Rust type as the schema: a value conforms if
//! it deserializes into `T` and passes every registered refinement.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Person { name: String, age: u32 }
//!
//! let adult = TypedSchema::<Person>::new()
//!     .refine(["age"], "must be 18 or older", |p| p.age >= 18);
//! ```
//!
//! On success the validated value is `T` serialized back to JSON, so
//! defaults filled in by serde and unknown fields dropped by it are visible
//! in the output. A deserialization failure yields one issue carrying
//! serde's message; refinements are only checked on a deserialized value and
//! each failing refinement yields one issue, in registration order.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use conform_core::{Issue, PathSegment, StandardProps, StandardSchema, ValidateOutcome, ValidationResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Vendor name reported in the standard marker.
pub const VENDOR: &str = "serde";

type Check<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

struct Refinement<T> {
    path: Vec<PathSegment>,
    message: String,
    check: Check<T>,
}

impl<T> Clone for Refinement<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            message: self.message.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

/// A schema defined by a serde type plus optional refinements.
pub struct TypedSchema<T> {
    props: StandardProps,
    refinements: Vec<Refinement<T>>,
    _type: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T>
where
    T: DeserializeOwned + Serialize,
{
    /// A schema accepting anything that deserializes into `T`.
    pub fn new() -> Self {
        Self {
            props: StandardProps::new(VENDOR),
            refinements: Vec::new(),
            _type: PhantomData,
        }
    }

    /// Add a check that runs after deserialization. `path` locates the
    /// issue reported when `check` returns false.
    pub fn refine<I, S, F>(mut self, path: I, message: impl Into<String>, check: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.refinements.push(Refinement {
            path: path.into_iter().map(Into::into).collect(),
            message: message.into(),
            check: Arc::new(check),
        });
        self
    }

    /// Number of registered refinements.
    pub fn refinement_count(&self) -> usize {
        self.refinements.len()
    }

    fn check(&self, value: &Value) -> ValidationResult {
        let typed: T = match serde_json::from_value(value.clone()) {
            Ok(typed) => typed,
            Err(e) => return ValidationResult::failure(vec![Issue::new(e.to_string())]),
        };

        let issues: Vec<Issue> = self
            .refinements
            .iter()
            .filter(|r| !(r.check)(&typed))
            .map(|r| Issue::new(r.message.clone()).at(r.path.iter().cloned()))
            .collect();
        if !issues.is_empty() {
            return ValidationResult::failure(issues);
        }

        match serde_json::to_value(&typed) {
            Ok(output) => ValidationResult::success(output),
            Err(e) => ValidationResult::failure(vec![Issue::new(format!(
                "validated value could not be serialized: {e}"
            ))]),
        }
    }
}

impl<T> Default for TypedSchema<T>
where
    T: DeserializeOwned + Serialize,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedSchema<T> {
    fn clone(&self) -> Self {
        Self {
            props: self.props.clone(),
            refinements: self.refinements.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("type", &std::any::type_name::<T>())
            .field("refinements", &self.refinements.len())
            .finish()
    }
}

impl<T> StandardSchema for TypedSchema<T>
where
    T: DeserializeOwned + Serialize,
{
    fn standard(&self) -> &StandardProps {
        &self.props
    }

    fn validate(&self, value: &Value) -> ValidateOutcome {
        self.check(value).into()
    }
}
