//! # Validation Results
//!
//! [`ValidationResult`] is the outcome of one `validate` call: either the
//! validated (possibly transformed) value, or the ordered issues the vendor
//! found. [`ValidateOutcome`] wraps it with the sync/async distinction.
//!
//! ## Invariant
//!
//! Exactly one of "issues present" or "value present" holds. The variant
//! tag is authoritative: a `Failure` counts as issues present even when a
//! vendor hands back an empty list.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::issue::Issue;

/// The result of validating a value against a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The value conforms. Carries the validated value, which vendors may
    /// have coerced or transformed.
    Success {
        /// Validated output value.
        value: Value,
    },
    /// The value does not conform.
    Failure {
        /// Issues in the order the vendor emitted them.
        issues: Vec<Issue>,
    },
}

impl ValidationResult {
    /// Construct a success result.
    pub fn success(value: Value) -> Self {
        Self::Success { value }
    }

    /// Construct a failure result.
    pub fn failure(issues: Vec<Issue>) -> Self {
        Self::Failure { issues }
    }

    /// Returns the issues, or `None` on success.
    pub fn issues(&self) -> Option<&[Issue]> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { issues } => Some(issues),
        }
    }

    /// Returns the validated value, or `None` on failure.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Returns true for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<Value, Vec<Issue>> {
        match self {
            Self::Success { value } => Ok(value),
            Self::Failure { issues } => Err(issues),
        }
    }
}

/// A validation result that is not available yet.
pub type DeferredResult = Pin<Box<dyn Future<Output = ValidationResult> + Send + 'static>>;

/// What a vendor's `validate` returns: a result now, or a future one.
pub enum ValidateOutcome {
    /// Validation completed without suspending.
    Immediate(ValidationResult),
    /// Validation needs to be awaited.
    Deferred(DeferredResult),
}

impl ValidateOutcome {
    /// Wrap a future as a deferred outcome.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = ValidationResult> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    /// Returns true for the `Deferred` variant.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Returns the immediate result, or gives the deferred outcome back.
    pub fn into_immediate(self) -> Result<ValidationResult, Self> {
        match self {
            Self::Immediate(result) => Ok(result),
            deferred @ Self::Deferred(_) => Err(deferred),
        }
    }
}

impl From<ValidationResult> for ValidateOutcome {
    fn from(result: ValidationResult) -> Self {
        Self::Immediate(result)
    }
}

impl fmt::Debug for ValidateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(result) => f.debug_tuple("Immediate").field(result).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_accessors() {
        let result = ValidationResult::success(json!({"name": "John"}));
        assert!(result.is_success());
        assert!(result.issues().is_none());
        assert_eq!(result.value(), Some(&json!({"name": "John"})));
    }

    #[test]
    fn test_failure_accessors_preserve_order() {
        let result = ValidationResult::failure(vec![Issue::new("b"), Issue::new("a")]);
        assert!(!result.is_success());
        assert!(result.value().is_none());
        let messages: Vec<&str> = result
            .issues()
            .unwrap()
            .iter()
            .map(|i| i.message.as_str())
            .collect();
        assert_eq!(messages, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_failure_still_reports_issues_present() {
        let result = ValidationResult::failure(Vec::new());
        assert_eq!(result.issues(), Some(&[][..]));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(
            ValidationResult::success(json!(1)).into_result(),
            Ok(json!(1))
        );
        assert_eq!(
            ValidationResult::failure(vec![Issue::new("x")]).into_result(),
            Err(vec![Issue::new("x")])
        );
    }

    #[test]
    fn test_outcome_tags() {
        let immediate: ValidateOutcome = ValidationResult::success(json!(null)).into();
        assert!(!immediate.is_deferred());
        assert!(immediate.into_immediate().is_ok());

        let deferred = ValidateOutcome::deferred(async { ValidationResult::success(json!(null)) });
        assert!(deferred.is_deferred());
        assert_eq!(format!("{deferred:?}"), "Deferred(..)");
        assert!(deferred.into_immediate().is_err());
    }
}
