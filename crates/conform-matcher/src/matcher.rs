//! # The `to_match_schema` Raw Matcher
//!
//! Bridges the standard schema contract to the raw matcher calling
//! convention of `conform-expect`.
//!
//! ## Algorithm
//!
//! 1. Narrow the expected argument with [`as_standard_schema`]. No marker
//!    means [`SchemaMatchError::NotAStandardSchema`].
//! 2. Call the schema's `validate` with the received value, once.
//! 3. A `Deferred` outcome means
//!    [`SchemaMatchError::AsynchronousValidationUnsupported`]. The future is
//!    dropped unpolled.
//! 4. A `Failure` becomes `pass = false` with a lazily built message: a
//!    fixed lead-in, the received value, and the issues as pretty JSON in
//!    vendor order. Anything else is `pass = true` with an empty message.
//!
//! Negation is the host's business; this matcher evaluates once and never
//! looks at `ctx.is_not`.

use conform_core::{Issue, SchemaLike, StandardSchema, ValidateOutcome, ValidationResult};
use conform_expect::{MatchResult, MatcherContext, MatcherUtils};
use serde_json::Value;

use crate::error::SchemaMatchError;

/// Name under which the matcher reports itself.
pub const MATCHER_NAME: &str = "to_match_schema";

/// First line of every mismatch message.
pub const MISMATCH_LEAD: &str = "Received value does not match expected schema:";

/// Narrow an untrusted expected argument to a standard schema.
///
/// # Errors
///
/// Returns [`SchemaMatchError::NotAStandardSchema`] when the argument does
/// not carry the standard marker.
pub fn as_standard_schema<S>(expected: &S) -> Result<&dyn StandardSchema, SchemaMatchError>
where
    S: SchemaLike + ?Sized,
{
    expected
        .standard_schema()
        .ok_or(SchemaMatchError::NotAStandardSchema)
}

/// Assert that `received` conforms to the schema passed as `expected`.
///
/// # Errors
///
/// Programmer errors only: [`SchemaMatchError::NotAStandardSchema`] and
/// [`SchemaMatchError::AsynchronousValidationUnsupported`]. A value that
/// does not conform is `Ok` with `pass == false`.
pub fn to_match_schema<S>(
    ctx: &MatcherContext,
    received: &Value,
    expected: &S,
) -> Result<MatchResult, SchemaMatchError>
where
    S: SchemaLike + ?Sized,
{
    let schema = as_standard_schema(expected)?;
    let vendor = schema.standard().vendor.as_str();
    tracing::debug!(
        vendor,
        version = schema.standard().version,
        "validating received value against standard schema"
    );

    let result = match schema.validate(received) {
        ValidateOutcome::Immediate(result) => result,
        ValidateOutcome::Deferred(pending) => {
            drop(pending);
            return Err(SchemaMatchError::AsynchronousValidationUnsupported {
                vendor: vendor.to_string(),
            });
        }
    };

    match result {
        ValidationResult::Failure { issues } => {
            tracing::trace!(vendor, issues = issues.len(), "schema reported issues");
            let utils = ctx.utils.clone();
            let received = received.clone();
            Ok(MatchResult::new(false, move || {
                mismatch_message(&utils, &received, &issues)
            }))
        }
        ValidationResult::Success { .. } => {
            tracing::trace!(vendor, "schema accepted value");
            Ok(MatchResult::passed())
        }
    }
}

/// Render the failure message for a value that did not conform.
pub fn mismatch_message(utils: &MatcherUtils, received: &Value, issues: &[Issue]) -> String {
    format!(
        "{MISMATCH_LEAD}\n\n{}\n{}\n\n{}\n{}",
        utils.bold("Received:"),
        utils.print_received(received),
        utils.bold("Issues:"),
        render_issues(issues),
    )
}

fn render_issues(issues: &[Issue]) -> String {
    serde_json::to_string_pretty(issues)
        .unwrap_or_else(|e| format!("<issues could not be rendered: {e}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::StandardProps;
    use conform_expect::PrintConfig;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Accepts strings, rejects everything else with two issues.
    struct StringsOnly {
        props: StandardProps,
        calls: AtomicUsize,
    }

    impl StringsOnly {
        fn new() -> Self {
            Self {
                props: StandardProps::new("test"),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl StandardSchema for StringsOnly {
        fn standard(&self) -> &StandardProps {
            &self.props
        }

        fn validate(&self, value: &Value) -> ValidateOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if value.is_string() {
                ValidationResult::success(value.clone()).into()
            } else {
                ValidationResult::failure(vec![
                    Issue::new("Expected string"),
                    Issue::new("Second issue").at(["nested"]),
                ])
                .into()
            }
        }
    }

    /// Always answers with a future; records whether it was ever polled.
    struct Deferred {
        props: StandardProps,
        polled: Arc<AtomicBool>,
    }

    impl StandardSchema for Deferred {
        fn standard(&self) -> &StandardProps {
            &self.props
        }

        fn validate(&self, value: &Value) -> ValidateOutcome {
            let polled = self.polled.clone();
            let value = value.clone();
            ValidateOutcome::deferred(async move {
                polled.store(true, Ordering::SeqCst);
                ValidationResult::success(value)
            })
        }
    }

    fn ctx() -> MatcherContext {
        MatcherContext::default()
    }

    #[test]
    fn test_not_a_schema() {
        let err = to_match_schema(&ctx(), &json!("test"), &json!({ "name": "not a schema" }))
            .unwrap_err();
        assert_eq!(err, SchemaMatchError::NotAStandardSchema);
        assert!(err
            .to_string()
            .contains("Expected schema does not implement standard schema"));
    }

    #[test]
    fn test_guard_returns_schema() {
        let schema = StringsOnly::new();
        let found = as_standard_schema(&schema).unwrap();
        assert_eq!(found.standard().vendor, "test");
        assert!(as_standard_schema("plain").is_err());
    }

    #[test]
    fn test_deferred_rejected_without_polling() {
        let polled = Arc::new(AtomicBool::new(false));
        let schema = Deferred {
            props: StandardProps::new("async-vendor"),
            polled: polled.clone(),
        };
        let err = to_match_schema(&ctx(), &json!("test"), &schema).unwrap_err();
        assert_eq!(
            err,
            SchemaMatchError::AsynchronousValidationUnsupported {
                vendor: "async-vendor".to_string()
            }
        );
        assert_eq!(err.to_string(), "Schema validation must be synchronous");
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[test]
    fn test_success_passes_with_empty_message() {
        let result = to_match_schema(&ctx(), &json!("hello"), &StringsOnly::new()).unwrap();
        assert!(result.pass);
        assert_eq!(result.message(), "");
    }

    #[test]
    fn test_failure_message_layout() {
        let result = to_match_schema(&ctx(), &json!(42), &StringsOnly::new()).unwrap();
        assert!(!result.pass);
        let expected = concat!(
            "Received value does not match expected schema:\n",
            "\n",
            "Received:\n",
            "42\n",
            "\n",
            "Issues:\n",
            "[\n",
            "  {\n",
            "    \"message\": \"Expected string\"\n",
            "  },\n",
            "  {\n",
            "    \"message\": \"Second issue\",\n",
            "    \"path\": [\n",
            "      \"nested\"\n",
            "    ]\n",
            "  }\n",
            "]",
        );
        assert_eq!(result.message(), expected);
    }

    #[test]
    fn test_validates_exactly_once() {
        let schema = StringsOnly::new();
        let result = to_match_schema(&ctx(), &json!(1), &schema).unwrap();
        let _ = result.message();
        let _ = result.message();
        assert_eq!(schema.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_negation_not_special_cased() {
        let negated = MatcherContext::new(true, PrintConfig::default());
        let result = to_match_schema(&negated, &json!("hello"), &StringsOnly::new()).unwrap();
        assert!(result.pass);
    }

    #[test]
    fn test_colored_headers() {
        let colored = MatcherContext::new(false, PrintConfig::default().with_color(true));
        let result = to_match_schema(&colored, &json!(1), &StringsOnly::new()).unwrap();
        let message = result.message();
        assert!(message.contains("\x1b[1mReceived:\x1b[22m"));
        assert!(message.contains("\x1b[1mIssues:\x1b[22m"));
    }

    #[test]
    fn test_trait_object_argument() {
        let schema: Arc<dyn StandardSchema> = Arc::new(StringsOnly::new());
        let probe: &dyn SchemaLike = &schema;
        assert!(to_match_schema(&ctx(), &json!("x"), probe).unwrap().pass);
    }
}
