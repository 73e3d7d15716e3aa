//! # JSON Schema Vendor
//!
//! [`JsonSchema`] compiles a JSON Schema document with the `jsonschema`
//! crate and exposes it through the standard schema contract.
//!
//! ## Behavior
//!
//! - Format assertions (`email`, `uri`, `date-time`, ...) are enforced, not
//!   treated as annotations.
//! - Issues are reported in the order `iter_errors` yields them. The message
//!   is the crate's own error text; the path is the instance location,
//!   with array positions as numeric segments.
//! - On success the validated value is the input, unchanged. JSON Schema
//!   does not transform values.

use std::fmt;
use std::sync::Arc;

use conform_core::{Issue, PathSegment, StandardProps, StandardSchema, ValidateOutcome, ValidationResult};
use jsonschema::{ValidationOptions, Validator};
use serde_json::Value;

use crate::error::SchemaBuildError;

/// Vendor name reported in the standard marker.
pub const VENDOR: &str = "jsonschema";

/// Name used in errors for schemas that were not loaded from a file.
const INLINE_SCHEMA_NAME: &str = "<inline>";

/// A compiled JSON Schema implementing the standard schema contract.
///
/// Cheap to clone; the compiled validator is shared.
#[derive(Clone)]
pub struct JsonSchema {
    props: StandardProps,
    name: String,
    validator: Arc<Validator>,
}

impl JsonSchema {
    /// Compile `schema`. The draft is detected from `$schema`, defaulting
    /// to the latest supported draft.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError::Build`] if `schema` is not a valid schema.
    pub fn new(schema: &Value) -> Result<Self, SchemaBuildError> {
        let mut opts = jsonschema::options();
        opts.should_validate_formats(true);
        Self::with_options(opts, schema, INLINE_SCHEMA_NAME)
    }

    /// Compile `schema` with caller-provided options. `name` is used in
    /// error messages and [`JsonSchema::name`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError::Build`] if the validator cannot be built.
    pub fn with_options(
        opts: ValidationOptions,
        schema: &Value,
        name: &str,
    ) -> Result<Self, SchemaBuildError> {
        let validator = opts.build(schema).map_err(|e| SchemaBuildError::Build {
            schema_name: name.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(schema = name, "compiled JSON schema");
        Ok(Self {
            props: StandardProps::new(VENDOR),
            name: name.to_string(),
            validator: Arc::new(validator),
        })
    }

    /// Schema filename, or `<inline>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quick boolean check without collecting issues.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// All issues for `instance`, in validator order.
    pub fn issues(&self, instance: &Value) -> Vec<Issue> {
        self.validator
            .iter_errors(instance)
            .map(|e| {
                let pointer = e.instance_path.to_string();
                Issue::new(e.to_string()).at(pointer_segments(instance, &pointer))
            })
            .collect()
    }
}

impl StandardSchema for JsonSchema {
    fn standard(&self) -> &StandardProps {
        &self.props
    }

    fn validate(&self, value: &Value) -> ValidateOutcome {
        let issues = self.issues(value);
        if issues.is_empty() {
            ValidationResult::success(value.clone()).into()
        } else {
            ValidationResult::failure(issues).into()
        }
    }
}

impl fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema")
            .field("name", &self.name)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

/// Split a JSON pointer into path segments, walking `instance` to tell
/// array positions from object keys that happen to be numeric.
fn pointer_segments(instance: &Value, pointer: &str) -> Vec<PathSegment> {
    let mut cursor = Some(instance);
    let mut segments = Vec::new();
    for raw in pointer.split('/').skip(1) {
        let token = raw.replace("~1", "/").replace("~0", "~");
        let segment = match (cursor, token.parse::<usize>()) {
            (Some(Value::Array(items)), Ok(index)) => {
                cursor = items.get(index);
                PathSegment::Index(index)
            }
            _ => {
                cursor = cursor.and_then(|v| v.get(token.as_str()));
                PathSegment::Key(token)
            }
        };
        segments.push(segment);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> JsonSchema {
        JsonSchema::new(&json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "number" }
            },
            "required": ["name", "age"]
        }))
        .unwrap()
    }

    #[test]
    fn test_marker() {
        let schema = person();
        assert_eq!(schema.standard().vendor, "jsonschema");
        assert_eq!(schema.standard().version, 1);
        assert_eq!(schema.name(), "<inline>");
    }

    #[test]
    fn test_valid_value_returned_unchanged() {
        let value = json!({ "name": "John", "age": 30 });
        let result = person().validate(&value).into_immediate().unwrap();
        assert_eq!(result.value(), Some(&value));
    }

    #[test]
    fn test_invalid_value_reports_path() {
        let result = person()
            .validate(&json!({ "name": "John", "age": "thirty" }))
            .into_immediate()
            .unwrap();
        let issues = result.issues().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, Some(vec![PathSegment::Key("age".into())]));
        assert!(issues[0].message.contains("thirty"), "{}", issues[0].message);
    }

    #[test]
    fn test_missing_field_is_root_issue() {
        let result = person()
            .validate(&json!({ "name": "John" }))
            .into_immediate()
            .unwrap();
        let issues = result.issues().unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].path.is_none());
        assert!(issues[0].message.contains("age"));
    }

    #[test]
    fn test_formats_enforced() {
        let email = JsonSchema::new(&json!({ "type": "string", "format": "email" })).unwrap();
        assert!(email.is_valid(&json!("john@example.com")));
        assert!(!email.is_valid(&json!("not-an-email")));
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let err = JsonSchema::new(&json!({ "type": "not-a-type" })).unwrap_err();
        assert!(matches!(err, SchemaBuildError::Build { .. }), "{err}");
    }

    #[test]
    fn test_pointer_segments_distinguish_indices() {
        let instance = json!({ "items": [{ "0": "x" }], "a/b": 1 });
        assert_eq!(
            pointer_segments(&instance, "/items/0/0"),
            vec![
                PathSegment::Key("items".into()),
                PathSegment::Index(0),
                PathSegment::Key("0".into()),
            ]
        );
        assert_eq!(
            pointer_segments(&instance, "/a~1b"),
            vec![PathSegment::Key("a/b".into())]
        );
        assert!(pointer_segments(&instance, "").is_empty());
    }
}
