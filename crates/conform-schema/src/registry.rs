//! # Schema Registry
//!
//! Loads a directory of JSON Schema documents so tests can assert against
//! schemas by filename, with cross-schema `$ref`s resolved locally.
//!
//! ## Loading
//!
//! Every `*.schema.json`, `*.schema.yaml`, and `*.schema.yml` file in the
//! directory is parsed (YAML is converted to the equivalent JSON tree) and
//! indexed by filename. Other files are skipped.
//!
//! ## Reference Resolution
//!
//! Each schema is registered under its filename and, when present, its
//! `$id`. A `$ref` to another document is resolved by exact URI first, then
//! by the URI's last path segment as a filename. References that match
//! nothing fail the build; the registry never goes to the network.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use jsonschema::{Draft, Retrieve, Uri};
use serde_json::Value;

use crate::error::SchemaBuildError;
use crate::json::JsonSchema;

const SCHEMA_SUFFIXES: [&str; 3] = [".schema.json", ".schema.yaml", ".schema.yml"];

/// Local retriever that resolves `$ref` URIs to schemas loaded in memory.
struct LocalSchemaRetriever {
    /// Map from URI or filename to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        tracing::warn!(uri = uri_str, "unresolved schema reference");
        Err(format!("no local schema for reference '{uri_str}'").into())
    }
}

/// A directory of schemas, compiled on demand.
#[derive(Debug)]
pub struct SchemaRegistry {
    /// Directory the schemas were loaded from.
    schema_dir: PathBuf,
    /// Map from schema filename (e.g., "user.schema.json") to parsed JSON value.
    schemas: HashMap<String, Value>,
}

impl SchemaRegistry {
    /// Load every schema file in `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError::Load`] if the directory cannot be read or
    /// a schema file cannot be parsed.
    pub fn load(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaBuildError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| SchemaBuildError::Load {
            schema_name: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !SCHEMA_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
                tracing::trace!(file = name, "skipping non-schema file");
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            let value = parse_schema(name, &content)?;
            schemas.insert(name.to_string(), value);
        }

        tracing::debug!(
            dir = %schema_dir.display(),
            count = schemas.len(),
            "loaded schema registry"
        );
        Ok(Self {
            schema_dir,
            schemas,
        })
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Returns the number of loaded schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no schemas were found.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Returns the names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a loaded schema document by filename.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    fn retriever(&self) -> LocalSchemaRetriever {
        let mut schemas_by_uri = HashMap::new();
        for (filename, value) in &self.schemas {
            if let Some(id) = value.get("$id").and_then(Value::as_str) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }
        LocalSchemaRetriever { schemas_by_uri }
    }

    /// Compile the schema named `name` with every other loaded schema
    /// available for `$ref` resolution.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError::NotFound`] for an unknown name and
    /// [`SchemaBuildError::Build`] if compilation or a `$ref` fails.
    pub fn schema(&self, name: &str) -> Result<JsonSchema, SchemaBuildError> {
        let value = self.schemas.get(name).ok_or_else(|| SchemaBuildError::NotFound {
            schema_name: name.to_string(),
            dir: self.schema_dir.display().to_string(),
        })?;

        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft202012);
        opts.should_validate_formats(true);
        opts.with_retriever(self.retriever());

        JsonSchema::with_options(opts, value, name)
    }
}

fn parse_schema(name: &str, content: &str) -> Result<Value, SchemaBuildError> {
    let load_error = |reason: String| SchemaBuildError::Load {
        schema_name: name.to_string(),
        reason,
    };
    if name.ends_with(".json") {
        serde_json::from_str(content).map_err(|e| load_error(format!("invalid JSON: {e}")))
    } else {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| load_error(format!("invalid YAML: {e}")))?;
        yaml_to_json_value(&yaml)
            .map_err(|e| load_error(format!("YAML-to-JSON conversion failed: {e}")))
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Schemas only use the JSON-compatible subset of YAML; tags are dropped
/// and non-string keys are stringified.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_schema_converts() {
        let yaml = r#"
type: object
properties:
  port:
    type: integer
    minimum: 1
required: [port]
"#;
        let value = parse_schema("service.schema.yaml", yaml).unwrap();
        assert_eq!(value["type"], "object");
        assert_eq!(value["properties"]["port"]["minimum"], 1);
        assert_eq!(value["required"][0], "port");
    }

    #[test]
    fn test_invalid_json_schema_file() {
        let err = parse_schema("broken.schema.json", "{ not json").unwrap_err();
        match err {
            SchemaBuildError::Load {
                schema_name,
                reason,
            } => {
                assert_eq!(schema_name, "broken.schema.json");
                assert!(reason.starts_with("invalid JSON"));
            }
            other => panic!("Expected Load error, got: {other}"),
        }
    }

    #[test]
    fn test_yaml_non_string_keys_stringified() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes").unwrap();
        let value = yaml_to_json_value(&yaml).unwrap();
        assert_eq!(value["1"], "one");
        assert_eq!(value["true"], "yes");
    }
}
