//! # Matcher Utilities
//!
//! Formatting helpers handed to every raw matcher through
//! [`MatcherContext::utils`](crate::MatcherContext). Matchers build their
//! failure messages with these so that all assertions print values the same
//! way.
//!
//! Styling is cosmetic. With colour off, every helper returns plain text and
//! the output is byte-stable; with colour on, headers are bold, received
//! values red, and expected values green.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::config::PrintConfig;

const BOLD: (&str, &str) = ("\x1b[1m", "\x1b[22m");
const DIM: (&str, &str) = ("\x1b[2m", "\x1b[22m");
const RED: (&str, &str) = ("\x1b[31m", "\x1b[39m");
const GREEN: (&str, &str) = ("\x1b[32m", "\x1b[39m");

/// Formatting helpers bound to a [`PrintConfig`].
#[derive(Debug, Clone, Default)]
pub struct MatcherUtils {
    config: PrintConfig,
}

impl MatcherUtils {
    /// Utilities rendering with `config`.
    pub fn new(config: PrintConfig) -> Self {
        Self { config }
    }

    /// The active print configuration.
    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    fn paint(&self, (open, close): (&str, &str), text: &str) -> String {
        if self.config.color {
            format!("{open}{text}{close}")
        } else {
            text.to_string()
        }
    }

    /// Bold section header.
    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    /// Render a value as JSON, honouring indent and depth settings.
    ///
    /// Scalars print compactly; objects and arrays print across lines.
    pub fn stringify(&self, value: &Value) -> String {
        let value = match self.config.max_depth {
            Some(depth) => elide(value, depth),
            None => value.clone(),
        };
        match &value {
            Value::Object(map) if !map.is_empty() => self.pretty(&value),
            Value::Array(items) if !items.is_empty() => self.pretty(&value),
            other => other.to_string(),
        }
    }

    /// Render any serializable value as indented JSON.
    ///
    /// Falls back to a placeholder if the value refuses to serialize.
    pub fn pretty<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let indent = " ".repeat(self.config.indent);
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = Serializer::with_formatter(&mut out, formatter);
        match value.serialize(&mut ser) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(e) => format!("<unserializable: {e}>"),
        }
    }

    /// Render the value under test.
    pub fn print_received(&self, value: &Value) -> String {
        self.paint(RED, &self.stringify(value))
    }

    /// Render the expected value.
    pub fn print_expected(&self, value: &Value) -> String {
        self.paint(GREEN, &self.stringify(value))
    }

    /// Render a description of an expectation that is not a plain value,
    /// such as an asymmetric matcher.
    pub fn print_expected_text(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    /// The `expect(received).name(expected)` hint line.
    pub fn matcher_hint(&self, name: &str, is_not: bool) -> String {
        let not = if is_not { ".not" } else { "" };
        format!(
            "{}{}{}{}{}",
            self.paint(DIM, "expect("),
            self.paint(RED, "received"),
            self.paint(DIM, &format!("){not}.{name}(")),
            self.paint(GREEN, "expected"),
            self.paint(DIM, ")"),
        )
    }
}

/// Replace containers nested deeper than `depth` with a short marker.
fn elide(value: &Value, depth: usize) -> Value {
    match value {
        Value::Object(map) if depth == 0 => {
            Value::String(format!("[Object: {} keys]", map.len()))
        }
        Value::Array(items) if depth == 0 => {
            Value::String(format!("[Array: {} items]", items.len()))
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), elide(v, depth - 1)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|v| elide(v, depth - 1)).collect()),
        scalar => scalar.clone(),
    }
}
