//! # Print Configuration
//!
//! Controls how failure messages render values. The default never reads
//! the environment and produces plain, uncoloured output so that failure
//! messages are stable across machines. [`PrintConfig::from_env`] is the
//! explicit opt-in for terminal styling.

use serde::{Deserialize, Serialize};

/// Environment variable that forces colour on (`1`, `true`, `always`) or
/// off (anything else).
pub const COLOR_ENV: &str = "CONFORM_COLOR";

/// Environment variable that disables colour whenever it is set.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Rendering options for failure messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Emit ANSI styling (bold headers, coloured values).
    pub color: bool,
    /// Spaces per indentation level when pretty-printing values.
    pub indent: usize,
    /// Nesting depth beyond which objects and arrays are elided.
    /// `None` prints the whole value.
    pub max_depth: Option<usize>,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            color: false,
            indent: 2,
            max_depth: None,
        }
    }
}

impl PrintConfig {
    /// Build a config from the process environment.
    ///
    /// `NO_COLOR` wins over everything. Otherwise `CONFORM_COLOR` decides.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let color = if lookup(NO_COLOR_ENV).is_some() {
            false
        } else {
            lookup(COLOR_ENV)
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "always"))
                .unwrap_or(false)
        };
        Self {
            color,
            ..Self::default()
        }
    }

    /// Return a copy with colour switched on or off.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Return a copy with the given maximum print depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_plain() {
        let config = PrintConfig::default();
        assert!(!config.color);
        assert_eq!(config.indent, 2);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_color_env_enables() {
        assert!(PrintConfig::from_lookup(lookup(&[(COLOR_ENV, "always")])).color);
        assert!(PrintConfig::from_lookup(lookup(&[(COLOR_ENV, "TRUE")])).color);
        assert!(!PrintConfig::from_lookup(lookup(&[(COLOR_ENV, "never")])).color);
        assert!(!PrintConfig::from_lookup(lookup(&[])).color);
    }

    #[test]
    fn test_no_color_wins() {
        let config = PrintConfig::from_lookup(lookup(&[(COLOR_ENV, "1"), (NO_COLOR_ENV, "")]));
        assert!(!config.color);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: PrintConfig = serde_json::from_str(r#"{ "max_depth": 3 }"#).unwrap();
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.indent, 2);
    }
}
