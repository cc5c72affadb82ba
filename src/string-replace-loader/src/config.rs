//! Loader configuration.
//!
//! ```toml
//! on_failure = "inject"
//!
//! [[rules]]
//! test = '\.js$'
//! [rules.options]
//! search = "var value"
//! replace = "var a"
//! ```

use std::path::Path;

use serde::Deserialize;
use string_replace_core::Options;

use crate::error::{LoaderError, LoaderResult};

/// How strict-mode failures are surfaced once a file has been processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail processing of the file.
    #[default]
    Error,
    /// Log a warning and keep the transformed text.
    Warn,
    /// Prepend a `throw new Error(...)` statement per failure to the output.
    Inject,
}

/// One group of queries, optionally limited to matching paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Regular expression matched against the file path. Absent means every file.
    #[serde(default)]
    pub test: Option<String>,
    /// The replace options.
    pub options: Options,
}

impl RuleConfig {
    /// A rule applying to every file.
    pub fn new(options: impl Into<Options>) -> Self {
        Self {
            test: None,
            options: options.into(),
        }
    }

    /// Limit the rule to paths matching `test`.
    pub fn with_test(mut self, test: impl Into<String>) -> Self {
        self.test = Some(test.into());
        self
    }
}

/// Configuration for a [`crate::Loader`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    #[serde(default)]
    pub on_failure: FailurePolicy,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl LoaderConfig {
    /// Load configuration from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> LoaderResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| LoaderError::read(path, e))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(LoaderError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn from_toml_str(content: &str) -> LoaderResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> LoaderResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }

    pub fn with_rule(mut self, rule: RuleConfig) -> Self {
        self.rules.push(rule);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TOML_CONFIG: &str = r#"
on_failure = "warn"

[[rules]]
test = '\.js$'
[rules.options]
search = "var value"
replace = "var a"

[[rules]]
[rules.options]
multiple = [
    { search = { pattern = "(\\d+)px", flags = "g" }, replace = "${1}rem", replaceAll = true },
    { search = "missing", replace = "x", strict = true },
]
"#;

    #[test]
    fn test_parse_toml() {
        let config = LoaderConfig::from_toml_str(TOML_CONFIG).unwrap();
        assert_eq!(config.on_failure, FailurePolicy::Warn);
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].test.as_deref(), Some("\\.js$"));
        assert!(config.rules[1].test.is_none());
        assert_eq!(config.rules[1].options.clone().into_query_options().len(), 2);
    }

    #[test]
    fn test_parse_json_use_list() {
        let config = LoaderConfig::from_json_str(
            r#"{"rules": [{"options": {"use": [{"options": {"search": "a", "replace": "b"}}]}}]}"#,
        )
        .unwrap();
        assert_eq!(config.on_failure, FailurePolicy::Error);
        assert_eq!(config.rules[0].options.clone().into_query_options().len(), 1);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(LoaderConfig::from_json_str(r#"{"rulez": []}"#).is_err());
        assert!(LoaderConfig::from_json_str(r#"{"on_failure": "ignore"}"#).is_err());
        assert!(
            LoaderConfig::from_json_str(r#"{"rules": [{"options": {"search": "a", "replce": "b"}}]}"#)
                .is_err()
        );
    }

    #[test]
    fn test_load_by_extension() {
        let temp = TempDir::new().unwrap();

        let toml_path = temp.path().join("replace.toml");
        fs::write(&toml_path, TOML_CONFIG).unwrap();
        assert_eq!(LoaderConfig::load(&toml_path).unwrap().rules.len(), 2);

        let json_path = temp.path().join("replace.json");
        fs::write(&json_path, r#"{"on_failure": "inject"}"#).unwrap();
        let config = LoaderConfig::load(&json_path).unwrap();
        assert_eq!(config.on_failure, FailurePolicy::Inject);
        assert!(config.rules.is_empty());

        let yaml_path = temp.path().join("replace.yaml");
        fs::write(&yaml_path, "rules: []").unwrap();
        assert!(matches!(
            LoaderConfig::load(&yaml_path),
            Err(LoaderError::UnsupportedFormat { .. })
        ));

        assert!(matches!(
            LoaderConfig::load(temp.path().join("absent.toml")),
            Err(LoaderError::Read { .. })
        ));
    }
}
