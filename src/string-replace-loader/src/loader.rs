//! Rule execution and failure surfacing.

use std::path::Path;

use regex::Regex;
use string_replace_core::{Query, apply, normalize};
use tracing::{debug, warn};

use crate::config::{FailurePolicy, LoaderConfig, RuleConfig};
use crate::error::{LoaderError, LoaderResult, RuleFailure};

/// A rule with its path test and queries compiled.
#[derive(Debug, Clone)]
struct Rule {
    test: Option<Regex>,
    queries: Vec<Query>,
}

impl Rule {
    fn compile(index: usize, config: RuleConfig) -> LoaderResult<Self> {
        let test = config
            .test
            .map(|test| {
                Regex::new(&test).map_err(|source| LoaderError::InvalidRuleTest { test, source })
            })
            .transpose()?;
        let queries = normalize(config.options)
            .map_err(|source| LoaderError::Config { rule: index, source })?;
        Ok(Self { test, queries })
    }

    fn applies_to(&self, path: &str) -> bool {
        self.test.as_ref().is_none_or(|test| test.is_match(path))
    }
}

/// Applies configured rules to source files.
///
/// Every rule whose test matches the path runs in declaration order, each
/// seeing the output of the previous one. Strict-mode failures from all rules
/// are collected, each tagged with its rule's position in the configuration,
/// and then surfaced according to the [`FailurePolicy`].
#[derive(Debug, Clone)]
pub struct Loader {
    rules: Vec<Rule>,
    policy: FailurePolicy,
}

impl Loader {
    /// Compile every rule in `config`.
    pub fn new(config: LoaderConfig) -> LoaderResult<Self> {
        let rules = config
            .rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| Rule::compile(index, rule))
            .collect::<LoaderResult<Vec<_>>>()?;
        debug!(rules = rules.len(), policy = ?config.on_failure, "loader configured");
        Ok(Self {
            rules,
            policy: config.on_failure,
        })
    }

    /// Load and compile a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> LoaderResult<Self> {
        Self::new(LoaderConfig::load(path)?)
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Transform `source`, which was read from `path`.
    pub fn process(&self, path: &Path, source: &str) -> LoaderResult<String> {
        let path_display = path.to_string_lossy();
        let mut text = source.to_string();
        let mut failures = Vec::new();

        let matching = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.applies_to(&path_display));
        for (index, rule) in matching {
            let result = apply(&text, &rule.queries);
            text = result.text;
            failures.extend(result.failures.into_iter().map(|record| RuleFailure {
                rule: index,
                record,
            }));
        }

        if failures.is_empty() {
            return Ok(text);
        }

        match self.policy {
            FailurePolicy::Error => Err(LoaderError::StrictMode {
                path: path.to_path_buf(),
                failures,
            }),
            FailurePolicy::Warn => {
                for failure in &failures {
                    warn!(
                        path = %path_display,
                        rule = failure.rule,
                        query = failure.record.index(),
                        "{failure}"
                    );
                }
                Ok(text)
            }
            FailurePolicy::Inject => Ok(inject_failures(&failures, text)),
        }
    }

    /// Read `path` as UTF-8 and transform it.
    pub fn process_file(&self, path: impl AsRef<Path>) -> LoaderResult<String> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| LoaderError::read(path, e))?;
        self.process(path, &source)
    }
}

/// Prefix `text` with one throwing statement per failure.
fn inject_failures(failures: &[RuleFailure], text: String) -> String {
    let mut output = String::new();
    for failure in failures {
        // A JSON string literal is also a valid JavaScript string literal.
        let message = serde_json::Value::String(failure.to_string());
        output.push_str(&format!("throw new Error({message});\n"));
    }
    output.push_str(&text);
    output
}
