//! Error types for the loader.

use std::path::PathBuf;

use string_replace_core::{ConfigError, FailureRecord};
use thiserror::Error;

/// A strict-mode failure together with the rule that produced it.
///
/// `record.index()` is the query's position within that rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{record}")]
pub struct RuleFailure {
    pub rule: usize,
    pub record: FailureRecord,
}

/// Result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors that can occur while loading rules or processing a file.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A rule's options could not be turned into queries.
    #[error("Invalid replace options in rule {rule}: {source}")]
    Config {
        rule: usize,
        #[source]
        source: ConfigError,
    },

    /// A rule's path test is not a valid regular expression.
    #[error("Invalid path test '{test}': {source}")]
    InvalidRuleTest {
        test: String,
        #[source]
        source: regex::Error,
    },

    /// Failed to read a file.
    #[error("Failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML.
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration file is not valid JSON.
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file has an extension other than `.toml` or `.json`.
    #[error("Unsupported config format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Strict-mode queries failed and the failure policy is `error`.
    #[error("{}", .failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
    StrictMode {
        path: PathBuf,
        failures: Vec<RuleFailure>,
    },
}

impl LoaderError {
    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Failures carried by a strict-mode error.
    pub fn failures(&self) -> &[RuleFailure] {
        match self {
            Self::StrictMode { failures, .. } => failures,
            _ => &[],
        }
    }
}
