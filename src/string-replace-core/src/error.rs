//! Error types for query configuration.

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while turning options into executable queries.
///
/// These are fatal: they are reported before any text is processed. Unmatched
/// searches are not errors, see [`crate::FailureRecord`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A flag character that no pattern engine understands.
    #[error("unknown pattern flag '{flag}'")]
    UnknownFlag { flag: char },

    /// A flag character that is valid for JavaScript patterns but has no equivalent here.
    #[error("unsupported pattern flag '{flag}'")]
    UnsupportedFlag { flag: char },

    /// The search pattern failed to compile.
    #[error("invalid search pattern /{pattern}/: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ConfigError {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::UnknownFlag { flag: 'q' };
        assert_eq!(err.to_string(), "unknown pattern flag 'q'");

        let err = ConfigError::UnsupportedFlag { flag: 'y' };
        assert_eq!(err.to_string(), "unsupported pattern flag 'y'");
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = ConfigError::invalid_pattern("(unclosed", source);
        assert!(err.to_string().starts_with("invalid search pattern /(unclosed/"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
