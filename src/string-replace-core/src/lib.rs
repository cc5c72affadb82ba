//! String Replace Core - search/replace queries over whole text buffers.
//!
//! This crate provides:
//! - Option shapes for one query, a `multiple` list, or a `use` list
//! - Query normalization with defaults and compiled matchers
//! - Ordered substitution with first-occurrence or replace-all semantics
//! - Template (`$1`, `${name}`) and callback replacements
//! - Strict mode, reporting unmatched or incomplete queries as data
//!
//! # Example
//!
//! ```
//! use string_replace_core::{Pattern, QueryOptions, Replace, replace};
//!
//! let options = vec![
//!     QueryOptions::new("var value", "var a"),
//!     QueryOptions::new(
//!         Pattern::new("'(baz)'"),
//!         Replace::with(|c| format!("'{}'", c.group(1).unwrap_or_default().to_uppercase())),
//!     ),
//! ];
//!
//! let result = replace("var value = 'baz';", options).unwrap();
//! assert_eq!(result.text, "var a = 'BAZ';");
//! assert!(result.is_clean());
//! ```

mod engine;
mod error;
mod flags;
mod options;
mod query;

pub use engine::{FailureRecord, Transformation, apply};
pub use error::{ConfigError, ConfigResult};
pub use flags::Flags;
pub use options::{
    Captured, Options, Pattern, QueryOptions, Replace, ReplaceFn, Search, UseEntry,
};
pub use query::{Query, normalize};

/// Normalize `options` and apply the resulting queries to `text`.
///
/// Only configuration problems are errors. Strict-mode failures are returned
/// in [`Transformation::failures`].
pub fn replace(text: &str, options: impl Into<Options>) -> ConfigResult<Transformation> {
    let queries = normalize(options)?;
    Ok(apply(text, &queries))
}
