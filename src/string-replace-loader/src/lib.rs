//! String Replace Loader - apply search/replace rules to files in a build.
//!
//! This crate embeds [`string_replace_core`] into a build pipeline:
//! - Rule sets loaded from TOML or JSON files
//! - Rules scoped to file paths by a regular expression
//! - A failure policy deciding how strict-mode failures surface
//! - Logging setup for host processes
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use string_replace_loader::{FailurePolicy, Loader, LoaderConfig};
//!
//! let config = LoaderConfig::from_toml_str(
//!     r#"
//! on_failure = "inject"
//!
//! [[rules]]
//! test = '\.js$'
//! [rules.options]
//! multiple = [
//!     { search = "var value", replace = "var a" },
//!     { search = "nonexistent value", replace = "var b", strict = true },
//! ]
//! "#,
//! )
//! .unwrap();
//!
//! let loader = Loader::new(config).unwrap();
//! assert_eq!(loader.policy(), FailurePolicy::Inject);
//!
//! let output = loader.process(Path::new("entry.js"), "var value = 1;").unwrap();
//! assert_eq!(
//!     output,
//!     "throw new Error(\"Replace failed (strict mode) : nonexistent value → var b\");\nvar a = 1;"
//! );
//! ```

mod config;
mod error;
mod loader;
mod logging;

pub use config::{FailurePolicy, LoaderConfig, RuleConfig};
pub use error::{LoaderError, LoaderResult, RuleFailure};
pub use loader::Loader;
pub use logging::init_logging;
