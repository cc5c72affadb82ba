//! Raw option shapes accepted by the query normalizer.
//!
//! Three shapes are recognised and all normalize to the same ordered list of
//! queries:
//!
//! ```text
//! { search, replace, replaceAll?, flags?, strict? }
//! { multiple: [ { search, replace, ... }, ... ] }
//! { use: [ { options: { search, replace, ... } }, ... ] }
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigResult;
use crate::flags::Flags;

/// What text to find.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Search {
    /// Matched verbatim. Pattern metacharacters carry no meaning.
    Literal(String),
    /// A regular expression.
    Pattern(Pattern),
}

impl fmt::Display for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Pattern(pattern) => write!(f, "{pattern}"),
        }
    }
}

impl From<&str> for Search {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Search {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<Pattern> for Search {
    fn from(value: Pattern) -> Self {
        Self::Pattern(value)
    }
}

/// A regular expression source with its own flags.
///
/// Displays as `/source/flags`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pattern {
    #[serde(rename = "pattern")]
    source: String,
    #[serde(default)]
    flags: Flags,
}

impl Pattern {
    /// Create a pattern without flags.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: Flags::default(),
        }
    }

    /// Create a pattern from a source and a flag string such as `"gi"`.
    pub fn with_flags(source: impl Into<String>, flags: &str) -> ConfigResult<Self> {
        Ok(Self {
            source: source.into(),
            flags: flags.parse()?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// A single match handed to a replacement callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured<'a> {
    /// The full matched text.
    pub matched: &'a str,
    /// Capture groups in order, excluding the full match. Groups that did not
    /// participate in the match are `None`.
    pub groups: Vec<Option<&'a str>>,
    /// Offset of the match in characters.
    pub offset: usize,
    /// Offset of the match in bytes.
    pub byte_offset: usize,
    /// The whole buffer being searched.
    pub subject: &'a str,
}

impl<'a> Captured<'a> {
    /// Capture group by 1-based index, like `$1`.
    pub fn group(&self, index: usize) -> Option<&'a str> {
        index
            .checked_sub(1)
            .and_then(|i| self.groups.get(i).copied().flatten())
    }
}

/// Replacement callback.
pub type ReplaceFn = Arc<dyn Fn(&Captured<'_>) -> String + Send + Sync>;

/// What to put in place of each match.
#[derive(Clone)]
pub enum Replace {
    /// Replacement text. `$1`, `${name}` and `$0` expand to captures; `$$` is a literal `$`.
    ///
    /// A group reference runs on as long as the name does: `$1rem` refers to
    /// a group named `1rem` and expands to nothing. Write `${1}rem` instead.
    Template(String),
    /// Computed replacement.
    Func(ReplaceFn),
}

impl Replace {
    /// Wrap a closure as a replacement.
    pub fn with<F>(func: F) -> Self
    where
        F: Fn(&Captured<'_>) -> String + Send + Sync + 'static,
    {
        Self::Func(Arc::new(func))
    }
}

impl fmt::Debug for Replace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(text) => f.debug_tuple("Template").field(text).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl fmt::Display for Replace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(text) => f.write_str(text),
            Self::Func(_) => f.write_str("[function]"),
        }
    }
}

impl From<&str> for Replace {
    fn from(value: &str) -> Self {
        Self::Template(value.to_string())
    }
}

impl From<String> for Replace {
    fn from(value: String) -> Self {
        Self::Template(value)
    }
}

// Only templates can come from a config file.
impl<'de> Deserialize<'de> for Replace {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::Template)
    }
}

/// Configuration of one query before defaults are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct QueryOptions {
    pub search: Option<Search>,
    pub replace: Option<Replace>,
    pub replace_all: Option<bool>,
    pub flags: Option<Flags>,
    pub strict: Option<bool>,
}

impl QueryOptions {
    pub fn new(search: impl Into<Search>, replace: impl Into<Replace>) -> Self {
        Self {
            search: Some(search.into()),
            replace: Some(replace.into()),
            ..Default::default()
        }
    }

    pub fn with_replace_all(mut self, replace_all: bool) -> Self {
        self.replace_all = Some(replace_all);
        self
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }
}

/// One element of the `use` list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UseEntry {
    #[serde(default)]
    pub options: QueryOptions,
}

impl From<QueryOptions> for UseEntry {
    fn from(options: QueryOptions) -> Self {
        Self { options }
    }
}

/// Every accepted options shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawOptions")]
pub enum Options {
    Single(QueryOptions),
    Multiple(Vec<QueryOptions>),
    Use(Vec<UseEntry>),
}

impl Options {
    /// Per-query options in declaration order.
    pub fn into_query_options(self) -> Vec<QueryOptions> {
        match self {
            Self::Single(options) => vec![options],
            Self::Multiple(list) => list,
            Self::Use(entries) => entries.into_iter().map(|entry| entry.options).collect(),
        }
    }
}

impl From<QueryOptions> for Options {
    fn from(options: QueryOptions) -> Self {
        Self::Single(options)
    }
}

impl From<Vec<QueryOptions>> for Options {
    fn from(list: Vec<QueryOptions>) -> Self {
        Self::Multiple(list)
    }
}

// Every key of every shape in one table, so serde reports unknown keys by
// name. Which shape was meant is decided afterwards.
#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawOptions {
    search: Option<Search>,
    replace: Option<Replace>,
    replace_all: Option<bool>,
    flags: Option<Flags>,
    strict: Option<bool>,
    multiple: Option<Vec<QueryOptions>>,
    #[serde(rename = "use")]
    entries: Option<Vec<UseEntry>>,
}

impl TryFrom<RawOptions> for Options {
    type Error = String;

    fn try_from(raw: RawOptions) -> Result<Self, Self::Error> {
        let single = QueryOptions {
            search: raw.search,
            replace: raw.replace,
            replace_all: raw.replace_all,
            flags: raw.flags,
            strict: raw.strict,
        };
        let has_single_fields = single.search.is_some()
            || single.replace.is_some()
            || single.replace_all.is_some()
            || single.flags.is_some()
            || single.strict.is_some();

        match (raw.multiple, raw.entries) {
            (Some(_), Some(_)) => Err("`multiple` and `use` cannot be combined".to_string()),
            (Some(_), None) | (None, Some(_)) if has_single_fields => Err(
                "query fields cannot sit next to a `multiple` or `use` list".to_string(),
            ),
            (Some(list), None) => Ok(Self::Multiple(list)),
            (None, Some(entries)) => Ok(Self::Use(entries)),
            (None, None) => Ok(Self::Single(single)),
        }
    }
}
