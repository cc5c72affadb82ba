//! Query normalization.
//!
//! Turns any [`Options`] shape into an ordered list of [`Query`] values with
//! defaults applied and the matcher compiled. A query without `search` or
//! `replace` is still produced; the engine decides what that means using the
//! query's own `strict` flag.

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};
use tracing::trace;

use crate::error::{ConfigError, ConfigResult};
use crate::flags::Flags;
use crate::options::{Options, QueryOptions, Replace, Search};

/// A normalized, immutable search/replace directive.
#[derive(Debug, Clone)]
pub struct Query {
    search: Option<Search>,
    replace: Option<Replace>,
    replace_all: bool,
    flags: Option<Flags>,
    strict: bool,
    matcher: Option<Regex>,
}

impl Query {
    /// Apply defaults and compile the matcher.
    pub fn new(options: QueryOptions) -> ConfigResult<Self> {
        let QueryOptions {
            search,
            replace,
            replace_all,
            flags,
            strict,
        } = options;

        let matcher = search
            .as_ref()
            .map(|search| resolve_matcher(search, flags))
            .transpose()?;

        Ok(Self {
            search,
            replace,
            replace_all: replace_all.unwrap_or(false),
            flags,
            strict: strict.unwrap_or(false),
            matcher,
        })
    }

    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    pub fn replace(&self) -> Option<&Replace> {
        self.replace.as_ref()
    }

    pub fn replace_all(&self) -> bool {
        self.replace_all
    }

    /// Extra flags given alongside the search, if any.
    pub fn flags(&self) -> Option<Flags> {
        self.flags
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// The search as failure messages show it: a literal as written, a
    /// pattern with the flags its matcher was compiled with.
    pub fn search_display(&self) -> Option<String> {
        self.search.as_ref().map(|search| match (search, self.flags) {
            (Search::Pattern(pattern), Some(extra)) => {
                format!("/{}/{}", pattern.source(), pattern.flags().union(extra))
            }
            (search, _) => search.to_string(),
        })
    }

    /// Compiled matcher; `None` when the query has no search.
    pub fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }
}

/// Normalize any options shape into queries, preserving declaration order.
pub fn normalize(options: impl Into<Options>) -> ConfigResult<Vec<Query>> {
    let queries = options
        .into()
        .into_query_options()
        .into_iter()
        .map(Query::new)
        .collect::<ConfigResult<Vec<_>>>()?;
    trace!(count = queries.len(), "normalized queries");
    Ok(queries)
}

/// Compile a search into a matcher.
///
/// A literal is escaped so it matches verbatim. A pattern keeps its own flags
/// and gains any extra ones.
fn resolve_matcher(search: &Search, extra: Option<Flags>) -> ConfigResult<Regex> {
    let (source, flags) = match search {
        Search::Literal(text) => (Cow::Owned(regex::escape(text)), extra.unwrap_or_default()),
        Search::Pattern(pattern) => {
            let flags = extra.map_or(pattern.flags(), |extra| pattern.flags().union(extra));
            (Cow::Borrowed(pattern.source()), flags)
        }
    };

    let mut builder = RegexBuilder::new(&source);
    flags.configure(&mut builder);
    builder
        .build()
        .map_err(|e| ConfigError::invalid_pattern(source.into_owned(), e))
}
