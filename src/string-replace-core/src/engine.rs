//! Substitution engine.
//!
//! Applies queries one after another to a running buffer. Unmatched or
//! incomplete queries never abort the run; under strict mode they are
//! collected as [`FailureRecord`]s and the embedder decides how to surface
//! them.

use std::borrow::Cow;

use regex::{Captures, Replacer};
use thiserror::Error;
use tracing::{debug, trace};

use crate::options::{Captured, Replace, ReplaceFn};
use crate::query::Query;

/// A strict-mode query that could not be satisfied.
///
/// `index` is the query's position in the list passed to [`apply`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureRecord {
    /// The query lacks `search` or `replace`.
    #[error("Replace failed (strict mode) : options.search and options.replace are required")]
    MissingFields { index: usize },

    /// The search matched nothing in the buffer it was applied to.
    #[error("Replace failed (strict mode) : {search} → {replace}")]
    NoMatch {
        index: usize,
        search: String,
        replace: String,
    },
}

impl FailureRecord {
    /// Position of the failing query.
    pub fn index(&self) -> usize {
        match self {
            Self::MissingFields { index } | Self::NoMatch { index, .. } => *index,
        }
    }
}

/// Outcome of running a query list over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    /// The text after every query ran.
    pub text: String,
    /// Strict-mode failures in the order they occurred.
    pub failures: Vec<FailureRecord>,
}

impl Transformation {
    /// Whether every strict query was satisfied.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Apply `queries` in order to `text`.
pub fn apply(text: &str, queries: &[Query]) -> Transformation {
    let mut buffer = text.to_string();
    let mut failures = Vec::new();

    for (index, query) in queries.iter().enumerate() {
        let (Some(matcher), Some(replace)) = (query.matcher(), query.replace()) else {
            if query.strict() {
                failures.push(FailureRecord::MissingFields { index });
            }
            debug!(index, strict = query.strict(), "query is missing search or replace");
            continue;
        };

        // `replaceAll` alone decides the count; a `g` flag never widens it.
        let limit = if query.replace_all() { 0 } else { 1 };

        let replaced = match replace {
            Replace::Template(template) => matcher.replacen(&buffer, limit, template.as_str()),
            Replace::Func(func) => {
                matcher.replacen(&buffer, limit, CallbackReplacer::new(func, &buffer))
            }
        };

        // `replacen` only borrows when nothing matched.
        let replaced = match replaced {
            Cow::Borrowed(_) => None,
            Cow::Owned(text) => Some(text),
        };

        match replaced {
            Some(text) => {
                trace!(index, replace_all = query.replace_all(), "query applied");
                buffer = text;
            }
            None => {
                debug!(index, strict = query.strict(), "search matched nothing");
                if query.strict() {
                    failures.push(FailureRecord::NoMatch {
                        index,
                        search: query.search_display().unwrap_or_default(),
                        replace: replace.to_string(),
                    });
                }
            }
        }
    }

    Transformation {
        text: buffer,
        failures,
    }
}

/// Feeds each match to a user callback.
///
/// Matches arrive left to right, so the character offset is advanced
/// incrementally instead of recounting from the start of the subject.
struct CallbackReplacer<'a> {
    func: &'a ReplaceFn,
    subject: &'a str,
    last_byte: usize,
    last_char: usize,
}

impl<'a> CallbackReplacer<'a> {
    fn new(func: &'a ReplaceFn, subject: &'a str) -> Self {
        Self {
            func,
            subject,
            last_byte: 0,
            last_char: 0,
        }
    }

    fn char_offset(&mut self, byte_offset: usize) -> usize {
        self.last_char += self.subject[self.last_byte..byte_offset].chars().count();
        self.last_byte = byte_offset;
        self.last_char
    }
}

impl Replacer for CallbackReplacer<'_> {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        let whole = caps.get_match();
        let captured = Captured {
            matched: whole.as_str(),
            groups: caps
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str()))
                .collect(),
            offset: self.char_offset(whole.start()),
            byte_offset: whole.start(),
            subject: self.subject,
        };
        dst.push_str(&(self.func)(&captured));
    }
}
