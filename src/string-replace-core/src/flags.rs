//! Pattern flags.
//!
//! Flags are written the way JavaScript writes them after a regular
//! expression literal (`"gi"`, `"ms"`), and translated onto
//! [`regex::RegexBuilder`] options when a matcher is compiled.

use std::fmt;
use std::str::FromStr;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A validated set of pattern flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Flags {
    /// `g`: recorded only. The replacement count is governed by `replaceAll`.
    pub global: bool,
    /// `i`: case-insensitive matching.
    pub case_insensitive: bool,
    /// `m`: `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `s`: `.` matches `\n`.
    pub dot_all: bool,
    /// `u`: unicode mode. Always on in the underlying engine.
    pub unicode: bool,
    /// `x`: whitespace and `#` comments in the pattern are ignored.
    pub verbose: bool,
}

impl Flags {
    /// Union of two flag sets.
    pub fn union(self, other: Flags) -> Flags {
        Flags {
            global: self.global || other.global,
            case_insensitive: self.case_insensitive || other.case_insensitive,
            multi_line: self.multi_line || other.multi_line,
            dot_all: self.dot_all || other.dot_all,
            unicode: self.unicode || other.unicode,
            verbose: self.verbose || other.verbose,
        }
    }

    /// Whether no flag is set.
    pub fn is_empty(&self) -> bool {
        *self == Flags::default()
    }

    /// Apply the matching-relevant flags to a regex builder.
    pub(crate) fn configure(&self, builder: &mut RegexBuilder) {
        builder
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_all)
            .ignore_whitespace(self.verbose);
    }
}

impl FromStr for Flags {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::default();
        for flag in s.chars() {
            match flag {
                'g' => flags.global = true,
                'i' => flags.case_insensitive = true,
                'm' => flags.multi_line = true,
                's' => flags.dot_all = true,
                'u' => flags.unicode = true,
                'x' => flags.verbose = true,
                'y' | 'd' | 'v' => return Err(ConfigError::UnsupportedFlag { flag }),
                _ => return Err(ConfigError::UnknownFlag { flag }),
            }
        }
        Ok(flags)
    }
}

impl TryFrom<String> for Flags {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Flags> for String {
    fn from(flags: Flags) -> Self {
        flags.to_string()
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = [
            (self.global, 'g'),
            (self.case_insensitive, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.verbose, 'x'),
        ];
        for (set, letter) in letters {
            if set {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}
