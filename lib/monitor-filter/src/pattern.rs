use std::fmt;

use regex::Regex;
use snafu::{ResultExt, Snafu};

/// Errors raised while compiling a filter pattern.
#[derive(Debug, Snafu)]
pub enum PatternError {
    #[snafu(display("filter pattern {:?} is malformed: {}", pattern, source))]
    InvalidGlob {
        pattern: String,
        source: glob::PatternError,
    },
    #[snafu(display("filter pattern {:?} is not a valid regular expression: {}", pattern, source))]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl PatternError {
    /// The pattern text, as written in the configuration.
    pub fn pattern(&self) -> &str {
        match self {
            Self::InvalidGlob { pattern, .. } | Self::InvalidRegex { pattern, .. } => pattern,
        }
    }
}

#[derive(Clone, Debug)]
enum Matcher {
    Glob(glob::Pattern),
    Regex(Regex),
}

impl Matcher {
    fn matches(&self, value: &str) -> bool {
        match self {
            Matcher::Glob(pattern) => pattern.matches(value),
            Matcher::Regex(regex) => regex.is_match(value),
        }
    }
}

/// A single compiled filter pattern.
///
/// Patterns are Unix shell-style globs (`*`, `?`, `[a-z]`). A pattern wrapped in slashes,
/// like `/^cpu\.(idle|user)$/`, is a regular expression instead. A leading `!` negates the
/// pattern.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    negated: bool,
    matcher: Matcher,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let (negated, body) = match source.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, source),
        };

        let matcher = match regex_body(body) {
            Some(expr) => {
                Matcher::Regex(Regex::new(expr).context(InvalidRegexSnafu { pattern: source })?)
            }
            None => Matcher::Glob(
                glob::Pattern::new(body).context(InvalidGlobSnafu { pattern: source })?,
            ),
        };

        Ok(Self {
            source: source.to_owned(),
            negated,
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether `value` matches the pattern body. Negation is left to the caller.
    pub fn matches_body(&self, value: &str) -> bool {
        self.matcher.matches(value)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<&str> for Pattern {
    type Error = PatternError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn regex_body(body: &str) -> Option<&str> {
    (body.len() >= 2 && body.starts_with('/') && body.ends_with('/'))
        .then(|| &body[1..body.len() - 1])
}

/// A list of patterns evaluated together.
///
/// A value matches the set when it matches at least one positive pattern (or the set only
/// holds negated patterns) and none of the negated ones. An empty set matches nothing.
#[derive(Clone, Debug, Default)]
pub struct PatternSet {
    positive: Vec<Pattern>,
    negative: Vec<Pattern>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for pattern in patterns {
            let pattern = Pattern::new(pattern.as_ref())?;
            if pattern.is_negated() {
                set.negative.push(pattern);
            } else {
                set.positive.push(pattern);
            }
        }
        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn matches(&self, value: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        let included = self.positive.is_empty()
            || self.positive.iter().any(|pattern| pattern.matches_body(value));
        included && !self.negative.iter().any(|pattern| pattern.matches_body(value))
    }
}
