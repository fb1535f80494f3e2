//! Compile generated patterns into path predicates.
//!
//! Every pattern is compiled with the same options:
//!
//! - `*` and `?` never match `/`, `**` matches any number of directories
//! - `{` and `}` are literal characters, not alternation
//! - a leading `!` is a literal character, not negation
//! - extended globs like `+(a|b)` are not recognized and match literally
//! - wildcards match names starting with `.`
//!
//! A pattern the glob engine rejects, such as one with an unclosed `[`, is
//! matched as a literal path instead.

use globset::{GlobBuilder, GlobMatcher};
use log::warn;

use crate::{error::Error, patterns::PatternSet};

#[derive(Clone, Debug)]
pub struct Matcher {
    pattern: String,
    matcher: GlobMatcher,
}

impl Matcher {
    pub fn compile(pattern: &str) -> Result<Self, Error> {
        let matcher = match build(&literal_braces(pattern)) {
            Ok(matcher) => matcher,
            Err(err) => {
                warn!("matching pattern {:?} literally: {}", pattern, err);
                build(&globset::escape(pattern)).map_err(|source| Error::Pattern {
                    pattern: pattern.to_owned(),
                    source,
                })?
            }
        };
        Ok(Self {
            pattern: pattern.to_owned(),
            matcher,
        })
    }

    /// Test a forward-slash path relative to the project root.
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Matcher>, Error> {
    patterns
        .iter()
        .map(|pattern| Matcher::compile(pattern))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Excluded,
    NotIncluded,
    Included,
}

/// Compiled include and exclude matchers for one resolution.
#[derive(Clone, Debug)]
pub struct Rules {
    include: Vec<Matcher>,
    exclude: Vec<Matcher>,
}

impl Rules {
    pub fn compile(patterns: &PatternSet) -> Result<Self, Error> {
        Ok(Self {
            include: compile_all(&patterns.include)?,
            exclude: compile_all(&patterns.exclude)?,
        })
    }

    /// Exclusion is checked first and always wins.
    pub fn classify(&self, path: &str) -> Decision {
        if self.exclude.iter().any(|matcher| matcher.is_match(path)) {
            Decision::Excluded
        } else if self.include.iter().any(|matcher| matcher.is_match(path)) {
            Decision::Included
        } else {
            Decision::NotIncluded
        }
    }
}

fn build(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()?;
    Ok(glob.compile_matcher())
}

fn literal_braces(pattern: &str) -> String {
    let mut literal = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '{' => literal.push_str("[{]"),
            '}' => literal.push_str("[}]"),
            c => literal.push(c),
        }
    }
    literal
}
