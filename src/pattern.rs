//! Anchored prefix matching, with compiled patterns cached by their text.

use super::error::{ErrorKind, Result};
use failure::ResultExt;
use log::trace;
use regex::Regex;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct PatternMatcher {
    cache: FxHashMap<String, Regex>,
}

impl PatternMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` anchored at the start of the subject, or return the
    /// cached compilation of the same text.
    pub fn compile(&mut self, pattern: &str) -> Result<Regex> {
        if let Some(re) = self.cache.get(pattern) {
            return Ok(re.clone());
        }

        let re = Regex::new(&format!("^(?:{})", pattern))
            .context(ErrorKind::InvalidPattern(pattern.to_owned()))?;
        trace!("compiled pattern {:?}", pattern);
        self.cache.insert(pattern.to_owned(), re.clone());
        Ok(re)
    }

    pub fn match_prefix<'s>(&mut self, pattern: &str, subject: &'s str) -> Result<Option<&'s str>> {
        let re = self.compile(pattern)?;
        Ok(match_prefix(&re, subject))
    }

    /// Number of distinct patterns compiled so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// The prefix of `subject` matched by an anchored `re`.
pub fn match_prefix<'s>(re: &Regex, subject: &'s str) -> Option<&'s str> {
    re.find(subject)
        .filter(|m| m.start() == 0)
        .map(|m| m.as_str())
}
