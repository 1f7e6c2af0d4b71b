//! Compilation of `tag_validation.pattern_rules` into reusable matchers.
//!
//! The table is built once per loaded policy and is read-only afterwards, so it can be shared
//! across threads without locking.

use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid pattern for tag '{tag_key}': {raw_pattern} ({reason})")]
pub struct InvalidPatternError {
    pub tag_key: String,
    pub raw_pattern: String,
    pub reason: String,
}

/// Frozen tag key -> compiled pattern table.
#[derive(Clone, Debug, Default)]
pub struct PatternTable {
    patterns: BTreeMap<String, Regex>,
}

impl PatternTable {
    pub fn get(&self, tag_key: &str) -> Option<&Regex> {
        self.patterns.get(tag_key)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn tag_keys(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }
}

/// Compile every pattern rule, failing on the first (in key order) that does not compile.
///
/// Nothing is returned on failure, so callers never observe a partially built table.
pub fn compile_patterns(
    pattern_rules: &BTreeMap<String, String>,
) -> Result<PatternTable, InvalidPatternError> {
    let mut patterns = BTreeMap::new();
    for (tag_key, raw) in pattern_rules {
        let regex = Regex::new(raw).map_err(|err| InvalidPatternError {
            tag_key: tag_key.clone(),
            raw_pattern: raw.clone(),
            reason: err.to_string(),
        })?;
        patterns.insert(tag_key.clone(), regex);
    }
    Ok(PatternTable { patterns })
}
