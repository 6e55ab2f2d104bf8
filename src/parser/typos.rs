// file: src/parser/typos.rs
// description: exact-match correction of known misspelled queries
// reference: lookup table in parser/patterns.rs

use crate::parser::patterns::TYPO_FIXES;

#[derive(Debug, Clone, Copy, Default)]
pub struct TypoCorrector;

impl TypoCorrector {
    pub fn new() -> Self {
        Self
    }

    /// Case-sensitive lookup; unknown queries pass through unchanged.
    pub fn correct<'a>(&self, query: &'a str) -> &'a str {
        TYPO_FIXES.get(query).copied().unwrap_or(query)
    }
}
