// file: src/parser/normalizer.rs
// description: text normalization and keyboard layout repair for catalog fields and queries
// reference: QWERTY / ЙЦУКЕН keyboard layouts

use crate::parser::patterns::{DISALLOWED_CHARS, KEYBOARD_LAYOUT};

/// Normalizes free text into the form stored in the index and sent as queries.
///
/// The text is lowercased, every character outside `[а-яa-z0-9 ]` becomes a
/// space and whitespace runs are collapsed. If a Latin letter survives, the
/// whole string is treated as Cyrillic typed on a Latin layout and remapped
/// key by key.
#[derive(Debug, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Absent input normalizes to the empty string.
    pub fn normalize(&self, text: Option<&str>) -> String {
        let Some(text) = text else {
            return String::new();
        };

        let lowered = text.to_lowercase();
        let filtered = DISALLOWED_CHARS.replace_all(&lowered, " ");
        let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");

        if Self::contains_latin(&collapsed) {
            Self::remap_layout(&collapsed)
        } else {
            collapsed
        }
    }

    pub fn normalize_str(&self, text: &str) -> String {
        self.normalize(Some(text))
    }

    pub fn contains_latin(text: &str) -> bool {
        text.chars().any(|c| c.is_ascii_lowercase())
    }

    fn remap_layout(text: &str) -> String {
        text.chars()
            .map(|c| KEYBOARD_LAYOUT.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
