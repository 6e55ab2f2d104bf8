// file: src/parser/patterns.rs
// description: compiled regex and immutable lookup tables for text normalization
// reference: https://docs.rs/lazy_static

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Latin keys of a QWERTY keyboard, in the order they map onto `CYRILLIC_KEYS`.
pub const LATIN_KEYS: &str = "qwertyuiop[]asdfghjkl;'zxcvbnm,.";

/// Cyrillic letters on the same physical keys of a ЙЦУКЕН keyboard.
pub const CYRILLIC_KEYS: &str = "йцукенгшщзхъфывапролджэячсмитьбю";

lazy_static! {
    /// Anything that is not a lowercase Cyrillic letter, Latin letter, digit or space.
    pub static ref DISALLOWED_CHARS: Regex = Regex::new(
        r"[^а-яa-z0-9 ]"
    ).expect("DISALLOWED_CHARS regex is valid");

    pub static ref KEYBOARD_LAYOUT: HashMap<char, char> = LATIN_KEYS
        .chars()
        .zip(CYRILLIC_KEYS.chars())
        .collect();

    pub static ref TYPO_FIXES: HashMap<&'static str, &'static str> = HashMap::from([
        ("кар тофель", "картофель"),
        ("греч не", "гречневая"),
        ("хозяйст мыло", "хозяйственное мыло"),
        ("diap night", "diapers night"),
        ("санпел", "san pellegrino"),
        ("prosc ros", "prosecco rose"),
    ]);
}
