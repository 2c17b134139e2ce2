//! Name ordering that ignores case and diacritics.
//!
//! An approximation of a primary-strength locale collation: accents and case
//! are ignored and a handful of Latin letters that have no canonical
//! decomposition (`ø`, `æ`, `ß`, `ł`, `đ`, ...) fold to their base letters.
//! Everything else, punctuation and symbols included, compares by code point
//! of the folded key, so `"{"` sorts after letters.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Letters NFD leaves whole, mapped to the letters they sort with.
fn fold_letter(c: char) -> Option<&'static str> {
    match c {
        'ø' | 'Ø' => Some("o"),
        'æ' | 'Æ' => Some("ae"),
        'œ' | 'Œ' => Some("oe"),
        'ß' | 'ẞ' => Some("ss"),
        'ł' | 'Ł' => Some("l"),
        'đ' | 'Đ' | 'ð' | 'Ð' => Some("d"),
        'þ' | 'Þ' => Some("th"),
        'ı' => Some("i"),
        _ => None,
    }
}

/// Folds a name to its primary-strength key: canonical decomposition,
/// combining marks dropped, undecomposable letters folded, lowercased.
#[must_use]
pub fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        match fold_letter(c) {
            Some(folded) => key.push_str(folded),
            None => key.extend(c.to_lowercase()),
        }
    }
    key
}

/// Compares two names at primary strength. `"padmé"` and `"Padme"` are equal.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}
