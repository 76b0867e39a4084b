//! Transliterate GCIDE `<grk>` spans into Greek script.
//!
//! The corpus writes Greek with Latin letters plus ASCII diacritic marks.
//! Decoding is a greedy longest-match scan over a fixed fragment table.
//!
//! # How it works
//! 1. At each position try fragments of 3, 2 and 1 characters, longest first.
//! 2. The first fragment found in the table is emitted and skipped over.
//! 3. A lone `s` at the very end of the input becomes final sigma `ς`.
//! 4. A character with no fragment is copied through unchanged.
//!
//! The decoder never fails and never drops input: an unknown character costs
//! readability, a dropped one costs meaning.
//!
//! # Example
//! ```rust
//! use gcide_greek::transliterate;
//!
//! assert_eq!(transliterate("lo`gos"), "λόγος");
//! assert_eq!(transliterate("a)/nqrwpos"), "ἄνθρωπος");
//! ```

mod table;

use std::collections::HashMap;
use std::sync::LazyLock;

pub use table::MAX_FRAGMENT_LEN;

const FINAL_SIGMA: char = 'ς';

static FRAGMENTS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| table::TABLE.iter().copied().collect());

/// Greek rendering of a single romanized fragment, if the table has one.
pub fn lookup(fragment: &str) -> Option<&'static str> {
    FRAGMENTS.get(fragment).copied()
}

/// Decode a romanized Greek string.
pub fn transliterate(input: &str) -> String {
    let boundaries: Vec<usize> = input
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(input.len()))
        .collect();
    let char_count = boundaries.len() - 1;

    let mut out = String::with_capacity(input.len() * 2);
    let mut pos = 0;
    while pos < char_count {
        let start = boundaries[pos];
        let longest = MAX_FRAGMENT_LEN.min(char_count - pos);
        let hit = (1..=longest).rev().find_map(|len| {
            let fragment = &input[start..boundaries[pos + len]];
            lookup(fragment).map(|glyph| (fragment, glyph, len))
        });

        match hit {
            Some(("s", _, 1)) if pos + 1 == char_count => {
                out.push(FINAL_SIGMA);
                pos += 1;
            }
            Some((_, glyph, len)) => {
                out.push_str(glyph);
                pos += len;
            }
            None => {
                out.push_str(&input[start..boundaries[pos + 1]]);
                pos += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_and_medial_sigma() {
        assert_eq!(transliterate("s"), "ς");
        assert_eq!(transliterate("ss"), "σς");
        assert_eq!(transliterate("sa"), "σα");
        assert_eq!(transliterate("qeos"), "θεος");
    }

    #[test]
    fn prefers_longest_fragment() {
        assert_eq!(transliterate("a)/"), "ἄ");
        assert_eq!(transliterate("a)"), "ἀ");
        assert_eq!(transliterate("r(ei=n"), "ῥεῖν");
        assert_eq!(transliterate("w|dh/"), "ῳδή");
    }

    #[test]
    fn passes_unknown_characters_through() {
        assert_eq!(transliterate("a-b"), "α-β");
        assert_eq!(transliterate("1 v?"), "1 v?");
        assert_eq!(transliterate(""), "");
    }

    #[test]
    fn greek_input_is_unchanged() {
        let greek = "λόγος ἄνθρωπος";
        assert_eq!(transliterate(greek), greek);
    }

    #[test]
    fn never_shrinks_below_one_glyph_per_untranslated_char() {
        let input = "j v ; 9";
        assert_eq!(transliterate(input).chars().count(), input.chars().count());
    }

    #[test]
    fn table_keys_fit_the_scan_window() {
        assert!(
            table::TABLE
                .iter()
                .all(|(key, _)| (1..=MAX_FRAGMENT_LEN).contains(&key.chars().count()))
        );
        assert_eq!(lookup("q"), Some("θ"));
        assert_eq!(lookup("zz"), None);
    }
}
