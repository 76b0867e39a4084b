//! Glyph tables for the corpus' `<NAME/` entity markers.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Whole entity names.
static ENTITIES: &[(&str, &str)] = &[
    // structure
    ("br", "<br/>"),
    ("lt", "&lt;"),
    ("gt", "&gt;"),
    ("amp", "&amp;"),
    ("?", "?"),
    // ligatures and letters
    ("ae", "æ"),
    ("AE", "Æ"),
    ("aelig", "æ"),
    ("AElig", "Æ"),
    ("oe", "œ"),
    ("OE", "Œ"),
    ("oelig", "œ"),
    ("OElig", "Œ"),
    ("szlig", "ß"),
    ("thorn", "þ"),
    ("THORN", "Þ"),
    ("eth", "ð"),
    ("edh", "ð"),
    ("ETH", "Ð"),
    ("oslash", "ø"),
    ("Oslash", "Ø"),
    ("filig", "ﬁ"),
    ("fllig", "ﬂ"),
    ("yogh", "ȝ"),
    ("schwa", "ə"),
    ("dotless_i", "ı"),
    // quotes and punctuation
    ("ldquo", "“"),
    ("rdquo", "”"),
    ("lsquo", "‘"),
    ("rsquo", "’"),
    ("laquo", "«"),
    ("raquo", "»"),
    ("mdash", "—"),
    ("ndash", "–"),
    ("hyph", "-"),
    ("sect", "§"),
    ("para", "¶"),
    ("pilcrow", "¶"),
    ("dagger", "†"),
    ("ddagger", "‡"),
    ("middot", "·"),
    ("bullet", "•"),
    ("ellipsis", "…"),
    ("iexcl", "¡"),
    ("iquest", "¿"),
    ("nbsp", "\u{00a0}"),
    ("hand", "☞"),
    ("asterism", "⁂"),
    ("star", "★"),
    // marks
    ("deg", "°"),
    ("prime", "′"),
    ("dprime", "″"),
    ("tprime", "‴"),
    ("min", "′"),
    ("sec", "″"),
    ("accent", "ˊ"),
    ("bprime", "ʺ"),
    ("mdot", "·"),
    ("breve", "˘"),
    ("macr", "¯"),
    ("cedil", "¸"),
    ("umlaut", "¨"),
    // arithmetic
    ("times", "×"),
    ("divide", "÷"),
    ("plusmn", "±"),
    ("minus", "−"),
    ("root", "√"),
    ("cuberoot", "∛"),
    ("infin", "∞"),
    ("equals", "="),
    ("ratio", "∶"),
    ("therefore", "∴"),
    ("because", "∵"),
    ("angle", "∠"),
    ("parallel", "∥"),
    ("perp", "⊥"),
    ("square", "□"),
    ("circle", "○"),
    ("triangle", "△"),
    ("sum", "∑"),
    ("integral", "∫"),
    // money and apothecary
    ("pound", "£"),
    ("cent", "¢"),
    ("yen", "¥"),
    ("oz", "℥"),
    ("dram", "ʒ"),
    ("scruple", "℈"),
    ("recipe", "℞"),
    // music
    ("sharp", "♯"),
    ("flat", "♭"),
    ("natural", "♮"),
    // astronomy
    ("sun", "☉"),
    ("moon", "☽"),
    ("mercury", "☿"),
    ("venus", "♀"),
    ("earth", "⊕"),
    ("mars", "♂"),
    ("jupiter", "♃"),
    ("saturn", "♄"),
    ("uranus", "♅"),
    ("neptune", "♆"),
    ("male", "♂"),
    ("female", "♀"),
    ("aries", "♈"),
    ("taurus", "♉"),
    ("gemini", "♊"),
    ("cancer", "♋"),
    ("leo", "♌"),
    ("virgo", "♍"),
    ("libra", "♎"),
    ("scorpio", "♏"),
    ("sagittarius", "♐"),
    ("capricorn", "♑"),
    ("aquarius", "♒"),
    ("pisces", "♓"),
];

/// Marks applied to the single leading letter of the name (`amac`, `ecr`).
static ACCENTS: &[(&str, &str)] = &[
    ("acute", "\u{0301}"),
    ("grave", "\u{0300}"),
    ("cir", "\u{0302}"),
    ("circ", "\u{0302}"),
    ("uml", "\u{0308}"),
    ("til", "\u{0303}"),
    ("tilde", "\u{0303}"),
    ("ced", "\u{0327}"),
    ("cedil", "\u{0327}"),
    ("ring", "\u{030a}"),
    ("mac", "\u{0304}"),
    ("sl", "\u{0304}"),
    ("cr", "\u{0306}"),
    ("breve", "\u{0306}"),
    ("dot", "\u{0307}"),
    ("dd", "\u{0323}"),
    ("ul", "\u{0332}"),
    ("caron", "\u{030c}"),
];

/// Marks applied to a two-letter lead (`oomac`, `oocr`).
static DOUBLE_ACCENTS: &[(&str, &str)] = &[
    ("mac", "\u{0304}"),
    ("cr", "\u{0306}"),
    ("uml", "\u{0308}"),
    ("dot", "\u{0307}"),
];

fn map(table: &'static [(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    table.iter().copied().collect()
}

static ENTITY_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| map(ENTITIES));
static ACCENT_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| map(ACCENTS));
static DOUBLE_ACCENT_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| map(DOUBLE_ACCENTS));

pub fn entity(name: &str) -> Option<&'static str> {
    ENTITY_MAP.get(name).copied()
}

pub fn accent(name: &str) -> Option<&'static str> {
    ACCENT_MAP.get(name).copied()
}

pub fn double_accent(name: &str) -> Option<&'static str> {
    DOUBLE_ACCENT_MAP.get(name).copied()
}
