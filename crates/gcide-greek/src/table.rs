//! Romanized fragment table.
//!
//! Keys follow the Beta Code letters with trailing diacritics: `/` (or the
//! corpus' backtick) acute, `\` grave, `=` circumflex, `)` smooth and `(`
//! rough breathing, `+` diaeresis, `|` iota subscript.

/// Longest key in [`TABLE`], in characters.
pub const MAX_FRAGMENT_LEN: usize = 3;

#[rustfmt::skip]
pub(crate) static TABLE: &[(&str, &str)] = &[
    // letters
    ("a", "α"), ("b", "β"), ("g", "γ"), ("d", "δ"),
    ("e", "ε"), ("z", "ζ"), ("h", "η"), ("q", "θ"),
    ("i", "ι"), ("k", "κ"), ("l", "λ"), ("m", "μ"),
    ("n", "ν"), ("c", "ξ"), ("o", "ο"), ("p", "π"),
    ("r", "ρ"), ("s", "σ"), ("t", "τ"), ("u", "υ"),
    ("f", "φ"), ("x", "χ"), ("y", "ψ"), ("w", "ω"),
    ("A", "Α"), ("B", "Β"), ("G", "Γ"), ("D", "Δ"),
    ("E", "Ε"), ("Z", "Ζ"), ("H", "Η"), ("Q", "Θ"),
    ("I", "Ι"), ("K", "Κ"), ("L", "Λ"), ("M", "Μ"),
    ("N", "Ν"), ("C", "Ξ"), ("O", "Ο"), ("P", "Π"),
    ("R", "Ρ"), ("S", "Σ"), ("T", "Τ"), ("U", "Υ"),
    ("F", "Φ"), ("X", "Χ"), ("Y", "Ψ"), ("W", "Ω"),
    // acute
    ("a/", "ά"), ("a`", "ά"), ("e/", "έ"), ("e`", "έ"),
    ("h/", "ή"), ("h`", "ή"), ("i/", "ί"), ("i`", "ί"),
    ("o/", "ό"), ("o`", "ό"), ("u/", "ύ"), ("u`", "ύ"),
    ("w/", "ώ"), ("w`", "ώ"),
    // grave
    ("a\\", "ὰ"), ("e\\", "ὲ"), ("h\\", "ὴ"), ("i\\", "ὶ"),
    ("o\\", "ὸ"), ("u\\", "ὺ"), ("w\\", "ὼ"),
    // circumflex
    ("a=", "ᾶ"), ("h=", "ῆ"), ("i=", "ῖ"), ("u=", "ῦ"),
    ("w=", "ῶ"),
    // breathings
    ("a)", "ἀ"), ("a(", "ἁ"), ("e)", "ἐ"), ("e(", "ἑ"),
    ("h)", "ἠ"), ("h(", "ἡ"), ("i)", "ἰ"), ("i(", "ἱ"),
    ("o)", "ὀ"), ("o(", "ὁ"), ("u)", "ὐ"), ("u(", "ὑ"),
    ("w)", "ὠ"), ("w(", "ὡ"),
    // diaeresis, iota subscript, rho with breathing
    ("i+", "ϊ"), ("u+", "ϋ"), ("a|", "ᾳ"), ("h|", "ῃ"),
    ("w|", "ῳ"), ("r(", "ῥ"), ("r)", "ῤ"),
    // breathing + accent
    ("a)\\", "ἂ"), ("a(\\", "ἃ"), ("a)/", "ἄ"), ("a(/", "ἅ"),
    ("a)=", "ἆ"), ("a(=", "ἇ"), ("e)\\", "ἒ"), ("e(\\", "ἓ"),
    ("e)/", "ἔ"), ("e(/", "ἕ"), ("h)\\", "ἢ"), ("h(\\", "ἣ"),
    ("h)/", "ἤ"), ("h(/", "ἥ"), ("h)=", "ἦ"), ("h(=", "ἧ"),
    ("i)\\", "ἲ"), ("i(\\", "ἳ"), ("i)/", "ἴ"), ("i(/", "ἵ"),
    ("i)=", "ἶ"), ("i(=", "ἷ"), ("o)\\", "ὂ"), ("o(\\", "ὃ"),
    ("o)/", "ὄ"), ("o(/", "ὅ"), ("u)\\", "ὒ"), ("u(\\", "ὓ"),
    ("u)/", "ὔ"), ("u(/", "ὕ"), ("u)=", "ὖ"), ("u(=", "ὗ"),
    ("w)\\", "ὢ"), ("w(\\", "ὣ"), ("w)/", "ὤ"), ("w(/", "ὥ"),
    ("w)=", "ὦ"), ("w(=", "ὧ"),
];
