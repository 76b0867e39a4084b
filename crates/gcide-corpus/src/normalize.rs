//! Raw-text pass run before any markup parsing.
//!
//! [`replace_entities`] resolves `<NAME/` markers through the glyph tables;
//! [`clean_up`] fixes punctuation and whitespace artifacts of the source
//! files. [`normalize`] runs both, in that order.

use std::sync::LazyLock;

use gcide_types::UnknownEntities;
use regex::{Captures, Regex};
use tracing::debug;

use crate::entities;

static ENTITY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([?A-Za-z0-9_]+)/").expect("valid entity marker regex"));
static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^frac([0-9]+)x?([0-9]+)$").expect("valid fraction regex"));
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));
static ARROW_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<--.*?-->").expect("valid arrow comment regex"));
static EMPTY_PRONUNCIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*<pr>\((?:\?|\x{FFFD})\)</pr>").expect("valid empty pronunciation regex")
});
static SPACE_AFTER_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</([A-Za-z0-9_]+)>(\s+)").expect("valid closing tag regex"));

const FRACTION_SLASH: char = '\u{2044}';

/// Run entity substitution and cosmetic cleanup over one source document.
pub fn normalize(raw: &str, unknown: &mut UnknownEntities) -> String {
    clean_up(&replace_entities(raw, unknown))
}

/// Replace every `<NAME/` marker; unresolved names become `[NAME]`.
pub fn replace_entities(text: &str, unknown: &mut UnknownEntities) -> String {
    ENTITY_MARKER
        .replace_all(text, |caps: &Captures| resolve_entity(&caps[1], unknown))
        .into_owned()
}

fn resolve_entity(name: &str, unknown: &mut UnknownEntities) -> String {
    if let Some(glyph) = entities::entity(name) {
        return glyph.to_string();
    }
    if let (Some(lead), Some(tail)) = (name.get(..1), name.get(1..))
        && let Some(mark) = entities::accent(tail)
    {
        return format!("{lead}{mark}");
    }
    if let (Some(lead), Some(tail)) = (name.get(..2), name.get(2..))
        && let Some(mark) = entities::double_accent(tail)
    {
        return format!("{lead}{mark}");
    }
    if name.starts_with("frac")
        && let Some(caps) = FRACTION.captures(name)
    {
        return format!(
            "<sup>{}</sup>{FRACTION_SLASH}<sub>{}</sub>",
            &caps[1], &caps[2]
        );
    }
    if unknown.record(name) {
        debug!("unknown entity {name}");
    }
    format!("[{name}]")
}

/// Cosmetic fixes, applied in a fixed order.
pub fn clean_up(text: &str) -> String {
    let text = COMMENT.replace_all(text, "");
    let text = ARROW_COMMENT.replace_all(&text, "");
    let text = text.replace("<!--", "").replace("<--", "");

    let text = text.replace("--", "–").replace("---", "–");

    let text = text.replace("||", "‖").replace("\\'d8", "‖");

    let text = EMPTY_PRONUNCIATION.replace_all(&text, "");

    // Nested closings need a second pass.
    let text = SPACE_AFTER_CLOSE.replace_all(&text, "${2}</${1}>");
    let text = SPACE_AFTER_CLOSE.replace_all(&text, "${2}</${1}>");
    text.into_owned()
}
