//! Apple Dictionary Services XML for a finished dictionary.

use std::collections::HashSet;

use gcide_types::{Dictionary, Index};
use tracing::info;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const DICTIONARY_OPEN: &str = concat!(
    "<d:dictionary xmlns=\"http://www.w3.org/1999/xhtml\" ",
    "xmlns:d=\"http://www.apple.com/DTDs/DictionaryService-1.0.rng\">\n"
);
const DICTIONARY_CLOSE: &str = "</d:dictionary>";

/// Deterministic entry identifiers: `A` followed by eight hex digits.
#[derive(Debug, Default)]
pub struct EntryIds {
    next: u32,
}

impl EntryIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for EntryIds {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let id = self.next;
        self.next = self.next.checked_add(1)?;
        Some(format!("A{id:08x}"))
    }
}

/// Render every entry, in dictionary order, with its index aliases.
pub fn build_xml(dictionary: &Dictionary, index: &Index) -> String {
    info!("building xml for {} entries", dictionary.len());
    let mut xml = String::with_capacity(dictionary.iter().map(|(_, f)| f.len() + 128).sum());
    xml.push_str(XML_HEADER);
    xml.push_str(DICTIONARY_OPEN);

    for ((name, fragment), id) in dictionary.iter().zip(EntryIds::new()) {
        let title = escape_attr(name);
        xml.push_str(&format!("\n<d:entry id=\"{id}\" d:title=\"{title}\">\n"));
        push_index(&mut xml, index.aliases(name));
        xml.push_str("<div>");
        xml.push_str(fragment);
        xml.push_str("</div>");
        xml.push_str("\n</d:entry>\n");
    }

    xml.push_str(DICTIONARY_CLOSE);
    xml
}

fn push_index(xml: &mut String, aliases: &[String]) {
    let mut seen = HashSet::new();
    for alias in aliases.iter().filter(|alias| seen.insert(alias.as_str())) {
        let alias = escape_attr(alias);
        xml.push_str(&format!("<d:index d:value=\"{alias}\" d:title=\"{alias}\"/>\n"));
    }
}

/// Fragments are already in escaped form; only the delimiter needs care.
fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}
