//! Paragraph walk that turns normalized source text into entries.
//!
//! Each `p` of a document is visited in order. The walk is a fold whose
//! accumulator holds the entry currently being written; an `ent` tag moves
//! it to a new name, every other paragraph appends to it.
//!
//! ```rust
//! use gcide_corpus::extract::{ExtractOptions, Extractor};
//!
//! let mut extractor = Extractor::new(ExtractOptions::all_sources());
//! extractor.extract("<p><ent>Cat</ent><br/>\n<def>A feline.</def></p>");
//! let extracted = extractor.finish();
//! assert_eq!(extracted.dictionary.get("Cat"), Some(" <def>A feline.</def>"));
//! assert_eq!(extracted.index.aliases("Cat"), ["Cat".to_string()]);
//! ```

use gcide_types::markup::{next_element_sibling, prev_element_sibling};
use gcide_types::{Dictionary, Element, Index, Node};
use tracing::{debug, info};

use crate::markup::{Whitespace, parse_fragment};

/// Edition label of the paragraphs kept by default.
pub const DEFAULT_ACCEPTED_SOURCE: &str = "1913 Webster";

const PROGRESS_EVERY: usize = 1000;

/// Tags whose content gets typographic character fixes.
const INLINE_CLEANUP_TAGS: [&str; 3] = ["hw", "wf", "pr"];

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtractOptions {
    /// Keep only paragraphs attributed to this edition; `None` keeps all.
    pub accepted_source: Option<String>,
}

impl ExtractOptions {
    pub fn all_sources() -> Self {
        Self {
            accepted_source: None,
        }
    }

    pub fn only_source(source: impl Into<String>) -> Self {
        Self {
            accepted_source: Some(source.into()),
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::only_source(DEFAULT_ACCEPTED_SOURCE)
    }
}

/// Counters over every document extracted so far.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExtractStats {
    pub documents: usize,
    pub paragraphs: usize,
    pub skipped: usize,
}

/// Result of a finished extraction.
#[derive(Clone, Debug)]
pub struct Extracted {
    pub dictionary: Dictionary,
    pub index: Index,
    pub stats: ExtractStats,
}

/// Accumulates entries across any number of documents.
pub struct Extractor {
    options: ExtractOptions,
    dictionary: Dictionary,
    index: Index,
    stats: ExtractStats,
}

/// Fold accumulator for one document walk.
#[derive(Debug, Default)]
struct WalkState {
    /// `None` until the first entry tag of the document.
    current: Option<String>,
}

/// Where a paragraph's edition label was found.
enum Attribution {
    Own(String),
    Later(String),
    Missing,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            dictionary: Dictionary::new(),
            index: Index::new(),
            stats: ExtractStats::default(),
        }
    }

    pub fn stats(&self) -> ExtractStats {
        self.stats
    }

    /// Walk one normalized document and merge its paragraphs into the entries.
    pub fn extract(&mut self, normalized: &str) {
        let paragraphs = collect_paragraphs(parse_fragment(normalized, Whitespace::Collapse));
        let attributions = if self.options.accepted_source.is_some() {
            attributions(&paragraphs)
        } else {
            paragraphs.iter().map(|_| Attribution::Missing).collect()
        };

        self.stats.documents += 1;
        paragraphs
            .into_iter()
            .zip(attributions)
            .enumerate()
            .fold(WalkState::default(), |state, (i, (paragraph, attribution))| {
                let state = self.walk_paragraph(state, paragraph, attribution);
                if i % PROGRESS_EVERY == 0 {
                    info!(
                        "parsed paragraph {i} ({})",
                        state.current.as_deref().unwrap_or("no entry yet")
                    );
                }
                state
            });
    }

    /// Drop pre-entry content and deduplicate aliases.
    pub fn finish(mut self) -> Extracted {
        let dropped = self.dictionary.discard_unattributed();
        if !dropped.is_empty() {
            debug!("dropped {} bytes of content before the first entry", dropped.len());
        }
        self.index.dedup();
        Extracted {
            dictionary: self.dictionary,
            index: self.index,
            stats: self.stats,
        }
    }

    fn walk_paragraph(
        &mut self,
        state: WalkState,
        mut paragraph: Element,
        attribution: Attribution,
    ) -> WalkState {
        self.stats.paragraphs += 1;

        if let Some(accepted) = &self.options.accepted_source {
            let label = match &attribution {
                Attribution::Own(label) | Attribution::Later(label) => Some(label.as_str()),
                Attribution::Missing => None,
            };
            if label != Some(accepted.as_str()) {
                self.stats.skipped += 1;
                debug!("skipping paragraph with source {:?}", label);
                return state;
            }
            if matches!(attribution, Attribution::Own(_)) {
                strip_source_markers(&mut paragraph.children);
            }
        }

        let state = self.take_entry_tags(state, &mut paragraph);
        trim_line_breaks(&mut paragraph.children);
        clean_inline(&mut paragraph.children);
        transliterate_greek(&mut paragraph.children);

        let fragment = paragraph.inner_html();
        match &state.current {
            Some(name) => self.dictionary.append(name, &fragment),
            None => self.dictionary.append_unattributed(&fragment),
        }
        state
    }

    fn take_entry_tags(&mut self, state: WalkState, paragraph: &mut Element) -> WalkState {
        let mut aliases = Vec::new();
        collect_texts(&paragraph.children, "ent", &mut aliases);
        let Some(name) = aliases.first().cloned() else {
            return state;
        };

        self.dictionary.ensure(&name);
        self.index.ensure(&name);
        for alias in &aliases {
            self.index.push_alias(&name, alias);
        }
        remove_entry_tags(&mut paragraph.children);

        WalkState {
            current: Some(name),
        }
    }
}

/// Every `p` in document order; a `p` inside another `p` stays with its parent.
fn collect_paragraphs(nodes: Vec<Node>) -> Vec<Element> {
    let mut out = Vec::new();
    for node in nodes {
        if let Node::Element(el) = node {
            if el.name == "p" {
                out.push(el);
            } else {
                out.extend(collect_paragraphs(el.children));
            }
        }
    }
    out
}

/// Label of the nearest `source` marker at or after each paragraph.
fn attributions(paragraphs: &[Element]) -> Vec<Attribution> {
    let mut out = Vec::with_capacity(paragraphs.len());
    let mut later: Option<String> = None;
    for paragraph in paragraphs.iter().rev() {
        let mut texts = Vec::new();
        collect_texts(&paragraph.children, "source", &mut texts);
        if texts.is_empty() {
            out.push(match &later {
                Some(label) => Attribution::Later(label.clone()),
                None => Attribution::Missing,
            });
        } else {
            let label = texts.concat().trim().to_string();
            later = Some(label.clone());
            out.push(Attribution::Own(label));
        }
    }
    out.reverse();
    out
}

/// Text of every descendant element called `name`, outermost first.
fn collect_texts(nodes: &[Node], name: &str, out: &mut Vec<String>) {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.name == name {
                out.push(el.text_content());
            } else {
                collect_texts(&el.children, name, out);
            }
        }
    }
}

/// Remove every `source` element, plus the nodes on either side of the first.
fn strip_source_markers(nodes: &mut Vec<Node>) {
    remove_first_source_with_neighbours(nodes);
    remove_all(nodes, "source");
}

fn remove_first_source_with_neighbours(nodes: &mut Vec<Node>) -> bool {
    for i in 0..nodes.len() {
        if nodes[i].is_element("source") {
            if i + 1 < nodes.len() {
                nodes.remove(i + 1);
            }
            nodes.remove(i);
            if i > 0 {
                nodes.remove(i - 1);
            }
            return true;
        }
        if let Node::Element(el) = &mut nodes[i]
            && remove_first_source_with_neighbours(&mut el.children)
        {
            return true;
        }
    }
    false
}

fn remove_all(nodes: &mut Vec<Node>, name: &str) {
    nodes.retain(|node| !node.is_element(name));
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            remove_all(&mut el.children, name);
        }
    }
}

/// Remove every `ent`, and a `br` element directly following one.
fn remove_entry_tags(nodes: &mut Vec<Node>) {
    let mut i = 0;
    while i < nodes.len() {
        if nodes[i].is_element("ent") {
            if let Some(next) = next_element_sibling(nodes, i)
                && nodes[next].is_element("br")
            {
                nodes.remove(next);
            }
            nodes.remove(i);
            continue;
        }
        if let Node::Element(el) = &mut nodes[i] {
            remove_entry_tags(&mut el.children);
        }
        i += 1;
    }
}

/// Drop a leading `br`; turn a trailing `br` into a space on the element before it.
fn trim_line_breaks(nodes: &mut Vec<Node>) {
    if let Some(first) = nodes.iter().position(|n| n.as_element().is_some())
        && nodes[first].is_element("br")
    {
        nodes.remove(first);
    }

    if let Some(last) = nodes.iter().rposition(|n| n.as_element().is_some())
        && nodes[last].is_element("br")
    {
        if let Some(prev) = prev_element_sibling(nodes, last)
            && let Some(el) = nodes[prev].as_element_mut()
        {
            append_text(el, " ");
        }
        nodes.remove(last);
    }
}

fn append_text(el: &mut Element, text: &str) {
    match el.children.last_mut() {
        Some(Node::Text(last)) => last.push_str(text),
        _ => el.children.push(Node::text(text)),
    }
}

fn clean_inline(nodes: &mut [Node]) {
    for node in nodes {
        if let Node::Element(el) = node {
            if INLINE_CLEANUP_TAGS.contains(&el.name.as_str()) {
                let text = typographic(&el.text_content());
                el.children = text_children(text);
            } else {
                clean_inline(&mut el.children);
            }
        }
    }
}

fn typographic(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '*' => out.push_str("&#x002d;"),
            '"' => out.push_str("&#8242;"),
            '`' => out.push_str("&#x02CA;"),
            '\'' => out.push('’'),
            other => out.push(other),
        }
    }
    out
}

fn transliterate_greek(nodes: &mut [Node]) {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.name == "grk" {
                let text = gcide_greek::transliterate(&el.text_content());
                el.children = text_children(text);
            } else {
                transliterate_greek(&mut el.children);
            }
        }
    }
}

fn text_children(text: String) -> Vec<Node> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Node::Text(text)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn webster(body: &str) -> String {
        format!("<p>{body}<br/> [<source>1913 Webster</source>]</p>\n")
    }

    fn run(options: ExtractOptions, docs: &[&str]) -> Extracted {
        let mut extractor = Extractor::new(options);
        for doc in docs {
            extractor.extract(doc);
        }
        extractor.finish()
    }

    #[test]
    fn continues_the_current_entry_across_paragraphs() {
        let doc = [
            webster("<ent>Cat</ent><br/>\n<hw>Cat</hw>, <def>A feline.</def>"),
            webster("<sn>2.</sn> <def>A tackle.</def>"),
        ]
        .concat();
        let out = run(ExtractOptions::default(), &[&doc]);

        let cat = out.dictionary.get("Cat").expect("cat entry");
        let feline = cat.find("A feline.").expect("first paragraph");
        let tackle = cat.find("A tackle.").expect("second paragraph");
        assert!(feline < tackle);
        assert!(!cat.contains("<ent"));
        assert!(!cat.contains("source"));
        assert_eq!(out.index.aliases("Cat"), ["Cat"]);
    }

    #[test]
    fn skips_paragraphs_from_other_sources() {
        let doc = concat!(
            "<p><ent>Dog</ent><br/>\n<def>A canine.</def> [<source>1913 Webster</source>]</p>\n",
            "<p><def>Modern sense.</def> [<source>WordNet 1.5</source>]</p>\n",
        );
        let out = run(ExtractOptions::default(), &[doc]);
        let dog = out.dictionary.get("Dog").unwrap();
        assert!(dog.contains("A canine."));
        assert!(!dog.contains("Modern sense."));
        assert_eq!(out.stats.skipped, 1);
    }

    #[test]
    fn skipped_entry_paragraph_creates_nothing() {
        let doc = "<p><ent>Byte</ent><def>Eight bits.</def> [<source>WordNet 1.5</source>]</p>";
        let out = run(ExtractOptions::default(), &[doc]);
        assert!(!out.dictionary.contains("Byte"));
        assert!(!out.index.contains("Byte"));
    }

    #[test]
    fn borrows_attribution_from_a_later_paragraph() {
        let doc = concat!(
            "<p><ent>Cow</ent><def>A bovine.</def></p>\n",
            "<p><def>More.</def> [<source>1913 Webster</source>]</p>\n",
        );
        let out = run(ExtractOptions::default(), &[doc]);
        let cow = out.dictionary.get("Cow").unwrap();
        assert!(cow.contains("A bovine."));
        assert!(cow.contains("More."));
    }

    #[test]
    fn missing_attribution_skips_instead_of_failing() {
        let doc = "<p><ent>Orphan</ent><def>No source at all.</def></p>";
        let out = run(ExtractOptions::default(), &[doc]);
        assert!(out.dictionary.is_empty());
        assert_eq!(out.stats.skipped, 1);
    }

    #[test]
    fn filter_can_be_disabled() {
        let doc = "<p><ent>Orphan</ent><def>Kept.</def></p>";
        let out = run(ExtractOptions::all_sources(), &[doc]);
        assert_eq!(out.dictionary.get("Orphan"), Some("<def>Kept.</def>"));
    }

    #[test]
    fn records_every_entry_tag_as_an_alias_once() {
        let doc = webster(
            "<ent>Color</ent><br/>\n<ent>Colour</ent><br/>\n<ent>Color</ent><br/>\n<def>Hue.</def>",
        );
        let out = run(ExtractOptions::default(), &[&doc]);
        assert_eq!(out.index.aliases("Color"), ["Color", "Colour"]);
        assert!(!out.dictionary.get("Color").unwrap().contains("<br/>"));
    }

    #[test]
    fn content_before_the_first_entry_is_discarded() {
        let doc = [
            webster("<def>Preface text.</def>"),
            webster("<ent>Apple</ent><def>A fruit.</def>"),
        ]
        .concat();
        let out = run(ExtractOptions::default(), &[&doc]);
        assert_eq!(out.dictionary.len(), 1);
        assert!(!out.dictionary.get("Apple").unwrap().contains("Preface"));
    }

    #[test]
    fn entries_interleave_across_documents() {
        let first = webster("<ent>Cat</ent><def>One.</def>");
        let second = webster("<ent>Cat</ent><def>Two.</def>");
        let out = run(ExtractOptions::default(), &[&first, &second]);
        let cat = out.dictionary.get("Cat").unwrap();
        assert!(cat.find("One.").unwrap() < cat.find("Two.").unwrap());
        assert_eq!(out.index.aliases("Cat"), ["Cat"]);
        assert_eq!(out.stats.documents, 2);
    }

    #[test]
    fn each_document_starts_without_a_current_entry() {
        let first = webster("<ent>Cat</ent><def>One.</def>");
        let second = webster("<def>Stray.</def>");
        let out = run(ExtractOptions::default(), &[&first, &second]);
        assert!(!out.dictionary.get("Cat").unwrap().contains("Stray."));
    }

    #[test]
    fn trims_line_breaks_at_paragraph_edges() {
        let doc = "<p><ent>E</ent></p><p><br/><b>a</b> mid <i>b</i><br/></p>";
        let out = run(ExtractOptions::all_sources(), &[doc]);
        assert_eq!(out.dictionary.get("E"), Some("<b>a</b> mid <i>b </i>"));
    }

    #[test]
    fn typographic_fixes_inside_headwords() {
        let doc = "<p><ent>Can't</ent><hw>Can*not's</hw> <pr>(k<it>a</it>n\"t`)</pr> <def>don't</def></p>";
        let out = run(ExtractOptions::all_sources(), &[doc]);
        let entry = out.dictionary.get("Can't").unwrap();
        assert!(entry.contains("<hw>Can&#x002d;not’s</hw>"));
        assert!(entry.contains("<pr>(kan&#8242;t&#x02CA;)</pr>"));
        assert!(entry.contains("<def>don't</def>"));
    }

    #[test]
    fn transliterates_greek_spans() {
        let doc = "<p><ent>Logic</ent><ety>[Gr. <grk>lo`gos</grk>]</ety></p>";
        let out = run(ExtractOptions::all_sources(), &[doc]);
        assert_eq!(
            out.dictionary.get("Logic"),
            Some("<ety>[Gr. <grk>λόγος</grk>]</ety>")
        );
    }

    #[test]
    fn malformed_paragraph_keeps_later_entries() {
        for bad in ["a < b", "x <! y", "x <![CDATA[ y", "x <?pi y", "x <!DOCTYPE"] {
            let doc = format!(
                "<p><ent>A</ent><def>one</def></p><p><def>{bad}</def></p><p><ent>B</ent><def>two</def></p>"
            );
            let mut extractor = Extractor::new(ExtractOptions::all_sources());
            extractor.extract(&doc);
            assert_eq!(extractor.stats().paragraphs, 3, "{bad}");
            let out = extractor.finish();

            let a = out.dictionary.get("A").unwrap();
            assert!(a.starts_with("<def>one</def><def>"), "{bad}: {a}");
            assert!(a.contains("&lt;"), "{bad}: {a}");
            assert_eq!(out.dictionary.get("B"), Some("<def>two</def>"), "{bad}");
            assert_eq!(out.index.aliases("B"), ["B"]);
        }
    }

    #[test]
    fn every_indexed_name_has_an_entry() {
        let doc = [
            webster("<ent>A</ent><def>first</def>"),
            webster("<ent>B</ent>"),
        ]
        .concat();
        let out = run(ExtractOptions::default(), &[&doc]);
        for (name, _) in out.index.iter() {
            assert!(out.dictionary.contains(name), "{name} missing from dictionary");
        }
    }
}
