//! Per-entry rewrite run once every document has been extracted.
//!
//! Entries are independent: each fragment is trimmed, re-parsed, has its
//! quotation authors pulled into the quotes, and is rebuilt with tags mapped
//! onto the small [`OutputTag`] vocabulary.

use std::sync::LazyLock;

use gcide_types::markup::{next_element_sibling, to_html};
use gcide_types::{Dictionary, Element, Node};
use regex::Regex;
use tracing::{debug, info};

use crate::markup::{Whitespace, parse_fragment};

static LONE_DASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+-{2,3}\s+").expect("valid dash run regex"));

const PROGRESS_EVERY: usize = 1000;

/// Tag kinds an output fragment may contain.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OutputTag {
    Heading,
    Span,
    Italic,
    Bold,
    LineBreak,
    Paragraph,
    Superscript,
    Subscript,
    Link,
    Block,
}

impl OutputTag {
    pub const ALL: [OutputTag; 10] = [
        OutputTag::Heading,
        OutputTag::Span,
        OutputTag::Italic,
        OutputTag::Bold,
        OutputTag::LineBreak,
        OutputTag::Paragraph,
        OutputTag::Superscript,
        OutputTag::Subscript,
        OutputTag::Link,
        OutputTag::Block,
    ];

    /// Output kind for a source tag name.
    pub fn classify(name: &str) -> Self {
        match name {
            "hw" => OutputTag::Heading,
            "plain" => OutputTag::Span,
            "xex" | "it" | "i" => OutputTag::Italic,
            "b" => OutputTag::Bold,
            "br" => OutputTag::LineBreak,
            "p" => OutputTag::Paragraph,
            "sup" => OutputTag::Superscript,
            "sub" => OutputTag::Subscript,
            "a" => OutputTag::Link,
            _ => OutputTag::Block,
        }
    }

    /// HTML element name written for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputTag::Heading => "h2",
            OutputTag::Span => "span",
            OutputTag::Italic => "i",
            OutputTag::Bold => "b",
            OutputTag::LineBreak => "br",
            OutputTag::Paragraph => "p",
            OutputTag::Superscript => "sup",
            OutputTag::Subscript => "sub",
            OutputTag::Link => "a",
            OutputTag::Block => "div",
        }
    }
}

/// Rewrite every entry of the dictionary in place.
pub fn postprocess(dictionary: &mut Dictionary) {
    info!("postprocessing {} entries", dictionary.len());
    for (i, (name, fragment)) in dictionary.iter_mut().enumerate() {
        *fragment = postprocess_entry(fragment);
        if i % PROGRESS_EVERY == 0 {
            info!("postprocessing entry {i} ({name})");
        } else {
            debug!("postprocessing entry {i} ({name})");
        }
    }
}

/// Rewrite one entry fragment.
pub fn postprocess_entry(fragment: &str) -> String {
    let text = LONE_DASH_RUN.replace(fragment.trim(), " — ");
    let text = text.replacen('\'', "’", 1);

    let mut nodes = parse_fragment(&text, Whitespace::Preserve);
    merge_quote_authors(&mut nodes);
    let nodes: Vec<Node> = nodes.into_iter().map(rename_tags).collect();
    to_html(&nodes)
}

/// Move `qau` elements found in the element after a `q` into the `q`.
///
/// The sibling that held them is removed.
pub fn merge_quote_authors(nodes: &mut Vec<Node>) {
    let mut i = 0;
    while i < nodes.len() {
        if nodes[i].is_element("q")
            && let Some(next) = next_element_sibling(nodes, i)
            && nodes[next]
                .as_element()
                .is_some_and(|el| el.has_descendant("qau"))
            && let Node::Element(mut sibling) = nodes.remove(next)
        {
            let mut authors = Vec::new();
            take_elements(&mut sibling.children, "qau", &mut authors);
            if let Some(quote) = nodes[i].as_element_mut() {
                quote
                    .children
                    .extend(authors.into_iter().map(Node::Element));
            }
        }
        if let Some(el) = nodes[i].as_element_mut() {
            merge_quote_authors(&mut el.children);
        }
        i += 1;
    }
}

fn take_elements(nodes: &mut Vec<Node>, name: &str, out: &mut Vec<Element>) {
    let mut i = 0;
    while i < nodes.len() {
        if nodes[i].is_element(name) {
            if let Node::Element(el) = nodes.remove(i) {
                out.push(el);
            }
            continue;
        }
        if let Some(el) = nodes[i].as_element_mut() {
            take_elements(&mut el.children, name, out);
        }
        i += 1;
    }
}

/// Build the renamed copy of a node; a renamed element keeps its source name as a class.
pub fn rename_tags(node: Node) -> Node {
    match node {
        Node::Text(text) => Node::Text(text),
        Node::Element(Element {
            name,
            attrs,
            children,
        }) => {
            let tag = OutputTag::classify(&name);
            let mut renamed = Element {
                name: tag.as_str().to_string(),
                attrs,
                children: children.into_iter().map(rename_tags).collect(),
            };
            if renamed.name != name {
                renamed.add_class(&name);
            }
            Node::Element(renamed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(input: &str) -> String {
        let mut nodes = parse_fragment(input, Whitespace::Preserve);
        merge_quote_authors(&mut nodes);
        to_html(&nodes)
    }

    fn all_elements<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
        for node in nodes {
            if let Node::Element(el) = node {
                out.push(el);
                all_elements(&el.children, out);
            }
        }
    }

    #[test]
    fn first_dash_run_and_apostrophe_only() {
        let out = postprocess_entry("  a -- b --- c 'x' 'y'  ");
        assert_eq!(out, "a — b --- c ’x' 'y'");
    }

    #[test]
    fn merges_quote_author_into_quote() {
        let out = merged("<blockquote><q>To be.</q> <au><qau>Shak.</qau></au></blockquote>");
        assert_eq!(out, "<blockquote><q>To be.<qau>Shak.</qau></q> </blockquote>");
    }

    #[test]
    fn merge_is_idempotent() {
        let once = merged("<q>To be.</q> <au><qau>Shak.</qau></au> <def>x</def>");
        let twice = merged(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn leaves_quotes_without_author_alone() {
        let input = "<q>Alone.</q> <def><it>plain</it></def>";
        assert_eq!(merged(input), input);
    }

    #[test]
    fn renames_tags_and_keeps_source_name_as_class() {
        let out = postprocess_entry(
            "<hw>Cat</hw> <plain>x</plain><it>y</it><xex>z</xex><b>w</b><br/><def class=\"d\">d</def>",
        );
        assert_eq!(
            out,
            concat!(
                "<h2 class=\"hw\">Cat</h2> <span class=\"plain\">x</span>",
                "<i class=\"it\">y</i><i class=\"xex\">z</i><b>w</b><br/>",
                "<div class=\"d def\">d</div>"
            )
        );
    }

    #[test]
    fn output_uses_a_closed_vocabulary() {
        let out = postprocess_entry(concat!(
            "<hw>A</hw><pr>(a)</pr><def>x<sup>1</sup>\u{2044}<sub>2</sub>",
            "<a href=\"#\">l</a><p>q</p><q>x</q><au><qau>Y</qau></au>",
            "<ety>[<grk>x</grk>]</ety><col><b>c</b></col></def>"
        ));
        let nodes = parse_fragment(&out, Whitespace::Preserve);
        let mut elements = Vec::new();
        all_elements(&nodes, &mut elements);
        assert!(!elements.is_empty());
        for el in elements {
            assert!(
                OutputTag::ALL.iter().any(|tag| tag.as_str() == el.name),
                "{} outside vocabulary",
                el.name
            );
        }
    }

    #[test]
    fn postprocess_rewrites_every_entry() {
        let mut dict = Dictionary::new();
        dict.append("Cat", " <hw>Cat</hw> ");
        dict.append("Dog", "<def>Bark</def>");
        postprocess(&mut dict);
        assert_eq!(dict.get("Cat"), Some("<h2 class=\"hw\">Cat</h2>"));
        assert_eq!(dict.get("Dog"), Some("<div class=\"def\">Bark</div>"));
    }

    #[test]
    fn classify_covers_passthrough_tags() {
        for name in ["br", "i", "b", "p", "sup", "sub", "a"] {
            assert_eq!(OutputTag::classify(name).as_str(), name);
        }
        assert_eq!(OutputTag::classify("sn"), OutputTag::Block);
    }
}
