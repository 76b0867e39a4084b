//! Minimal element tree for GCIDE paragraphs and entry fragments.
//!
//! Text is stored exactly as it appears in the source, entity references
//! included; nothing is decoded or re-escaped on the way through. Output
//! follows XML conventions: an element without children is written as
//! `<name/>`.

/// One node of a fragment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A tagged element with raw attribute values.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// True when this node is an element called `name`.
    pub fn is_element(&self, name: &str) -> bool {
        matches!(self, Node::Element(el) if el.name == name)
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => el.write_html(out),
        }
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children,
        }
    }

    /// Add `class` to the space-separated `class` attribute, once.
    pub fn add_class(&mut self, class: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == "class") {
            Some((_, value)) => {
                if !value.split_ascii_whitespace().any(|c| c == class) {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(class);
                }
            }
            None => self.attrs.push(("class".to_string(), class.to_string())),
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Whether any descendant element is called `name`.
    pub fn has_descendant(&self, name: &str) -> bool {
        self.children.iter().any(|child| match child {
            Node::Element(el) => el.name == name || el.has_descendant(name),
            Node::Text(_) => false,
        })
    }

    /// Serialized children, without this element's own tags.
    pub fn inner_html(&self) -> String {
        to_html(&self.children)
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&value.replace('"', "&quot;"));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// Serialize a node list.
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

/// Index of the next element sibling after `idx`, skipping text nodes.
pub fn next_element_sibling(nodes: &[Node], idx: usize) -> Option<usize> {
    nodes
        .iter()
        .enumerate()
        .skip(idx + 1)
        .find(|(_, node)| matches!(node, Node::Element(_)))
        .map(|(i, _)| i)
}

/// Index of the closest element sibling before `idx`, skipping text nodes.
pub fn prev_element_sibling(nodes: &[Node], idx: usize) -> Option<usize> {
    nodes[..idx.min(nodes.len())]
        .iter()
        .rposition(|node| matches!(node, Node::Element(_)))
}
