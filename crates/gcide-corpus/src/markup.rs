//! Lenient markup reader producing [`gcide_types::Node`] trees.
//!
//! The source files are SGML-ish rather than XML: end tags can be missing or
//! stray, and text carries raw entity references. Tokens come from
//! `quick-xml` with end-name checks disabled; nesting is repaired here:
//!
//! - an end tag closes the nearest open element of that name, implicitly
//!   closing everything opened after it;
//! - an end tag with no matching open element is ignored;
//! - elements still open at the end of input are closed.
//!
//! A `<` that does not open usable markup (a bare `a < b`, an unclosed
//! `<![CDATA[`, a stray `<!` or `<?`) is kept as escaped text and reading
//! resumes right after it, so nothing that follows is lost.

use gcide_types::{Element, Node};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::{debug, warn};

/// How text nodes treat whitespace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Whitespace {
    /// Keep text byte-for-byte.
    Preserve,
    /// Replace every whitespace run with a single space.
    Collapse,
}

/// Parse a document or fragment into its top-level nodes.
pub fn parse_fragment(input: &str, whitespace: Whitespace) -> Vec<Node> {
    let mut tree = TreeBuilder::new(whitespace);
    let mut offset = 0;
    while let Some(stray) = tokenize(input, offset, &mut tree) {
        tree.text("&lt;");
        offset = stray + 1;
    }
    tree.finish()
}

/// Feed the tokens of `input[offset..]` into `tree`.
///
/// Stops at the first `<` that does not open usable markup and returns its
/// offset in `input`; returns `None` once the input is exhausted.
fn tokenize(input: &str, offset: usize, tree: &mut TreeBuilder) -> Option<usize> {
    let rest = &input[offset..];
    let mut reader = Reader::from_str(rest);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    loop {
        let from = position(reader.buffer_position(), rest.len());
        let stray = match reader.read_event() {
            Ok(Event::Start(start)) if is_tag_name(start.name().as_ref()) => {
                tree.open(element_from(&start));
                continue;
            }
            Ok(Event::Empty(start)) if is_tag_name(start.name().as_ref()) => {
                tree.push(Node::Element(element_from(&start)));
                continue;
            }
            Ok(Event::End(end)) => {
                tree.close(&String::from_utf8_lossy(end.name().as_ref()));
                continue;
            }
            Ok(Event::Text(text)) => {
                tree.text(&String::from_utf8_lossy(&text));
                continue;
            }
            Ok(Event::CData(data)) => {
                tree.text(&String::from_utf8_lossy(&data));
                continue;
            }
            Ok(Event::Comment(_)) => continue,
            Ok(Event::Eof) => return None,
            Ok(event) => {
                let at = markup_start(rest.as_bytes(), from);
                let byte = offset + at.unwrap_or(from);
                debug!("unexpected {event:?} at byte {byte}, keeping it as text");
                at
            }
            Err(err) => {
                let at = markup_start(rest.as_bytes(), from);
                let byte = offset + at.unwrap_or(from);
                warn!("markup error at byte {byte}, keeping it as text: {err}");
                at
            }
        };
        return stray.map(|at| offset + at);
    }
}

/// Element names start with a letter; anything else after `<` is text.
fn is_tag_name(name: &[u8]) -> bool {
    name.first().is_some_and(u8::is_ascii_alphabetic)
}

fn position(pos: u64, len: usize) -> usize {
    usize::try_from(pos).map_or(len, |pos| pos.min(len))
}

/// Offset of the `<` opening the markup token read from `from`.
///
/// The reader may already have consumed that `<` when it reports `from`.
fn markup_start(bytes: &[u8], from: usize) -> Option<usize> {
    let from = from.saturating_sub(1);
    bytes[from..]
        .iter()
        .position(|b| *b == b'<')
        .map(|i| from + i)
}

fn element_from(start: &BytesStart<'_>) -> Element {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    let mut attributes = start.attributes();
    attributes.with_checks(false);
    for attr in attributes.flatten() {
        element.attrs.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            String::from_utf8_lossy(&attr.value).into_owned(),
        ));
    }
    element
}

struct TreeBuilder {
    whitespace: Whitespace,
    roots: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn new(whitespace: Whitespace) -> Self {
        Self {
            whitespace,
            roots: Vec::new(),
            open: Vec::new(),
        }
    }

    fn children(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        }
    }

    fn open(&mut self, element: Element) {
        self.open.push(element);
    }

    fn push(&mut self, node: Node) {
        self.children().push(node);
    }

    fn text(&mut self, raw: &str) {
        let text = match self.whitespace {
            Whitespace::Preserve => raw.to_string(),
            Whitespace::Collapse => collapse_whitespace(raw),
        };
        if text.is_empty() {
            return;
        }
        match self.children().last_mut() {
            Some(Node::Text(prev)) => prev.push_str(&text),
            _ => self.push(Node::Text(text)),
        }
    }

    fn close(&mut self, name: &str) {
        let Some(depth) = self.open.iter().rposition(|el| el.name == name) else {
            return;
        };
        while self.open.len() > depth {
            self.close_innermost();
        }
    }

    fn close_innermost(&mut self) {
        if let Some(element) = self.open.pop() {
            self.push(Node::Element(element));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while !self.open.is_empty() {
            self.close_innermost();
        }
        self.roots
    }
}

fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcide_types::markup::to_html;

    fn round_trip(input: &str) -> String {
        to_html(&parse_fragment(input, Whitespace::Preserve))
    }

    #[test]
    fn keeps_raw_text_and_attributes() {
        assert_eq!(
            round_trip(r#"<p>a &amp; b <a href="x.html">x</a></p>"#),
            r#"<p>a &amp; b <a href="x.html">x</a></p>"#
        );
    }

    #[test]
    fn writes_empty_elements_self_closed() {
        assert_eq!(round_trip("<p>a<br/>b<i></i></p>"), "<p>a<br/>b<i/></p>");
    }

    #[test]
    fn repairs_unbalanced_tags() {
        assert_eq!(round_trip("<p><b>bold</p>"), "<p><b>bold</b></p>");
        assert_eq!(round_trip("<p>x</q>y</p>"), "<p>xy</p>");
        assert_eq!(round_trip("<p><i>open"), "<p><i>open</i></p>");
    }

    #[test]
    fn collapses_whitespace_on_request() {
        let nodes = parse_fragment("<p>a \n\t b</p>\n\n<p>c</p>", Whitespace::Collapse);
        assert_eq!(to_html(&nodes), "<p>a b</p> <p>c</p>");
    }

    #[test]
    fn bare_less_than_is_kept_as_text() {
        assert_eq!(round_trip("<p><def>a < b</def></p>"), "<p><def>a &lt; b</def></p>");
        assert_eq!(round_trip("<p>1 <3 and 2 <= 4</p>"), "<p>1 &lt;3 and 2 &lt;= 4</p>");
    }

    #[test]
    fn malformed_markup_does_not_end_the_read() {
        for bad in ["<!", "<![CDATA[", "<?pi", "<!DOCTYPE"] {
            let out = round_trip(&format!("<p>one</p><p><def>x {bad} y</def></p><p>two</p>"));
            assert!(out.starts_with("<p>one</p><p><def>x &lt;"), "{bad}: {out}");
            assert!(out.ends_with("<p>two</p>"), "{bad}: {out}");
        }
    }

    #[test]
    fn unclosed_end_tag_at_the_end_is_text() {
        assert_eq!(round_trip("<p>x</p"), "<p>x&lt;/p</p>");
    }
}
