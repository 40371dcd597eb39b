//! Page markup handling: splitting content into top-level blocks, extracting
//! visible text, and converting pasted plain text.
//!
//! Content is parsed with `kuchiki` the way a browser would parse the page
//! element's `innerHTML`, and every block is serialized back from the parsed
//! tree. Markup that is already in serialized form therefore round-trips
//! unchanged through `split_blocks` and `Page::content`.

use kuchiki::iter::NodeEdge;
use kuchiki::traits::TendrilSink;
use kuchiki::{NodeData, NodeRef};

use crate::document::block::{Block, BlockKind};

/// Phrasing elements that flow together with neighbouring text
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "dfn", "em", "font", "i", "img",
    "kbd", "mark", "q", "s", "samp", "small", "span", "strike", "strong", "sub", "sup", "time", "u",
    "var", "wbr",
];

/// Closing tags that end a visual line
const LINE_ENDING_TAGS: &[&str] = &[
    "p", "li", "tr", "div", "blockquote", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Parse markup as page content and return the node holding it
fn parse_body(markup: &str) -> NodeRef {
    let document = kuchiki::parse_html().one(markup);
    match document.select_first("body") {
        Ok(body) => body.as_node().clone(),
        Err(()) => document,
    }
}

fn element_name(node: &NodeRef) -> Option<String> {
    node.as_element().map(|el| el.name.local.as_ref().to_string())
}

fn is_inline(tag: &str) -> bool {
    INLINE_ELEMENTS.contains(&tag)
}

/// Nodes that render nothing: comments and whitespace-only text
fn is_invisible(node: &NodeRef) -> bool {
    match node.data() {
        NodeData::Comment(_) => true,
        NodeData::Text(text) => text.borrow().trim().is_empty(),
        _ => false,
    }
}

/// Kind of block a top-level node starts
fn node_kind(node: &NodeRef) -> Option<BlockKind> {
    match element_name(node) {
        Some(tag) if !is_inline(&tag) => Some(BlockKind::from_tag(&tag)),
        _ => None,
    }
}

fn flush_run(blocks: &mut Vec<Block>, run: &mut String) {
    if run.is_empty() {
        return;
    }
    let markup = std::mem::take(run);
    if markup.trim().is_empty() {
        if let Some(last) = blocks.last_mut() {
            last.push_markup(&markup);
            return;
        }
    }
    blocks.push(Block::with_kind(BlockKind::Text, markup));
}

/// Split page content into its top-level blocks.
///
/// Every block-level element is one block. A run of consecutive text and
/// inline elements forms one `BlockKind::Text` block, kept exactly as
/// serialized. Whitespace and comments between two blocks stay attached to
/// the block before it, so concatenating the blocks gives back the content.
pub fn split_blocks(markup: &str) -> Vec<Block> {
    let body = parse_body(markup);
    let mut blocks: Vec<Block> = Vec::new();
    let mut run = String::new();

    for child in body.children() {
        if let Some(kind) = node_kind(&child) {
            flush_run(&mut blocks, &mut run);
            blocks.push(Block::with_kind(kind, child.to_string()));
            continue;
        }
        let serialized = child.to_string();
        match blocks.last_mut() {
            Some(last) if run.is_empty() && is_invisible(&child) => last.push_markup(&serialized),
            _ => run.push_str(&serialized),
        }
    }
    flush_run(&mut blocks, &mut run);
    blocks
}

/// Classify a markup fragment by its first top-level node
pub fn classify(markup: &str) -> BlockKind {
    let body = parse_body(markup);
    body.children()
        .find(|child| !is_invisible(child))
        .and_then(|child| node_kind(&child))
        .unwrap_or(BlockKind::Text)
}

fn ends_line(out: &str) -> bool {
    out.is_empty() || out.ends_with('\n')
}

fn push_break(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

/// Append text with whitespace collapsed as a browser renders it
fn push_collapsed(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_whitespace() && c != '\u{a0}' {
            if !ends_line(out) && !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
}

/// Visible text of a markup fragment, with entities decoded and a newline
/// wherever the markup ends a line
pub fn visible_text(markup: &str) -> String {
    let body = parse_body(markup);
    let mut out = String::new();
    for edge in body.traverse() {
        match edge {
            NodeEdge::Start(node) => match node.data() {
                NodeData::Text(text) => push_collapsed(&mut out, &text.borrow()),
                NodeData::Element(el) if el.name.local.as_ref() == "br" => push_break(&mut out),
                _ => {}
            },
            NodeEdge::End(node) => {
                let ends = element_name(&node).is_some_and(|tag| LINE_ENDING_TAGS.contains(&tag.as_str()));
                if ends && !ends_line(&out) {
                    push_break(&mut out);
                }
            }
        }
    }
    out.trim_end().to_string()
}

/// Escape plain text for use as element content
pub fn escape_text(text: &str) -> String {
    NodeRef::new_text(text).to_string()
}

/// Convert pasted plain text into paragraph markup: one `<p>` per non-blank
/// line, with the text escaped
pub fn paste_to_markup(text: &str) -> String {
    paste_blocks(text).iter().map(Block::markup).collect()
}

pub fn paste_blocks(text: &str) -> Vec<Block> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(Block::paragraph)
        .collect()
}
