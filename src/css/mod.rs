//! Block-level CSS stylesheet model.
//!
//! This module provides types and functions for working with CSS files at the
//! granularity the stripper needs: a stylesheet is an ordered sequence of
//! top-level nodes, and every node is either an `@media` block (condition text
//! plus nested children) or an opaque chunk of anything else. Rule bodies,
//! selectors and declarations are never interpreted; each node carries its raw
//! source text and is serialized back verbatim.
//!
//! The serializer is canonical and stable: nodes are normalized to column-0
//! indentation when parsed, so `parse(to_css(x))` re-serializes to the same
//! bytes. That property is what makes the strip transform idempotent.

mod parser;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// A top-level stylesheet node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Anything that is not an `@media` block: a style rule, another at-rule
    /// (`@import`, `@font-face`, `@keyframes`, ...), or a standalone comment.
    Rule(Rule),
    /// An `@media` conditional block.
    Media(MediaBlock),
}

/// An opaque non-media node, kept as raw source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Raw source text of the whole construct, indentation-normalized.
    pub text: String,
}

/// An `@media` block: its condition plus the nodes nested inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlock {
    /// The raw media-query text between `@media` and `{`, trimmed.
    /// E.g. `"(min-width: 400px)"` or `"screen and (max-width: 1200px)"`.
    pub condition: String,
    /// Nodes nested inside the block. Plain rules in practice; nested
    /// `@media` blocks are tolerated and kept intact.
    pub children: Vec<Node>,
    /// Raw source text of the whole block, indentation-normalized.
    pub text: String,
}

impl Node {
    /// The raw source text this node serializes to.
    pub fn text(&self) -> &str {
        match self {
            Node::Rule(rule) => &rule.text,
            Node::Media(media) => &media.text,
        }
    }

    pub fn is_media(&self) -> bool {
        matches!(self, Node::Media(_))
    }

    pub fn as_media(&self) -> Option<&MediaBlock> {
        match self {
            Node::Media(media) => Some(media),
            Node::Rule(_) => None,
        }
    }
}

/// Errors raised while splitting a stylesheet into top-level nodes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unclosed block starting on line {line}")]
    UnclosedBlock { line: usize },

    #[error("unclosed comment starting on line {line}")]
    UnclosedComment { line: usize },

    #[error("expected '{{' for rule starting on line {line}")]
    MissingBlock { line: usize },
}

/// A parsed stylesheet: an ordered sequence of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

impl Stylesheet {
    /// Parse a stylesheet from a string.
    pub fn parse_str(input: &str) -> Result<Self, ParseError> {
        let nodes = parser::parse_nodes(input, 1)?;
        Ok(Stylesheet { nodes })
    }

    /// Read and parse a stylesheet from a file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let sheet = Self::parse_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(sheet)
    }

    /// Serialize the whole stylesheet to CSS text.
    ///
    /// Nodes are separated by a blank line; non-empty output ends with a
    /// newline. An empty stylesheet serializes to an empty string.
    pub fn to_css(&self) -> String {
        let body = serialize_nodes(&self.nodes);
        if body.is_empty() {
            body
        } else {
            body + "\n"
        }
    }

    /// All top-level `@media` blocks, in source order.
    pub fn media_blocks(&self) -> Vec<&MediaBlock> {
        self.nodes.iter().filter_map(Node::as_media).collect()
    }
}

/// Serialize a sequence of nodes, joined by blank lines, without a trailing
/// newline. Used for both whole stylesheets and filtered selections.
pub fn serialize_nodes<'a, I>(nodes: I) -> String
where
    I: IntoIterator<Item = &'a Node>,
{
    nodes
        .into_iter()
        .map(Node::text)
        .collect::<Vec<_>>()
        .join("\n\n")
}
