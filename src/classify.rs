//! Node classification against a set of breakpoint widths.
//!
//! Matching is literal: a node matches when its media-query condition
//! contains the substring `"{width}px"` for any configured width. There is
//! no numeric comparison and no query parsing, so `min-width`, `max-width`
//! and plain `width` conditions are all in scope, and behavior follows from
//! the raw condition text alone. The flip side is that a width of `200`
//! also matches `(min-width: 1200px)`; callers pick widths that do not
//! collide.

use std::fmt;

use crate::css::Node;

/// A normalized set of breakpoint widths with their precomputed `px` needles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidthSet {
    tokens: Vec<String>,
    needles: Vec<String>,
}

impl WidthSet {
    /// Build a set from raw width tokens. Tokens are trimmed, empties are
    /// dropped, and duplicates collapse; the rest are kept verbatim.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = WidthSet::default();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() || set.tokens.iter().any(|t| t == token) {
                continue;
            }
            set.needles.push(format!("{token}px"));
            set.tokens.push(token.to_string());
        }
        set
    }

    /// Build a set from a comma-separated string, e.g. `"400,1200"`.
    pub fn from_csv(csv: &str) -> Self {
        Self::new(csv.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// True when the condition text contains `"{width}px"` for any width in
    /// the set. Always false for an empty set.
    pub fn matches_condition(&self, condition: &str) -> bool {
        self.needles.iter().any(|needle| condition.contains(needle))
    }
}

impl fmt::Display for WidthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(", "))
    }
}

/// True when the node is an `@media` block whose condition matches `widths`.
pub fn is_matching_media(widths: &WidthSet, node: &Node) -> bool {
    match node {
        Node::Media(media) => widths.matches_condition(&media.condition),
        Node::Rule(_) => false,
    }
}

/// Complement of [`is_matching_media`]: plain rules, other at-rules, and
/// media blocks for conditions outside the set.
pub fn is_plain_or_non_matching_media(widths: &WidthSet, node: &Node) -> bool {
    !is_matching_media(widths, node)
}

/// True when a node that survived stripping should additionally have its
/// media wrapper removed, keeping only the children.
pub fn is_extract_candidate(extract: &WidthSet, node: &Node) -> bool {
    is_matching_media(extract, node)
}

pub fn is_not_extract_candidate(extract: &WidthSet, node: &Node) -> bool {
    !is_extract_candidate(extract, node)
}

/// The media blocks that belong in the combined output, in source order.
pub fn matching_media<'a>(widths: &WidthSet, nodes: &'a [Node]) -> Vec<&'a Node> {
    nodes
        .iter()
        .filter(|node| is_matching_media(widths, node))
        .collect()
}

/// Split nodes into the two halves of the strip transform: everything that
/// stays in the source file, and the media blocks headed for the combined
/// file. Both halves preserve source order; together they cover every node
/// exactly once.
pub fn partition<'a>(widths: &WidthSet, nodes: &'a [Node]) -> (Vec<&'a Node>, Vec<&'a Node>) {
    let mut kept = Vec::new();
    let mut matching = Vec::new();
    for node in nodes {
        if is_matching_media(widths, node) {
            matching.push(node);
        } else {
            kept.push(node);
        }
    }
    (kept, matching)
}

/// Compute the node sequence for a stripped output file.
///
/// First the strip widths remove their matching media blocks. Then, if any
/// extract widths are configured, surviving media blocks that match them are
/// replaced by their children, appended after the untouched survivors. With
/// no extract widths the survivors pass through unchanged, in source order.
pub fn strip_nodes<'a>(
    strip: &WidthSet,
    extract: &WidthSet,
    nodes: &'a [Node],
) -> Vec<&'a Node> {
    let survivors: Vec<&Node> = nodes
        .iter()
        .filter(|node| is_plain_or_non_matching_media(strip, node))
        .collect();

    if extract.is_empty() {
        return survivors;
    }

    let unwrapped: Vec<&Node> = survivors
        .iter()
        .filter(|node| is_extract_candidate(extract, node))
        .flat_map(|node| {
            node.as_media()
                .map(|media| media.children.iter())
                .into_iter()
                .flatten()
        })
        .collect();

    let mut kept: Vec<&Node> = survivors
        .into_iter()
        .filter(|node| is_not_extract_candidate(extract, node))
        .collect();
    kept.extend(unwrapped);
    kept
}
