//! Top-level stylesheet splitter.
//!
//! Splits CSS source into the node sequence described in the parent module.
//! This is not a full CSS parser: it only has to find top-level construct
//! boundaries, which means tracking comments, string literals and brace depth.
//! Everything between boundaries is carried as raw text.

use super::{MediaBlock, Node, ParseError, Rule};

/// Split `input` into top-level nodes. `first_line` is the 1-based line the
/// input starts on, so errors inside nested blocks report real line numbers.
pub(crate) fn parse_nodes(input: &str, first_line: usize) -> Result<Vec<Node>, ParseError> {
    let mut parser = NodeParser {
        chars: input.chars().collect(),
        pos: 0,
        line: first_line,
    };
    parser.parse()
}

struct NodeParser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl NodeParser {
    fn parse(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            self.skip_whitespace();
            if self.at_end() {
                return Ok(nodes);
            }
            // Stray top-level semicolons are tolerated and dropped.
            if self.peek() == ';' {
                self.advance();
                continue;
            }
            nodes.push(self.parse_node()?);
        }
    }

    fn parse_node(&mut self) -> Result<Node, ParseError> {
        if self.starts_with("/*") {
            return self.parse_comment();
        }
        if self.peek() == '@' {
            return self.parse_at_rule();
        }
        self.parse_qualified_rule()
    }

    /// A standalone top-level comment becomes its own plain node.
    fn parse_comment(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let line = self.line;
        self.consume_comment(line)?;
        Ok(plain(self.text_from(start)))
    }

    /// Any `@`-prefixed construct. `@media` gets the full treatment; every
    /// other at-rule is captured as an opaque plain node, whether it is a
    /// statement (`@import ...;`) or a block (`@keyframes ... { ... }`).
    fn parse_at_rule(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let start_line = self.line;
        self.advance(); // '@'
        let name = self.consume_name();
        if name.eq_ignore_ascii_case("media") {
            return self.parse_media_block(start, start_line);
        }
        loop {
            if self.at_end() {
                return Err(ParseError::MissingBlock { line: start_line });
            }
            match self.peek() {
                ';' => {
                    self.advance();
                    return Ok(plain(self.text_from(start)));
                }
                '{' => {
                    self.consume_block(start_line)?;
                    return Ok(plain(self.text_from(start)));
                }
                '/' if self.starts_with("/*") => {
                    let line = self.line;
                    self.consume_comment(line)?;
                }
                '"' | '\'' => self.consume_string(),
                _ => self.advance(),
            }
        }
    }

    /// `start` points at the `@` of `@media`; the at-keyword has already been
    /// consumed. Captures the condition text, recursively parses the block
    /// body, and keeps the raw text of the whole construct.
    fn parse_media_block(&mut self, start: usize, start_line: usize) -> Result<Node, ParseError> {
        let cond_start = self.pos;
        loop {
            if self.at_end() {
                return Err(ParseError::MissingBlock { line: start_line });
            }
            match self.peek() {
                '{' => break,
                ';' => {
                    // Degenerate `@media ...;` statement: keep it opaque.
                    self.advance();
                    return Ok(plain(self.text_from(start)));
                }
                '/' if self.starts_with("/*") => {
                    let line = self.line;
                    self.consume_comment(line)?;
                }
                '"' | '\'' => self.consume_string(),
                _ => self.advance(),
            }
        }
        let condition = self.slice(cond_start, self.pos).trim().to_string();
        let brace = self.pos;
        self.advance(); // '{'
        let inner_line = self.line;
        let end = self.consume_block_body(start_line)?;
        let inner = self.slice(brace + 1, end - 1);
        let children = parse_nodes(&inner, inner_line)?;
        Ok(Node::Media(MediaBlock {
            condition,
            children,
            text: normalize_indent(&self.slice(start, end)),
        }))
    }

    /// A selector prelude followed by a `{}` block. A prelude that ends at a
    /// `;` instead is kept as an opaque statement node.
    fn parse_qualified_rule(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let start_line = self.line;
        loop {
            if self.at_end() {
                return Err(ParseError::MissingBlock { line: start_line });
            }
            match self.peek() {
                '{' => {
                    self.consume_block(start_line)?;
                    return Ok(plain(self.text_from(start)));
                }
                ';' => {
                    self.advance();
                    return Ok(plain(self.text_from(start)));
                }
                '/' if self.starts_with("/*") => {
                    let line = self.line;
                    self.consume_comment(line)?;
                }
                '"' | '\'' => self.consume_string(),
                _ => self.advance(),
            }
        }
    }

    /// Consume a balanced `{ ... }` block starting at the current `{`.
    fn consume_block(&mut self, start_line: usize) -> Result<(), ParseError> {
        self.advance(); // '{'
        self.consume_block_body(start_line)?;
        Ok(())
    }

    /// Consume until the brace depth opened before this call closes again.
    /// Returns the position just past the closing `}`.
    fn consume_block_body(&mut self, start_line: usize) -> Result<usize, ParseError> {
        let mut depth = 1usize;
        loop {
            if self.at_end() {
                return Err(ParseError::UnclosedBlock { line: start_line });
            }
            match self.peek() {
                '{' => {
                    depth += 1;
                    self.advance();
                }
                '}' => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        return Ok(self.pos);
                    }
                }
                '/' if self.starts_with("/*") => {
                    let line = self.line;
                    self.consume_comment(line)?;
                }
                '"' | '\'' => self.consume_string(),
                _ => self.advance(),
            }
        }
    }

    /// Consume a `/* ... */` comment starting at the current `/`.
    fn consume_comment(&mut self, start_line: usize) -> Result<(), ParseError> {
        self.advance();
        self.advance();
        loop {
            if self.at_end() {
                return Err(ParseError::UnclosedComment { line: start_line });
            }
            if self.starts_with("*/") {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }
    }

    /// Consume a string literal starting at the current quote. CSS strings
    /// cannot span a raw newline, so an unterminated string ends there (the
    /// newline itself is left unconsumed) or at end of input.
    fn consume_string(&mut self) {
        let quote = self.peek();
        self.advance();
        loop {
            if self.at_end() {
                return;
            }
            match self.peek() {
                '\\' => {
                    self.advance();
                    if !self.at_end() {
                        self.advance();
                    }
                }
                '\n' => return,
                ch if ch == quote => {
                    self.advance();
                    return;
                }
                _ => self.advance(),
            }
        }
    }

    fn consume_name(&mut self) -> String {
        let start = self.pos;
        while !self.at_end() {
            let ch = self.peek();
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }
        self.slice(start, self.pos)
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn advance(&mut self) {
        if self.chars[self.pos] == '\n' {
            self.line += 1;
        }
        self.pos += 1;
    }

    fn starts_with(&self, needle: &str) -> bool {
        let mut pos = self.pos;
        for ch in needle.chars() {
            if pos >= self.chars.len() || self.chars[pos] != ch {
                return false;
            }
            pos += 1;
        }
        true
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn text_from(&self, start: usize) -> String {
        normalize_indent(&self.slice(start, self.pos))
    }
}

fn plain(text: String) -> Node {
    Node::Rule(Rule { text })
}

/// Shift a multi-line chunk so its continuation lines lose the indentation
/// they carried in the source. The first line starts at a significant
/// character already; the following lines are dedented by the smallest
/// leading-whitespace run found among them. Line endings are normalized
/// to `\n`.
fn normalize_indent(text: &str) -> String {
    let min_indent = text
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut lines = text.lines();
    let mut out = String::with_capacity(text.len());
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push('\n');
        if line.trim().is_empty() {
            continue;
        }
        out.push_str(&line[min_indent..]);
    }
    out
}
