//! Page text assembly.
//!
//! Walks a page layout that is already in reading order and produces its
//! plain-text rendering: spans joined per [`JoinPolicy`], one `\n` per line,
//! no extra separator between blocks.

use std::borrow::Cow;

use crate::layout::{Block, PageLayout};
use crate::order::sort_page;
use crate::unicode_norm::UnicodeNorm;

/// How adjacent spans of a page are glued together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinPolicy {
    /// Guarantee exactly one separating space between spans, unless the
    /// buffer already ends with whitespace or the span starts with it.
    #[default]
    EnsureSpace,
    /// Append span text as-is with no separator.
    Concatenate,
}

/// Options for page text assembly.
#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    /// Span joining policy. Default: [`JoinPolicy::EnsureSpace`].
    pub join: JoinPolicy,
    /// Unicode normalization applied to each span before joining.
    pub unicode_norm: UnicodeNorm,
    /// If true, expand common Latin ligatures (U+FB00–U+FB06) to their
    /// multi-character equivalents. Default: false.
    pub expand_ligatures: bool,
}

/// Running text buffer for one page.
///
/// Feed spans with [`push_span`](Self::push_span), terminate each line with
/// [`end_line`](Self::end_line), then take the text with
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct PageTextBuilder<'o> {
    buf: String,
    options: &'o TextOptions,
}

impl<'o> PageTextBuilder<'o> {
    pub fn new(options: &'o TextOptions) -> Self {
        Self {
            buf: String::new(),
            options,
        }
    }

    /// Append one span's text, applying the join policy.
    pub fn push_span(&mut self, text: &str) {
        let text = self.prepare(text);
        if text.is_empty() {
            return;
        }
        if self.needs_separator(&text) {
            self.buf.push(' ');
        }
        self.buf.push_str(&text);
    }

    /// Terminate the current line. Emitted even for lines with no text.
    pub fn end_line(&mut self) {
        self.buf.push('\n');
    }

    /// Text accumulated so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn finish(self) -> String {
        self.buf
    }

    fn needs_separator(&self, next: &str) -> bool {
        match self.options.join {
            JoinPolicy::Concatenate => false,
            JoinPolicy::EnsureSpace => {
                let buf_open = self
                    .buf
                    .chars()
                    .next_back()
                    .is_some_and(|c| !c.is_whitespace());
                let next_open = next.chars().next().is_some_and(|c| !c.is_whitespace());
                buf_open && next_open
            }
        }
    }

    fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut text = Cow::Borrowed(text);
        if self.options.unicode_norm != UnicodeNorm::None {
            text = Cow::Owned(self.options.unicode_norm.normalize(&text));
        }
        if self.options.expand_ligatures && text.chars().any(is_ligature) {
            text = Cow::Owned(expand_ligatures(&text));
        }
        text
    }
}

/// Assemble the text of blocks that are already in reading order, using
/// default options.
pub fn assemble_page_text(blocks: &[Block]) -> String {
    assemble_page_text_with(blocks, &TextOptions::default())
}

/// Assemble the text of blocks that are already in reading order.
///
/// Output ends with a newline after the last line; a page with no lines
/// yields the empty string.
pub fn assemble_page_text_with(blocks: &[Block], options: &TextOptions) -> String {
    let mut builder = PageTextBuilder::new(options);
    for block in blocks {
        for line in &block.lines {
            for span in &line.spans {
                builder.push_span(&span.text);
            }
            builder.end_line();
        }
    }
    builder.finish()
}

/// Put a page into reading order and assemble its text.
pub fn layout_to_text(layout: PageLayout, options: &TextOptions) -> String {
    let sorted = sort_page(layout);
    assemble_page_text_with(&sorted.blocks, options)
}

fn is_ligature(c: char) -> bool {
    ('\u{FB00}'..='\u{FB06}').contains(&c)
}

/// Expand common Latin ligatures (U+FB00–U+FB06) to their multi-character equivalents.
pub fn expand_ligatures(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{FB00}' => result.push_str("ff"),
            '\u{FB01}' => result.push_str("fi"),
            '\u{FB02}' => result.push_str("fl"),
            '\u{FB03}' => result.push_str("ffi"),
            '\u{FB04}' => result.push_str("ffl"),
            '\u{FB05}' => result.push_str("\u{017F}t"), // long s + t
            '\u{FB06}' => result.push_str("st"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;
    use crate::layout::{Line, Span};

    fn span(text: &str, x0: f64, top: f64) -> Span {
        Span::new(text, BBox::new(x0, top, x0 + 10.0, top + 12.0))
    }

    fn line(spans: Vec<Span>) -> Line {
        Line::from_spans(spans)
    }

    fn one_line(texts: &[&str]) -> Vec<Block> {
        let spans = texts
            .iter()
            .enumerate()
            .map(|(i, t)| span(t, i as f64 * 20.0, 0.0))
            .collect();
        vec![Block::from_lines(vec![line(spans)])]
    }

    #[test]
    fn inserts_space_between_bare_spans() {
        assert_eq!(assemble_page_text(&one_line(&["Hello", "world"])), "Hello world\n");
    }

    #[test]
    fn leading_space_is_not_doubled() {
        assert_eq!(assemble_page_text(&one_line(&["Hello", " world"])), "Hello world\n");
    }

    #[test]
    fn trailing_space_is_not_doubled() {
        assert_eq!(assemble_page_text(&one_line(&["Hello ", "world"])), "Hello world\n");
    }

    #[test]
    fn existing_double_space_is_preserved() {
        // The policy never adds a second space, but does not strip input.
        assert_eq!(assemble_page_text(&one_line(&["Hello ", " world"])), "Hello  world\n");
    }

    #[test]
    fn first_span_gets_no_separator() {
        assert_eq!(assemble_page_text(&one_line(&["foo"])), "foo\n");
    }

    #[test]
    fn first_span_after_newline_gets_no_separator() {
        let blocks = vec![Block::from_lines(vec![
            line(vec![span("A", 0.0, 0.0)]),
            line(vec![span("B", 0.0, 20.0)]),
        ])];
        assert_eq!(assemble_page_text(&blocks), "A\nB\n");
    }

    #[test]
    fn empty_span_contributes_nothing() {
        assert_eq!(assemble_page_text(&one_line(&["Hello", "", "world"])), "Hello world\n");
    }

    #[test]
    fn empty_line_still_terminates() {
        let blocks = vec![Block::from_lines(vec![
            line(vec![span("A", 0.0, 0.0)]),
            line(Vec::new()),
            line(vec![span("B", 0.0, 40.0)]),
        ])];
        assert_eq!(assemble_page_text(&blocks), "A\n\nB\n");
    }

    #[test]
    fn blocks_add_no_separator() {
        let blocks = vec![
            Block::from_lines(vec![line(vec![span("one", 0.0, 0.0)])]),
            Block::from_lines(vec![line(vec![span("two", 0.0, 40.0)])]),
        ];
        assert_eq!(assemble_page_text(&blocks), "one\ntwo\n");
    }

    #[test]
    fn page_without_lines_is_empty() {
        assert_eq!(assemble_page_text(&[]), "");
        assert_eq!(assemble_page_text(&[Block::from_lines(Vec::new())]), "");
    }

    #[test]
    fn non_space_whitespace_counts_as_boundary() {
        assert_eq!(assemble_page_text(&one_line(&["tab\t", "x"])), "tab\tx\n");
    }

    #[test]
    fn concatenate_policy_adds_nothing() {
        let options = TextOptions {
            join: JoinPolicy::Concatenate,
            ..TextOptions::default()
        };
        let text = assemble_page_text_with(&one_line(&["ab", "cd"]), &options);
        assert_eq!(text, "abcd\n");
    }

    #[test]
    fn normalization_applies_to_each_span() {
        let options = TextOptions {
            unicode_norm: UnicodeNorm::Nfkc,
            ..TextOptions::default()
        };
        let text = assemble_page_text_with(&one_line(&["\u{FF21}", "\u{FF22}"]), &options);
        assert_eq!(text, "A B\n");
    }

    #[test]
    fn ligatures_expand_when_enabled() {
        let blocks = one_line(&["\u{FB01}nd", "\u{FB02}ow"]);
        assert_eq!(assemble_page_text(&blocks), "\u{FB01}nd \u{FB02}ow\n");

        let options = TextOptions {
            expand_ligatures: true,
            ..TextOptions::default()
        };
        assert_eq!(assemble_page_text_with(&blocks, &options), "find flow\n");
    }

    #[test]
    fn expand_ligatures_covers_range() {
        assert_eq!(
            expand_ligatures("\u{FB00}\u{FB03}\u{FB04}\u{FB05}\u{FB06}"),
            "ffffiffl\u{017F}tst"
        );
        assert_eq!(expand_ligatures("plain"), "plain");
    }

    #[test]
    fn builder_exposes_partial_text() {
        let options = TextOptions::default();
        let mut builder = PageTextBuilder::new(&options);
        builder.push_span("x");
        builder.push_span("y");
        assert_eq!(builder.as_str(), "x y");
        builder.end_line();
        assert_eq!(builder.finish(), "x y\n");
    }

    #[test]
    fn layout_to_text_sorts_before_assembling() {
        let page = PageLayout::new(vec![Block::new(
            vec![
                Line::new(vec![span("bar", 2.0, 30.0)], BBox::new(2.0, 30.0, 12.0, 42.0)),
                Line::new(vec![span("foo", 5.0, 10.0)], BBox::new(5.0, 10.0, 15.0, 22.0)),
            ],
            BBox::new(2.0, 10.0, 15.0, 42.0),
        )]);
        assert_eq!(layout_to_text(page, &TextOptions::default()), "foo\nbar\n");
    }
}
