use crate::geometry::BBox;

/// A positioned text fragment: the leaf of a page layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Text of the fragment, possibly with embedded or boundary whitespace.
    pub text: String,
    /// Bounding box in top-left origin page coordinates.
    pub bbox: BBox,
}

impl Span {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// A text line: spans sharing a baseline, in provider order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Spans in this line. Order is not significant until sorted.
    pub spans: Vec<Span>,
    /// Bounding box of this line.
    pub bbox: BBox,
}

impl Line {
    pub fn new(spans: Vec<Span>, bbox: BBox) -> Self {
        Self { spans, bbox }
    }

    /// Build a line whose bbox is the union of its spans' boxes.
    ///
    /// An empty line gets [`BBox::unknown`].
    pub fn from_spans(spans: Vec<Span>) -> Self {
        let bbox = union_all(spans.iter().map(|s| s.bbox));
        Self { spans, bbox }
    }
}

/// A text block: a group of lines forming a paragraph or region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Lines in this block. Order is not significant until sorted.
    pub lines: Vec<Line>,
    /// Bounding box of this block.
    pub bbox: BBox,
}

impl Block {
    pub fn new(lines: Vec<Line>, bbox: BBox) -> Self {
        Self { lines, bbox }
    }

    /// Build a block whose bbox is the union of its lines' boxes.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        let bbox = union_all(lines.iter().map(|l| l.bbox));
        Self { lines, bbox }
    }

    /// Number of spans across all lines of this block.
    pub fn span_count(&self) -> usize {
        self.lines.iter().map(|l| l.spans.len()).sum()
    }
}

/// The text layout of a single page, as reported by a layout provider.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageLayout {
    /// Blocks on this page. Order is not significant until sorted.
    pub blocks: Vec<Block>,
    /// Page width in page units, when the provider reports it.
    pub width: Option<f64>,
    /// Page height in page units, when the provider reports it.
    pub height: Option<f64>,
}

impl PageLayout {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            width: None,
            height: None,
        }
    }

    /// Attach page dimensions (builder style).
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Number of lines across all blocks.
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }

    /// Number of spans across all blocks.
    pub fn span_count(&self) -> usize {
        self.blocks.iter().map(Block::span_count).sum()
    }

    /// Returns `true` if the page has no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

fn union_all(boxes: impl Iterator<Item = BBox>) -> BBox {
    boxes
        .reduce(|acc, b| acc.union(&b))
        .unwrap_or_else(BBox::unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x0: f64, top: f64) -> Span {
        Span::new(text, BBox::new(x0, top, x0 + 10.0, top + 12.0))
    }

    #[test]
    fn line_from_spans_unions_boxes() {
        let line = Line::from_spans(vec![span("a", 50.0, 10.0), span("b", 5.0, 11.0)]);
        assert_eq!(line.bbox, BBox::new(5.0, 10.0, 60.0, 23.0));
        assert_eq!(line.spans.len(), 2);
    }

    #[test]
    fn empty_line_has_unknown_bbox() {
        let line = Line::from_spans(Vec::new());
        assert!(!line.bbox.is_known());
    }

    #[test]
    fn block_from_lines_unions_boxes() {
        let block = Block::from_lines(vec![
            Line::from_spans(vec![span("a", 5.0, 10.0)]),
            Line::from_spans(vec![span("b", 7.0, 30.0)]),
        ]);
        assert_eq!(block.bbox, BBox::new(5.0, 10.0, 17.0, 42.0));
        assert_eq!(block.span_count(), 2);
    }

    #[test]
    fn page_counts() {
        let page = PageLayout::new(vec![
            Block::from_lines(vec![
                Line::from_spans(vec![span("a", 0.0, 0.0), span("b", 20.0, 0.0)]),
                Line::from_spans(vec![]),
            ]),
            Block::from_lines(vec![]),
        ]);
        assert_eq!(page.line_count(), 2);
        assert_eq!(page.span_count(), 2);
        assert!(!page.is_empty());
        assert!(PageLayout::default().is_empty());
    }

    #[test]
    fn page_with_size() {
        let page = PageLayout::new(Vec::new()).with_size(612.0, 792.0);
        assert_eq!(page.width, Some(612.0));
        assert_eq!(page.height, Some(792.0));
    }
}
