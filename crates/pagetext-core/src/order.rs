//! Reading-order sorting of page layout items.
//!
//! Items are ordered by integer pixel positions derived from their bounding
//! boxes (see [`to_pixel`]), never by raw floats, so sub-pixel jitter from the
//! layout engine does not reorder items that are visually aligned. All sorts
//! are stable: items with equal keys keep their input order.

use std::cmp::Ordering;

use crate::geometry::{BBox, to_pixel};
use crate::layout::{Block, Line, PageLayout, Span};

/// Anything that occupies a rectangle on the page.
pub trait Positioned {
    fn bbox(&self) -> &BBox;
}

impl Positioned for BBox {
    fn bbox(&self) -> &BBox {
        self
    }
}

impl Positioned for Span {
    fn bbox(&self) -> &BBox {
        &self.bbox
    }
}

impl Positioned for Line {
    fn bbox(&self) -> &BBox {
        &self.bbox
    }
}

impl Positioned for Block {
    fn bbox(&self) -> &BBox {
        &self.bbox
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn bbox(&self) -> &BBox {
        (**self).bbox()
    }
}

/// Which coordinates drive the order at a given hierarchy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortAxis {
    /// Blocks: top edge, then left edge for blocks in the same band.
    Block,
    /// Lines within a block: top edge only.
    Line,
    /// Spans within a line: left edge only.
    Span,
}

/// Composite integer key: compared by `primary`, then `secondary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub primary: i64,
    pub secondary: i64,
}

impl SortAxis {
    /// Compute the sort key of a bounding box for this axis.
    pub fn key(self, bbox: &BBox) -> SortKey {
        match self {
            SortAxis::Block => SortKey {
                primary: to_pixel(bbox.top),
                secondary: to_pixel(bbox.x0),
            },
            SortAxis::Line => SortKey {
                primary: to_pixel(bbox.top),
                secondary: 0,
            },
            SortAxis::Span => SortKey {
                primary: to_pixel(bbox.x0),
                secondary: 0,
            },
        }
    }

    /// Compare two items in reading order along this axis.
    pub fn compare<T: Positioned>(self, a: &T, b: &T) -> Ordering {
        self.key(a.bbox()).cmp(&self.key(b.bbox()))
    }
}

/// Reorder `items` into reading order along `axis`.
///
/// The result is a permutation of the input; an empty input yields an empty
/// output.
pub fn sort_by_position<T: Positioned>(mut items: Vec<T>, axis: SortAxis) -> Vec<T> {
    sort_in_place(&mut items, axis);
    items
}

/// In-place variant of [`sort_by_position`].
pub fn sort_in_place<T: Positioned>(items: &mut [T], axis: SortAxis) {
    items.sort_by_key(|item| axis.key(item.bbox()));
}

/// Put a whole page into reading order: blocks, the lines of every block,
/// and the spans of every line.
pub fn sort_page(mut layout: PageLayout) -> PageLayout {
    sort_page_in_place(&mut layout);
    layout
}

/// In-place variant of [`sort_page`].
pub fn sort_page_in_place(layout: &mut PageLayout) {
    sort_in_place(&mut layout.blocks, SortAxis::Block);
    for block in &mut layout.blocks {
        sort_in_place(&mut block.lines, SortAxis::Line);
        for line in &mut block.lines {
            sort_in_place(&mut line.spans, SortAxis::Span);
        }
    }
}
