//! Page type holding a sorted layout and the warnings raised while reading it.

use pagetext_core::{ExtractWarning, PageLayout, TextOptions, assemble_page_text_with};

/// A single page of a document, in reading order.
///
/// Constructed by [`Document::page`](crate::Document::page); the layout has
/// already been sorted at block, line and span level.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page index (0-based).
    page_number: usize,
    /// Sorted page layout.
    layout: PageLayout,
    /// Non-fatal repairs made while decoding this page.
    warnings: Vec<ExtractWarning>,
}

impl Page {
    /// Create a page from an already sorted layout.
    pub fn new(page_number: usize, layout: PageLayout, warnings: Vec<ExtractWarning>) -> Self {
        Self {
            page_number,
            layout,
            warnings,
        }
    }

    /// Returns the page index (0-based).
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Returns the page width, when the backend reported one.
    pub fn width(&self) -> Option<f64> {
        self.layout.width
    }

    /// Returns the page height, when the backend reported one.
    pub fn height(&self) -> Option<f64> {
        self.layout.height
    }

    /// Returns the sorted layout.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Returns the warnings collected for this page.
    pub fn warnings(&self) -> &[ExtractWarning] {
        &self.warnings
    }

    /// Assemble the page text: one `\n`-terminated line per layout line.
    pub fn extract_text(&self, options: &TextOptions) -> String {
        assemble_page_text_with(&self.layout.blocks, options)
    }
}
