//! Page layout provider trait.
//!
//! Defines the [`LayoutBackend`] trait that abstracts where page layouts come
//! from. A backend opens some input, exposes its pages, and turns each page
//! into a [`PageLayout`]; the order of blocks, lines and spans it reports is
//! implementation-defined and is never relied upon downstream.

use pagetext_core::{ExtractOptions, ExtractResult, PageLayout, PageTextError};

/// Trait abstracting page layout extraction.
///
/// # Associated Types
///
/// - `Document`: The opened input representation.
/// - `Page`: A reference to a single page within a document.
/// - `Error`: Backend-specific error type, convertible to [`PageTextError`].
///
/// # Usage
///
/// ```ignore
/// let doc = MyBackend::open(bytes)?;
/// let page = MyBackend::get_page(&doc, 0)?;
/// let layout = MyBackend::extract_page_layout(&doc, &page, &options)?;
/// ```
pub trait LayoutBackend {
    /// The opened document type.
    type Document;

    /// A reference to a single page within a document.
    type Page;

    /// Backend-specific error type, convertible to [`PageTextError`].
    type Error: std::error::Error + Into<PageTextError>;

    /// Open a document from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not form a document this backend
    /// understands.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Access a page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// Produce the text layout of a page.
    ///
    /// Non-fatal repairs (missing or malformed coordinates, truncation at
    /// `options.max_spans_per_page`) are reported as warnings on the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be rendered at all. The error
    /// concerns this page only; other pages remain accessible.
    fn extract_page_layout(
        doc: &Self::Document,
        page: &Self::Page,
        options: &ExtractOptions,
    ) -> Result<ExtractResult<PageLayout>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagetext_core::{BBox, Block, ExtractWarning, ExtractWarningCode, Line, Span};

    // --- Mock types ---

    #[derive(Debug)]
    struct MockDocument {
        pages: Vec<Option<Vec<(&'static str, f64, f64)>>>,
    }

    #[derive(Debug)]
    struct MockPage {
        index: usize,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock error: {0}")]
    struct MockError(String);

    impl From<MockError> for PageTextError {
        fn from(err: MockError) -> Self {
            PageTextError::Other(err.0)
        }
    }

    struct MockBackend;

    impl LayoutBackend for MockBackend {
        type Document = MockDocument;
        type Page = MockPage;
        type Error = MockError;

        fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
            if bytes.is_empty() {
                return Err(MockError("empty input".to_string()));
            }
            // One page per byte; a zero byte is a page that fails to render.
            let pages = bytes
                .iter()
                .map(|&b| (b != 0).then(|| vec![("b", 40.0, 0.0), ("a", 0.0, 0.0)]))
                .collect();
            Ok(MockDocument { pages })
        }

        fn page_count(doc: &Self::Document) -> usize {
            doc.pages.len()
        }

        fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error> {
            if index >= doc.pages.len() {
                return Err(MockError(format!("page {index} out of range")));
            }
            Ok(MockPage { index })
        }

        fn extract_page_layout(
            doc: &Self::Document,
            page: &Self::Page,
            _options: &ExtractOptions,
        ) -> Result<ExtractResult<PageLayout>, Self::Error> {
            let spans = doc.pages[page.index]
                .as_ref()
                .ok_or_else(|| MockError(format!("page {} unrenderable", page.index)))?;
            let spans = spans
                .iter()
                .map(|&(t, x0, top)| Span::new(t, BBox::new(x0, top, x0 + 10.0, top + 10.0)))
                .collect();
            let layout = PageLayout::new(vec![Block::from_lines(vec![Line::from_spans(spans)])]);
            let warning = ExtractWarning::with_code(ExtractWarningCode::Other("mock".into()), "ok")
                .on_page(page.index);
            Ok(ExtractResult::with_warnings(layout, vec![warning]))
        }
    }

    #[test]
    fn mock_backend_open_and_count() {
        let doc = MockBackend::open(&[1, 1, 1]).unwrap();
        assert_eq!(MockBackend::page_count(&doc), 3);
    }

    #[test]
    fn mock_backend_open_empty_fails() {
        assert!(MockBackend::open(&[]).is_err());
    }

    #[test]
    fn mock_backend_get_page_out_of_bounds() {
        let doc = MockBackend::open(&[1]).unwrap();
        assert!(MockBackend::get_page(&doc, 1).is_err());
    }

    #[test]
    fn mock_backend_reports_provider_order() {
        let doc = MockBackend::open(&[1]).unwrap();
        let page = MockBackend::get_page(&doc, 0).unwrap();
        let result =
            MockBackend::extract_page_layout(&doc, &page, &ExtractOptions::default()).unwrap();
        let texts: Vec<&str> = result.value.blocks[0].lines[0]
            .spans
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(texts, vec!["b", "a"]);
        assert_eq!(result.warnings[0].page, Some(0));
    }

    #[test]
    fn mock_backend_failure_is_per_page() {
        let doc = MockBackend::open(&[1, 0, 1]).unwrap();
        let options = ExtractOptions::default();
        let outcomes: Vec<bool> = (0..3)
            .map(|i| {
                let page = MockBackend::get_page(&doc, i).unwrap();
                MockBackend::extract_page_layout(&doc, &page, &options).is_ok()
            })
            .collect();
        assert_eq!(outcomes, vec![true, false, true]);
    }

    #[test]
    fn mock_backend_error_converts_to_core_error() {
        let err = MockError("boom".to_string());
        let core: PageTextError = err.into();
        assert_eq!(core, PageTextError::Other("boom".to_string()));
    }
}
