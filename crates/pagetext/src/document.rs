//! Top-level document type for opening layouts and extracting page text.

use pagetext_core::{ExtractOptions, ExtractWarning, PageTextError, TextOptions, sort_page};
use pagetext_parse::{LayoutBackend, StextBackend};

use crate::Page;

/// What a page that fails to render contributes to whole-document text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageErrorPolicy {
    /// Stop at the first failing page and return its error.
    #[default]
    Abort,
    /// Leave the page out entirely.
    Skip,
    /// Substitute the empty string for the page.
    Empty,
}

/// Whole-document text together with the pages that could not be rendered.
#[derive(Debug, Clone, Default)]
pub struct DocumentText {
    /// Concatenated text of all rendered pages, in page order.
    pub text: String,
    /// Errors for pages that were skipped or substituted.
    pub failed_pages: Vec<PageTextError>,
    /// Warnings collected from every rendered page.
    pub warnings: Vec<ExtractWarning>,
}

/// Iterator over pages of a document, yielding each page on demand.
///
/// Created by [`Document::pages_iter()`]. Pages are not retained after being
/// yielded.
pub struct PagesIter<'a, B: LayoutBackend> {
    doc: &'a Document<B>,
    current: usize,
    count: usize,
}

impl<B: LayoutBackend> Iterator for PagesIter<'_, B> {
    type Item = Result<Page, PageTextError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.count {
            return None;
        }
        let result = self.doc.page(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.current;
        (remaining, Some(remaining))
    }
}

impl<B: LayoutBackend> ExactSizeIterator for PagesIter<'_, B> {}

/// A document opened for text extraction.
///
/// Wraps a backend document and turns each of its pages into reading-order
/// text. The default backend reads structured-text JSON.
///
/// # Example
///
/// ```ignore
/// let doc = Document::open(bytes, None)?;
/// let text = doc.process_page(0, &TextOptions::default())?;
/// ```
pub struct Document<B: LayoutBackend = StextBackend> {
    doc: B::Document,
    options: ExtractOptions,
}

impl Document {
    /// Open a structured-text document from a file path.
    ///
    /// Convenience wrapper around [`Document::open`] that reads the file into
    /// memory first.
    ///
    /// # Errors
    ///
    /// Returns [`PageTextError::IoError`] if the file cannot be read, or any
    /// error [`Document::open`] returns.
    #[cfg(feature = "std")]
    pub fn open_file(
        path: impl AsRef<std::path::Path>,
        options: Option<ExtractOptions>,
    ) -> Result<Self, PageTextError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes, options)
    }

    /// Open a structured-text document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PageTextError::ResourceLimitExceeded`] if the input or its
    /// page count exceeds the configured limits, and
    /// [`PageTextError::ParseError`] if the bytes are not a layout document.
    pub fn open(bytes: &[u8], options: Option<ExtractOptions>) -> Result<Self, PageTextError> {
        Self::open_with_backend(bytes, options)
    }
}

impl<B: LayoutBackend> Document<B> {
    /// Open a document from bytes using backend `B`.
    ///
    /// # Errors
    ///
    /// See [`Document::open`].
    pub fn open_with_backend(
        bytes: &[u8],
        options: Option<ExtractOptions>,
    ) -> Result<Self, PageTextError> {
        let options = options.unwrap_or_default();
        if let Some(max_bytes) = options.max_input_bytes {
            if bytes.len() > max_bytes {
                return Err(PageTextError::ResourceLimitExceeded {
                    limit_name: "max_input_bytes".to_string(),
                    limit_value: max_bytes,
                    actual_value: bytes.len(),
                });
            }
        }

        let doc = B::open(bytes).map_err(backend_error)?;

        let page_count = B::page_count(&doc);
        if let Some(max_pages) = options.max_pages {
            if page_count > max_pages {
                return Err(PageTextError::ResourceLimitExceeded {
                    limit_name: "max_pages".to_string(),
                    limit_value: max_pages,
                    actual_value: page_count,
                });
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(pages = page_count, bytes = bytes.len(), "opened document");

        Ok(Self { doc, options })
    }

    /// Return the number of pages in the document.
    pub fn page_count(&self) -> usize {
        B::page_count(&self.doc)
    }

    /// Return the extraction options this document was opened with.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Access a page by 0-based index.
    ///
    /// The returned [`Page`] holds the layout already sorted into reading
    /// order, together with any warnings the backend raised for it.
    ///
    /// # Errors
    ///
    /// Returns [`PageTextError::PageOutOfRange`] for a bad index and
    /// [`PageTextError::RenderError`] if the backend cannot render the page.
    /// In strict mode the first warning is returned as an error instead.
    pub fn page(&self, index: usize) -> Result<Page, PageTextError> {
        let handle = B::get_page(&self.doc, index).map_err(backend_error)?;
        let extracted =
            B::extract_page_layout(&self.doc, &handle, &self.options).map_err(backend_error)?;

        if self.options.strict_mode {
            if let Some(warning) = extracted.warnings.first() {
                return Err(warning.to_error());
            }
        }

        #[cfg(feature = "tracing")]
        {
            if !extracted.warnings.is_empty() {
                tracing::warn!(
                    page = index,
                    warnings = extracted.warnings.len(),
                    "page layout repaired"
                );
            }
        }

        let sorted = extracted.map(sort_page);
        Ok(Page::new(index, sorted.value, sorted.warnings))
    }

    /// Fetch, sort and assemble one page, returning its text.
    ///
    /// # Errors
    ///
    /// Same as [`Document::page`]; the error concerns this page only.
    pub fn process_page(&self, index: usize, options: &TextOptions) -> Result<String, PageTextError> {
        let text = self.page(index)?.extract_text(options);

        #[cfg(feature = "tracing")]
        tracing::debug!(page = index, chars = text.len(), "assembled page text");

        Ok(text)
    }

    /// Return an iterator over all pages, processing each on demand.
    pub fn pages_iter(&self) -> PagesIter<'_, B> {
        PagesIter {
            doc: self,
            current: 0,
            count: self.page_count(),
        }
    }

    /// Text of every page in page order, one result per page.
    pub fn pages_text<'a>(
        &'a self,
        options: &'a TextOptions,
    ) -> impl Iterator<Item = Result<String, PageTextError>> + 'a {
        (0..self.page_count()).map(move |i| self.process_page(i, options))
    }

    /// Concatenate the text of every page, applying `policy` to pages that
    /// fail.
    ///
    /// # Errors
    ///
    /// With [`PageErrorPolicy::Abort`], returns the first page error.
    /// Other policies never fail.
    pub fn extract_text(
        &self,
        options: &TextOptions,
        policy: PageErrorPolicy,
    ) -> Result<DocumentText, PageTextError> {
        collect_text(
            (0..self.page_count()).map(|i| self.page(i)),
            options,
            policy,
        )
    }
}

#[cfg(feature = "parallel")]
impl<B> Document<B>
where
    B: LayoutBackend,
    B::Document: Sync,
{
    /// Process all pages in parallel using rayon.
    ///
    /// Results come back in page order regardless of scheduling.
    pub fn pages_parallel(&self) -> Vec<Result<Page, PageTextError>> {
        use rayon::prelude::*;

        (0..self.page_count())
            .into_par_iter()
            .map(|i| self.page(i))
            .collect()
    }

    /// Process the given 0-based page indices in parallel.
    ///
    /// Results are returned in the order of `indices`.
    pub fn pages_parallel_at(&self, indices: &[usize]) -> Vec<Result<Page, PageTextError>> {
        use rayon::prelude::*;

        indices.par_iter().map(|&i| self.page(i)).collect()
    }

    /// Parallel counterpart of [`Document::extract_text`].
    ///
    /// # Errors
    ///
    /// Same as [`Document::extract_text`].
    pub fn extract_text_parallel(
        &self,
        options: &TextOptions,
        policy: PageErrorPolicy,
    ) -> Result<DocumentText, PageTextError> {
        collect_text(self.pages_parallel(), options, policy)
    }
}

fn backend_error<E: Into<PageTextError>>(err: E) -> PageTextError {
    err.into()
}

fn collect_text(
    pages: impl IntoIterator<Item = Result<Page, PageTextError>>,
    options: &TextOptions,
    policy: PageErrorPolicy,
) -> Result<DocumentText, PageTextError> {
    let mut out = DocumentText::default();
    for result in pages {
        match result {
            Ok(page) => {
                out.text.push_str(&page.extract_text(options));
                out.warnings.extend_from_slice(page.warnings());
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, ?policy, "page failed");
                match policy {
                    PageErrorPolicy::Abort => return Err(err),
                    PageErrorPolicy::Skip | PageErrorPolicy::Empty => out.failed_pages.push(err),
                }
            }
        }
    }
    Ok(out)
}
