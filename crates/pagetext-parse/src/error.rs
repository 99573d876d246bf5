//! Error types for the layout provider layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps backend-specific errors and converts them to [`PageTextError`].

use pagetext_core::PageTextError;
use thiserror::Error;

/// Error type for layout backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The input could not be decoded as a layout document.
    #[error("layout parse error: {0}")]
    Parse(String),

    /// Error reading input data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A single page could not be turned into a layout.
    #[error("cannot render page {}: {message}", page + 1)]
    Render { page: usize, message: String },

    /// Requested page index is past the end of the document.
    #[error("page {} out of range (document has {count} pages)", index + 1)]
    PageOutOfRange { index: usize, count: usize },

    /// A core library error.
    #[error(transparent)]
    Core(#[from] PageTextError),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Parse(err.to_string())
    }
}

impl From<BackendError> for PageTextError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => PageTextError::ParseError(msg),
            BackendError::Io(e) => PageTextError::IoError(e.to_string()),
            BackendError::Render { page, message } => PageTextError::RenderError { page, message },
            BackendError::PageOutOfRange { index, count } => {
                PageTextError::PageOutOfRange { index, count }
            }
            BackendError::Core(e) => e,
        }
    }
}
