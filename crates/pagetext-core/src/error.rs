//! Error and warning types for pagetext.
//!
//! Provides [`PageTextError`] for fatal errors that stop processing of a
//! document or page, [`ExtractWarning`] for non-fatal repairs that allow
//! best-effort continuation, [`ExtractResult`] for pairing a value with
//! collected warnings, and [`ExtractOptions`] for configuring resource limits
//! and warning behavior.

use std::fmt;

/// Fatal error types for page text extraction.
///
/// Sorting and assembly never fail; these errors come from reading input,
/// from the layout provider, or from caller-supplied configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum PageTextError {
    /// The input could not be decoded as a layout document.
    ParseError(String),
    /// I/O error reading input data.
    IoError(String),
    /// The provider could not produce a layout for a page.
    RenderError {
        /// Page index (0-based).
        page: usize,
        /// What went wrong.
        message: String,
    },
    /// A page index past the end of the document was requested.
    PageOutOfRange {
        /// Requested page index (0-based).
        index: usize,
        /// Number of pages in the document.
        count: usize,
    },
    /// An output encoding label was not recognized.
    UnknownEncoding(String),
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_input_bytes").
        limit_name: String,
        /// The configured limit value.
        limit_value: usize,
        /// The actual value that exceeded the limit.
        actual_value: usize,
    },
    /// Any other error not covered by specific variants.
    Other(String),
}

impl PageTextError {
    /// The page this error is attached to, if any.
    pub fn page(&self) -> Option<usize> {
        match self {
            PageTextError::RenderError { page, .. } => Some(*page),
            PageTextError::PageOutOfRange { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for PageTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTextError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PageTextError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PageTextError::RenderError { page, message } => {
                write!(f, "cannot render page {}: {message}", page + 1)
            }
            PageTextError::PageOutOfRange { index, count } => write!(
                f,
                "page {} out of range (document has {count} pages)",
                index + 1
            ),
            PageTextError::UnknownEncoding(label) => write!(f, "unknown encoding: {label}"),
            PageTextError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            PageTextError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PageTextError {}

impl From<std::io::Error> for PageTextError {
    fn from(err: std::io::Error) -> Self {
        PageTextError::IoError(err.to_string())
    }
}

/// Machine-readable warning code for categorizing extraction issues.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum ExtractWarningCode {
    /// A layout element is malformed (e.g. a bbox with the wrong arity).
    MalformedObject,
    /// A layout element lacks a field it should carry (e.g. no bbox).
    MissingField,
    /// A configured resource limit was reached and input was truncated.
    ResourceLimitReached,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl ExtractWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            ExtractWarningCode::MalformedObject => "MALFORMED_OBJECT",
            ExtractWarningCode::MissingField => "MISSING_FIELD",
            ExtractWarningCode::ResourceLimitReached => "RESOURCE_LIMIT_REACHED",
            ExtractWarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for ExtractWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal issue repaired during extraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractWarning {
    /// Machine-readable warning code.
    pub code: ExtractWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Page index where the warning occurred (0-based), if applicable.
    pub page: Option<usize>,
    /// Element path within the page (e.g. "block 2 / line 0 / span 3").
    pub element: Option<String>,
}

impl ExtractWarning {
    /// Create a warning with a specific code and description.
    pub fn with_code(code: ExtractWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            element: None,
        }
    }

    /// Attach the page index (builder pattern).
    pub fn on_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Attach the element path (builder pattern).
    pub fn at(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Convert this warning into a [`PageTextError`].
    ///
    /// Used by strict mode to escalate warnings to errors.
    pub fn to_error(&self) -> PageTextError {
        match self.page {
            Some(page) => PageTextError::RenderError {
                page,
                message: self.to_string(),
            },
            None => PageTextError::Other(self.to_string()),
        }
    }
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {})", page + 1)?;
        }
        if let Some(ref element) = self.element {
            write!(f, " [{element}]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
#[derive(Debug, Clone)]
pub struct ExtractResult<T> {
    /// The extracted value.
    pub value: T,
    /// Warnings collected during extraction.
    pub warnings: Vec<ExtractWarning>,
}

impl<T> ExtractResult<T> {
    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<ExtractWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value while preserving warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractResult<U> {
        ExtractResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Options controlling extraction behavior and resource limits.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Maximum input size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
    /// Maximum number of pages to expose (default: None = no limit).
    pub max_pages: Option<usize>,
    /// Maximum spans kept per page; extra spans are dropped with a
    /// warning (default: 100,000).
    pub max_spans_per_page: usize,
    /// Whether to collect warnings during extraction (default: true).
    pub collect_warnings: bool,
    /// When true, any warning is escalated to an error (default: false).
    pub strict_mode: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: None,
            max_pages: None,
            max_spans_per_page: 100_000,
            collect_warnings: true,
            strict_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err = PageTextError::ParseError("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "parse error: expected value at line 1");
    }

    #[test]
    fn render_error_display_is_one_based() {
        let err = PageTextError::RenderError {
            page: 2,
            message: "not an object".to_string(),
        };
        assert_eq!(err.to_string(), "cannot render page 3: not an object");
        assert_eq!(err.page(), Some(2));
    }

    #[test]
    fn page_out_of_range_display() {
        let err = PageTextError::PageOutOfRange { index: 4, count: 2 };
        assert_eq!(
            err.to_string(),
            "page 5 out of range (document has 2 pages)"
        );
    }

    #[test]
    fn resource_limit_display() {
        let err = PageTextError::ResourceLimitExceeded {
            limit_name: "max_input_bytes".to_string(),
            limit_value: 1024,
            actual_value: 2048,
        };
        assert_eq!(
            err.to_string(),
            "resource limit exceeded: max_input_bytes (limit: 1024, actual: 2048)"
        );
        assert_eq!(err.page(), None);
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PageTextError = io.into();
        assert!(matches!(err, PageTextError::IoError(ref m) if m.contains("gone")));
    }

    #[test]
    fn error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(PageTextError::Other("x".to_string()));
        assert_eq!(err.to_string(), "x");
    }

    #[test]
    fn warning_display_with_context() {
        let w = ExtractWarning::with_code(ExtractWarningCode::MissingField, "span has no bbox")
            .on_page(0)
            .at("block 1 / line 0 / span 2");
        assert_eq!(
            w.to_string(),
            "[MISSING_FIELD] span has no bbox (page 1) [block 1 / line 0 / span 2]"
        );
    }

    #[test]
    fn warning_escalates_to_render_error() {
        let w = ExtractWarning::with_code(ExtractWarningCode::MalformedObject, "bad bbox").on_page(3);
        match w.to_error() {
            PageTextError::RenderError { page, message } => {
                assert_eq!(page, 3);
                assert!(message.contains("MALFORMED_OBJECT"));
            }
            other => panic!("expected RenderError, got {other:?}"),
        }
    }

    #[test]
    fn warning_without_page_escalates_to_other() {
        let w = ExtractWarning::with_code(ExtractWarningCode::Other("x".into()), "odd");
        assert_eq!(w.to_error(), PageTextError::Other("[OTHER] odd".to_string()));
    }

    #[test]
    fn extract_result_map_keeps_warnings() {
        let w = ExtractWarning::with_code(ExtractWarningCode::MissingField, "no bbox");
        let r = ExtractResult::with_warnings(2, vec![w.clone()]).map(|v| v * 10);
        assert_eq!(r.value, 20);
        assert_eq!(r.warnings, vec![w]);
        assert!(!r.is_clean());
        assert!(ExtractResult::with_warnings((), Vec::new()).is_clean());
    }

    #[test]
    fn extract_options_defaults() {
        let opts = ExtractOptions::default();
        assert_eq!(opts.max_input_bytes, None);
        assert_eq!(opts.max_pages, None);
        assert_eq!(opts.max_spans_per_page, 100_000);
        assert!(opts.collect_warnings);
        assert!(!opts.strict_mode);
    }
}
