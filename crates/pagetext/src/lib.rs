//! pagetext: reading-order plain text from page layouts.
//!
//! This is the public API facade crate. It re-exports types from
//! pagetext-core and uses pagetext-parse to obtain page layouts.
//!
//! # Architecture
//!
//! - **pagetext-core**: Layout model, geometry sorter, text assembler
//! - **pagetext-parse**: Layout providers ([`LayoutBackend`], structured-text JSON)
//! - **pagetext** (this crate): [`Document`] and [`Page`], tying the two together
//!
//! # Example
//!
//! ```ignore
//! use pagetext::{Document, PageErrorPolicy, TextOptions};
//!
//! let doc = Document::open_file("page.json", None)?;
//! let out = doc.extract_text(&TextOptions::default(), PageErrorPolicy::Skip)?;
//! print!("{}", out.text);
//! ```

mod document;
mod page;

pub use document::{Document, DocumentText, PageErrorPolicy, PagesIter};
pub use page::Page;
pub use pagetext_core;
pub use pagetext_core::{
    BBox, Block, ExtractOptions, ExtractResult, ExtractWarning, ExtractWarningCode, JoinPolicy,
    Line, PageLayout, PageTextError, Positioned, SortAxis, SortKey, Span, TextOptions, Transcoded,
    UnicodeNorm, assemble_page_text, assemble_page_text_with, encoding_for_label,
    expand_ligatures, layout_to_text, sort_by_position, sort_page, to_pixel, transcode,
};
pub use pagetext_parse;
pub use pagetext_parse::{BackendError, LayoutBackend, StextBackend};
