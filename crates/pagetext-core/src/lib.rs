//! pagetext-core: Backend-independent data types and algorithms.
//!
//! This crate provides the page layout model (Span, Line, Block, PageLayout),
//! reading-order sorting, page text assembly, Unicode normalization and output
//! transcoding used by pagetext. It knows nothing about document formats;
//! layouts are produced by a backend in `pagetext-parse`.

pub mod encoding;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod order;
pub mod text;
pub mod unicode_norm;

pub use encoding::{Transcoded, encoding_for_label, transcode};
pub use error::{ExtractOptions, ExtractResult, ExtractWarning, ExtractWarningCode, PageTextError};
pub use geometry::{BBox, PIXEL_EPSILON, to_pixel};
pub use layout::{Block, Line, PageLayout, Span};
pub use order::{
    Positioned, SortAxis, SortKey, sort_by_position, sort_in_place, sort_page, sort_page_in_place,
};
pub use text::{
    JoinPolicy, PageTextBuilder, TextOptions, assemble_page_text, assemble_page_text_with,
    expand_ligatures, layout_to_text,
};
pub use unicode_norm::UnicodeNorm;
