//! pagetext-parse: page layout providers.
//!
//! This crate defines the [`LayoutBackend`] trait through which pagetext
//! obtains unordered block/line/span layouts, and ships [`StextBackend`],
//! which reads structured-text JSON. It depends on pagetext-core for the
//! shared data types.

pub mod backend;
pub mod error;
pub mod stext;

pub use backend::LayoutBackend;
pub use error::BackendError;
pub use pagetext_core;
pub use stext::{StextBackend, StextDocument, StextPage};
