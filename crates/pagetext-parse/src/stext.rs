//! Structured-text JSON backend.
//!
//! Decodes the block/line/span JSON that text-page exporters emit, e.g.
//!
//! ```json
//! {"width": 612, "height": 792, "blocks": [
//!   {"bbox": [72, 70, 540, 90], "lines": [
//!     {"bbox": [72, 70, 540, 90], "spans": [
//!       {"bbox": [72, 70, 120, 90], "text": "Hello"}]}]}]}
//! ```
//!
//! Input may be one page object, an array of page objects, or an object with
//! a `"pages"` array. A `bbox` is either `[x0, y0, x1, y1]` or
//! `{"x", "y", "w", "h"}`. Span text comes from `"text"` or, failing that,
//! from the `"c"` members of a `"chars"` array.

use pagetext_core::{
    BBox, Block, ExtractOptions, ExtractResult, ExtractWarning, ExtractWarningCode, Line,
    PageLayout, Span,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::backend::LayoutBackend;
use crate::error::BackendError;

/// Layout backend reading structured-text JSON.
pub struct StextBackend;

/// An opened structured-text document.
///
/// Pages are kept as raw JSON and decoded one at a time, so a malformed page
/// does not prevent access to the others.
pub struct StextDocument {
    pages: Vec<Value>,
}

impl std::fmt::Debug for StextDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StextDocument")
            .field("page_count", &self.pages.len())
            .finish_non_exhaustive()
    }
}

/// A page reference within a [`StextDocument`].
#[derive(Debug, Clone, Copy)]
pub struct StextPage {
    index: usize,
}

impl StextPage {
    /// 0-based page index.
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Deserialize)]
struct RawPage {
    width: Option<Value>,
    height: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    blocks: Vec<RawBlock>,
}

#[derive(Deserialize)]
struct RawBlock {
    bbox: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    lines: Vec<RawLine>,
}

#[derive(Deserialize)]
struct RawLine {
    bbox: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    spans: Vec<RawSpan>,
}

#[derive(Deserialize)]
struct RawSpan {
    bbox: Option<Value>,
    text: Option<Value>,
    chars: Option<Value>,
}

/// `null` reads the same as an absent list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accumulates warnings for one page.
struct PageDecoder<'a> {
    page: usize,
    options: &'a ExtractOptions,
    warnings: Vec<ExtractWarning>,
    spans_kept: usize,
    truncated: bool,
}

impl<'a> PageDecoder<'a> {
    fn new(page: usize, options: &'a ExtractOptions) -> Self {
        Self {
            page,
            options,
            warnings: Vec::new(),
            spans_kept: 0,
            truncated: false,
        }
    }

    fn warn(&mut self, code: ExtractWarningCode, description: String, element: String) {
        #[cfg(feature = "tracing")]
        tracing::warn!(page = self.page, element = %element, "{description}");
        if self.options.collect_warnings {
            self.warnings.push(
                ExtractWarning::with_code(code, description)
                    .on_page(self.page)
                    .at(element),
            );
        }
    }

    fn bbox(&mut self, value: Option<&Value>, element: String) -> BBox {
        match read_bbox(value) {
            Ok(bbox) => bbox,
            Err(BBoxProblem::Missing) => {
                self.warn(
                    ExtractWarningCode::MissingField,
                    "no bbox; position treated as unknown".to_string(),
                    element,
                );
                BBox::unknown()
            }
            Err(BBoxProblem::Malformed { partial, detail }) => {
                self.warn(
                    ExtractWarningCode::MalformedObject,
                    format!("malformed bbox ({detail}); bad coordinates treated as unknown"),
                    element,
                );
                partial
            }
        }
    }

    /// Span text from `"text"`, falling back to the `"c"` members of `"chars"`.
    fn span_text(&mut self, text: Option<Value>, chars: Option<Value>, element: &str) -> String {
        let mut repaired = false;
        match text {
            Some(Value::String(text)) => return text,
            None | Some(Value::Null) => {}
            Some(other) => {
                self.warn(
                    ExtractWarningCode::MalformedObject,
                    format!("span text is {}, not a string; ignored", json_kind(&other)),
                    element.to_string(),
                );
                repaired = true;
            }
        }

        match chars {
            Some(Value::Array(chars)) => {
                let mut out = String::new();
                for (i, ch) in chars.iter().enumerate() {
                    if !ch.is_object() {
                        self.warn(
                            ExtractWarningCode::MalformedObject,
                            format!("char is {}, not an object; dropped", json_kind(ch)),
                            format!("{element} / char {i}"),
                        );
                        continue;
                    }
                    match ch.get("c") {
                        Some(Value::String(c)) => out.push_str(c),
                        None | Some(Value::Null) => {}
                        Some(other) => self.warn(
                            ExtractWarningCode::MalformedObject,
                            format!("char text is {}, not a string; dropped", json_kind(other)),
                            format!("{element} / char {i}"),
                        ),
                    }
                }
                out
            }
            None | Some(Value::Null) => {
                if !repaired {
                    self.warn(
                        ExtractWarningCode::MissingField,
                        "span has neither text nor chars".to_string(),
                        element.to_string(),
                    );
                }
                String::new()
            }
            Some(other) => {
                self.warn(
                    ExtractWarningCode::MalformedObject,
                    format!("span chars is {}, not an array; ignored", json_kind(&other)),
                    element.to_string(),
                );
                String::new()
            }
        }
    }

    fn dimension(&mut self, value: Option<Value>, name: &str) -> Option<f64> {
        match value {
            None | Some(Value::Null) => None,
            Some(value) => {
                let dim = value.as_f64();
                if dim.is_none() {
                    self.warn(
                        ExtractWarningCode::MalformedObject,
                        format!("page {name} is {}, not a number; ignored", json_kind(&value)),
                        name.to_string(),
                    );
                }
                dim
            }
        }
    }

    fn decode(mut self, raw: RawPage) -> ExtractResult<PageLayout> {
        let mut blocks = Vec::with_capacity(raw.blocks.len());
        for (b, raw_block) in raw.blocks.into_iter().enumerate() {
            let bbox = self.bbox(raw_block.bbox.as_ref(), format!("block {b}"));
            let mut lines = Vec::with_capacity(raw_block.lines.len());
            for (l, raw_line) in raw_block.lines.into_iter().enumerate() {
                let line_bbox =
                    self.bbox(raw_line.bbox.as_ref(), format!("block {b} / line {l}"));
                let mut spans = Vec::with_capacity(raw_line.spans.len());
                for (s, raw_span) in raw_line.spans.into_iter().enumerate() {
                    if self.spans_kept >= self.options.max_spans_per_page {
                        self.truncate(format!("block {b} / line {l} / span {s}"));
                        break;
                    }
                    let element = format!("block {b} / line {l} / span {s}");
                    let span_bbox = self.bbox(raw_span.bbox.as_ref(), element.clone());
                    let text = self.span_text(raw_span.text, raw_span.chars, &element);
                    spans.push(Span::new(text, span_bbox));
                    self.spans_kept += 1;
                }
                lines.push(Line::new(spans, line_bbox));
            }
            blocks.push(Block::new(lines, bbox));
        }

        let mut layout = PageLayout::new(blocks);
        layout.width = self.dimension(raw.width, "width");
        layout.height = self.dimension(raw.height, "height");

        #[cfg(feature = "tracing")]
        tracing::debug!(
            page = self.page,
            blocks = layout.blocks.len(),
            spans = self.spans_kept,
            "decoded page layout"
        );

        ExtractResult::with_warnings(layout, self.warnings)
    }

    fn truncate(&mut self, element: String) {
        if self.truncated {
            return;
        }
        self.truncated = true;
        let limit = self.options.max_spans_per_page;
        self.warn(
            ExtractWarningCode::ResourceLimitReached,
            format!("span limit reached (max_spans_per_page = {limit}); remaining spans dropped"),
            element,
        );
    }
}

enum BBoxProblem {
    Missing,
    /// Some coordinates could not be read; those are NaN in `partial`.
    Malformed { partial: BBox, detail: String },
}

const BBOX_NAMES: [&str; 4] = ["x0", "top", "x1", "bottom"];

fn read_bbox(value: Option<&Value>) -> Result<BBox, BBoxProblem> {
    let coords = match value {
        None | Some(Value::Null) => return Err(BBoxProblem::Missing),
        Some(Value::Array(items)) => {
            let mut coords = [None; 4];
            for (slot, item) in coords.iter_mut().zip(items) {
                *slot = item.as_f64();
            }
            if items.len() != 4 {
                return Err(BBoxProblem::Malformed {
                    partial: bbox_from(coords),
                    detail: format!("expected 4 numbers, found {}", items.len()),
                });
            }
            coords
        }
        Some(Value::Object(map)) => {
            let field = |name: &str| map.get(name).and_then(Value::as_f64);
            let (x, y, w, h) = (field("x"), field("y"), field("w"), field("h"));
            [x, y, x.zip(w).map(|(x, w)| x + w), y.zip(h).map(|(y, h)| y + h)]
        }
        Some(other) => {
            return Err(BBoxProblem::Malformed {
                partial: BBox::unknown(),
                detail: format!("expected array or object, found {}", json_kind(other)),
            });
        }
    };

    let bad: Vec<&str> = BBOX_NAMES
        .iter()
        .zip(coords)
        .filter(|(_, c)| c.is_none())
        .map(|(name, _)| *name)
        .collect();
    if bad.is_empty() {
        Ok(bbox_from(coords))
    } else {
        Err(BBoxProblem::Malformed {
            partial: bbox_from(coords),
            detail: format!("unreadable {}", bad.join(", ")),
        })
    }
}

fn bbox_from(coords: [Option<f64>; 4]) -> BBox {
    let [x0, top, x1, bottom] = coords.map(|c| c.unwrap_or(f64::NAN));
    BBox::new(x0, top, x1, bottom)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl LayoutBackend for StextBackend {
    type Document = StextDocument;
    type Page = StextPage;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let root: Value = serde_json::from_slice(bytes)?;
        let pages = match root {
            Value::Array(pages) => pages,
            Value::Object(mut map) => match map.remove("pages") {
                Some(Value::Array(pages)) => pages,
                Some(other) => {
                    return Err(BackendError::Parse(format!(
                        "\"pages\" must be an array, found {}",
                        json_kind(&other)
                    )));
                }
                None => vec![Value::Object(map)],
            },
            other => {
                return Err(BackendError::Parse(format!(
                    "expected a page object or an array of pages, found {}",
                    json_kind(&other)
                )));
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(pages = pages.len(), "opened structured-text document");

        Ok(StextDocument { pages })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.pages.len()
    }

    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error> {
        if index >= doc.pages.len() {
            return Err(BackendError::PageOutOfRange {
                index,
                count: doc.pages.len(),
            });
        }
        Ok(StextPage { index })
    }

    fn extract_page_layout(
        doc: &Self::Document,
        page: &Self::Page,
        options: &ExtractOptions,
    ) -> Result<ExtractResult<PageLayout>, Self::Error> {
        let value = doc
            .pages
            .get(page.index)
            .ok_or(BackendError::PageOutOfRange {
                index: page.index,
                count: doc.pages.len(),
            })?;
        if !value.is_object() {
            return Err(BackendError::Render {
                page: page.index,
                message: format!("page is not an object (found {})", json_kind(value)),
            });
        }
        let raw = RawPage::deserialize(value).map_err(|e| BackendError::Render {
            page: page.index,
            message: e.to_string(),
        })?;
        Ok(PageDecoder::new(page.index, options).decode(raw))
    }
}
