use pagetext::{
    Document, ExtractOptions, Page, PageErrorPolicy, PageTextError, TextOptions,
    encoding_for_label, transcode,
};

use crate::cli::{TextArgs, TextFormat};
use crate::shared::{Destination, ProgressReporter, open_document, resolve_pages};

pub fn run(args: &TextArgs) -> Result<(), i32> {
    let encoding = encoding_for_label(&args.encoding).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let extract_options = ExtractOptions {
        strict_mode: args.strict,
        ..ExtractOptions::default()
    };
    let doc = open_document(&args.file, extract_options)?;
    let page_indices = resolve_pages(args.pages.as_deref(), doc.page_count())?;
    let destination = Destination::resolve(&args.file, args.output.as_deref());

    let text_options = TextOptions {
        join: args.join.to_join_policy(),
        unicode_norm: args
            .unicode_norm
            .map(|n| n.to_unicode_norm())
            .unwrap_or_default(),
        expand_ligatures: args.expand_ligatures,
    };
    let policy = args.on_error.to_policy();

    let pages = load_pages(&doc, &page_indices, args.parallel);

    let mut out = String::new();
    let mut failed = 0usize;
    for (&idx, result) in page_indices.iter().zip(pages) {
        let (text, error) = match result {
            Ok(page) => {
                for warning in page.warnings() {
                    tracing::warn!("{warning}");
                }
                (Some(page.extract_text(&text_options)), None)
            }
            Err(err) => {
                failed += 1;
                match policy {
                    PageErrorPolicy::Abort => {
                        eprintln!("Error: {err}");
                        return Err(1);
                    }
                    PageErrorPolicy::Skip => {
                        tracing::warn!(page = idx + 1, "skipping page: {err}");
                        (None, Some(err))
                    }
                    PageErrorPolicy::Empty => {
                        tracing::warn!(page = idx + 1, "emitting empty text: {err}");
                        (Some(String::new()), Some(err))
                    }
                }
            }
        };
        append_page(&mut out, args.format, idx, text.as_deref(), error.as_ref());
    }

    let encoded = transcode(&out, encoding);
    if !encoded.is_lossless() {
        tracing::warn!(
            encoding = encoding.name(),
            dropped = encoded.dropped.len(),
            "characters without a mapping were dropped"
        );
    }
    destination.write(&encoded.bytes)?;

    tracing::info!(
        pages = page_indices.len(),
        failed,
        bytes = encoded.bytes.len(),
        "wrote {destination}"
    );
    Ok(())
}

fn load_pages(doc: &Document, indices: &[usize], parallel: bool) -> Vec<Result<Page, PageTextError>> {
    if parallel {
        #[cfg(feature = "parallel")]
        {
            return doc.pages_parallel_at(indices);
        }

        #[cfg(not(feature = "parallel"))]
        tracing::warn!("built without the 'parallel' feature; processing pages sequentially");
    }

    let progress = ProgressReporter::new(indices.len());
    let pages = indices
        .iter()
        .enumerate()
        .map(|(i, &idx)| {
            progress.report(i + 1);
            doc.page(idx)
        })
        .collect();
    progress.finish();
    pages
}

/// Append one page to the output buffer. `text` is `None` for a skipped page.
fn append_page(
    out: &mut String,
    format: TextFormat,
    idx: usize,
    text: Option<&str>,
    error: Option<&PageTextError>,
) {
    match format {
        TextFormat::Text => {
            if let Some(text) = text {
                out.push_str(text);
            }
        }
        TextFormat::Json => {
            let Some(text) = text else {
                return;
            };
            let mut obj = serde_json::json!({
                "page": idx + 1,
                "text": text,
            });
            if let Some(err) = error {
                obj["error"] = serde_json::Value::String(err.to_string());
            }
            out.push_str(&obj.to_string());
            out.push('\n');
        }
    }
}
