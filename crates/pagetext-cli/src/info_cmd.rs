use std::path::Path;

use pagetext::{ExtractOptions, Page};

use crate::cli::TextFormat;
use crate::shared::{ProgressReporter, open_document, resolve_pages};

fn format_size(page: &Page) -> String {
    match (page.width(), page.height()) {
        (Some(w), Some(h)) => format!("{w:.2} x {h:.2}"),
        _ => "unknown".to_string(),
    }
}

pub fn run(file: &Path, pages: Option<&str>, format: TextFormat) -> Result<(), i32> {
    let doc = open_document(file, ExtractOptions::default())?;
    let page_count = doc.page_count();
    let page_indices = resolve_pages(pages, page_count)?;
    let progress = ProgressReporter::new(page_indices.len());

    let mut total_spans = 0usize;
    let mut failed = 0usize;
    let mut page_infos = Vec::with_capacity(page_indices.len());

    if format == TextFormat::Text {
        println!("File: {}", file.display());
        println!("Pages: {page_count}");
    }

    for (i, &idx) in page_indices.iter().enumerate() {
        progress.report(i + 1);

        let page = match doc.page(idx) {
            Ok(page) => page,
            Err(err) => {
                failed += 1;
                match format {
                    TextFormat::Text => println!("Page {}: error: {err}", idx + 1),
                    TextFormat::Json => page_infos.push(serde_json::json!({
                        "page": idx + 1,
                        "error": err.to_string(),
                    })),
                }
                continue;
            }
        };

        let layout = page.layout();
        let (blocks, lines, spans) = (
            layout.blocks.len(),
            layout.line_count(),
            layout.span_count(),
        );
        total_spans += spans;

        match format {
            TextFormat::Text => {
                println!("Page {}:", idx + 1);
                println!("  Size: {}", format_size(&page));
                println!("  Blocks: {blocks}");
                println!("  Lines: {lines}");
                println!("  Spans: {spans}");
                println!("  Warnings: {}", page.warnings().len());
                for warning in page.warnings() {
                    println!("    {warning}");
                }
            }
            TextFormat::Json => {
                let warnings: Vec<String> =
                    page.warnings().iter().map(ToString::to_string).collect();
                page_infos.push(serde_json::json!({
                    "page": idx + 1,
                    "width": page.width(),
                    "height": page.height(),
                    "blocks": blocks,
                    "lines": lines,
                    "spans": spans,
                    "warnings": warnings,
                }));
            }
        }
    }

    progress.finish();

    match format {
        TextFormat::Text => {
            println!("Total spans: {total_spans}");
            if failed > 0 {
                println!("Failed pages: {failed}");
            }
        }
        TextFormat::Json => {
            let obj = serde_json::json!({
                "file": file.display().to_string(),
                "page_count": page_count,
                "total_spans": total_spans,
                "failed_pages": failed,
                "pages": page_infos,
            });
            println!("{obj:#}");
        }
    }

    Ok(())
}
