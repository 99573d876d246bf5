//! Print the reading-order text of each page of a layout JSON file.
//!
//! Usage: `cargo run --example extract_text -- <path-to-json>`

use pagetext::{Document, TextOptions};

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: extract_text <path-to-json>");
        std::process::exit(1);
    });

    let doc = Document::open_file(&path, None).unwrap_or_else(|e| {
        eprintln!("Error opening {path}: {e}");
        std::process::exit(1);
    });

    println!("Pages: {}", doc.page_count());

    for page_result in doc.pages_iter() {
        match page_result {
            Ok(page) => {
                println!("--- Page {} ---", page.page_number() + 1);
                print!("{}", page.extract_text(&TextOptions::default()));
                for warning in page.warnings() {
                    eprintln!("warning: {warning}");
                }
            }
            Err(e) => eprintln!("skipping: {e}"),
        }
    }
}
