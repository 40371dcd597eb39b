//! collab-pages demo: paginates a long document with the estimating surface.
//! The main interface is through WASM bindings.
//!
//! Run with `RUST_LOG=debug` to see each block move.

use collab_pages::document::markup;
use collab_pages::{Document, Editor, EditorConfig};

const PARAGRAPH: &str = "Pagination keeps every page within its printed height. When an edit \
pushes content past the bottom of a page, trailing blocks move onto a fresh page inserted \
right after it, and the check repeats until every page fits.";

fn main() {
    env_logger::init();

    let config = EditorConfig::default();
    let mut content = String::from("<h1>Quarterly report</h1>");
    for i in 1..=24 {
        content.push_str(&markup::paste_to_markup(&format!("{} {}", i, PARAGRAPH)));
    }
    let document = Document::from_pages("Quarterly report", &[&content]);

    let mut editor = Editor::with_document(config, document);
    let mut surface = editor.estimated_surface();

    editor.notify_mutation(0);
    let report = editor.tick(500, &mut surface);

    println!("collab-pages demo");
    println!("=================");
    if let Some(pagination) = report.pagination {
        println!(
            "{} page(s) created in {} pass(es)",
            pagination.relocations.len(),
            pagination.passes
        );
    }
    for (index, page) in editor.document().pages().iter().enumerate() {
        println!("Page {} of {}: {} block(s)", index + 1, editor.document().page_count(), page.block_count());
    }
    for notification in editor.take_notifications() {
        match notification.description {
            Some(description) => println!("[{}] {}", notification.title, description),
            None => println!("[{}]", notification.title),
        }
    }
}
