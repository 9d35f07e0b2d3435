//! CLI output formatting.
//!
//! Output is information-first: a page is shown by its position and title,
//! with content and image as indented context lines underneath.
//!
//! ## Show
//!
//! ```text
//! Book
//!     Title: The Lighthouse
//!     Author: Ada Keeper
//!
//! Pages
//! 001 Arrival
//!     The keeper climbed
//! 002 The Storm
//!     Waves broke over the rocks.
//!     Image: images/storm.png
//! ```
//!
//! Each `format_*` function returns lines (pure, testable); the matching
//! `print_*` wrapper writes them to stdout.

use crate::session::{ClearOutcome, RestoreOutcome};
use crate::types::{Book, Page};
use std::path::Path;

/// Longest content excerpt shown under a page header.
const EXCERPT_CHARS: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// First line of `text`, cut to `max` characters with `...` when longer.
fn excerpt(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() <= max {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn or_none(value: &str) -> &str {
    if value.is_empty() { "(none)" } else { value }
}

/// Page header line: `001 Title`.
fn page_line(index: usize, page: &Page) -> String {
    format!("{} {}", format_index(index), page.title)
}

// ============================================================================
// show
// ============================================================================

/// Format the book as a content inventory.
pub fn format_book(book: &Book) -> Vec<String> {
    let mut lines = vec![
        "Book".to_string(),
        format!("{}Title: {}", indent(1), or_none(&book.title)),
        format!("{}Author: {}", indent(1), or_none(&book.author)),
        String::new(),
        "Pages".to_string(),
    ];

    if book.pages.is_empty() {
        lines.push(format!("{}(no pages yet)", indent(1)));
        return lines;
    }

    for (idx, page) in book.pages.iter().enumerate() {
        lines.push(page_line(idx + 1, page));
        if !page.content.is_empty() {
            lines.push(format!("{}{}", indent(1), excerpt(&page.content, EXCERPT_CHARS)));
        }
        if page.has_image() {
            lines.push(format!("{}Image: {}", indent(1), page.image));
        }
    }
    lines
}

pub fn print_book(book: &Book) {
    for line in format_book(book) {
        println!("{}", line);
    }
}

// ============================================================================
// Action results
// ============================================================================

/// Confirmation after a page was admitted. `index` is 1-based.
pub fn format_added_page(index: usize, page: &Page) -> String {
    format!("Added {}", page_line(index, page))
}

pub fn format_restore(outcome: RestoreOutcome) -> Option<String> {
    match outcome {
        RestoreOutcome::NoSnapshot => None,
        RestoreOutcome::Restored => Some("Restored saved book".to_string()),
        RestoreOutcome::Declined => Some("Starting with an empty book".to_string()),
    }
}

pub fn format_clear(outcome: ClearOutcome) -> String {
    match outcome {
        ClearOutcome::AlreadyEmpty => "Nothing to clear".to_string(),
        ClearOutcome::Cleared => "Cleared the book".to_string(),
        ClearOutcome::Declined => "Kept the book".to_string(),
    }
}

pub fn format_export(path: &Path, book: &Book) -> String {
    let pages = book.pages.len();
    let noun = if pages == 1 { "page" } else { "pages" };
    format!("Exported {} {} → {}", pages, noun, path.display())
}

/// One-line description used when asking whether to restore a saved book.
pub fn format_restore_prompt(book: &Book) -> String {
    let title = if book.title.is_empty() {
        "an untitled book".to_string()
    } else {
        format!("\"{}\"", book.title)
    };
    let pages = book.pages.len();
    let noun = if pages == 1 { "page" } else { "pages" };
    format!("Load your saved book, {} with {} {}?", title, pages, noun)
}
