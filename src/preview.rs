//! Preview rendering.
//!
//! The preview is an abbreviated HTML fragment of the book for on-screen
//! display. With no pages it is always the empty-state placeholder, whatever
//! the title and author say. Otherwise:
//!
//! ```text
//! div.page-item            (only when the book has a title)
//!   h4  title
//!   p > em  "by <author>"  (only when the book has an author)
//! div.page-item            (one per page, in order)
//!   span.page-number  "Page <n>"
//!   h4  page title
//!   p   page content
//!   img                    (only when the page has an image; hides itself on load failure)
//! ```

use crate::config::LabelsConfig;
use crate::escape::Escaped;
use crate::types::Book;
use maud::{Markup, html};

/// Hides a broken preview image instead of showing an error.
const HIDE_ON_ERROR: &str = "this.style.display='none'";

/// Render the preview fragment for a book.
pub fn render_preview(book: &Book, labels: &LabelsConfig) -> Markup {
    if book.pages.is_empty() {
        return render_empty_state(labels);
    }

    html! {
        @if !book.title.is_empty() {
            div.page-item {
                h4 { (Escaped(&book.title)) }
                @if !book.author.is_empty() {
                    p { em { (labels.byline) " " (Escaped(&book.author)) } }
                }
            }
        }
        @for (idx, page) in book.pages.iter().enumerate() {
            div.page-item {
                span.page-number { (labels.page) " " (idx + 1) }
                h4 { (Escaped(&page.title)) }
                p { (Escaped(&page.content)) }
                @if page.has_image() {
                    img src=(Escaped(&page.image)) alt=(Escaped(&page.title)) onerror=(HIDE_ON_ERROR);
                }
            }
        }
    }
}

/// The placeholder shown while the book has no pages.
pub fn render_empty_state(labels: &LabelsConfig) -> Markup {
    html! {
        p.empty-state { (labels.empty_state) }
    }
}
