//! Shared types for the book model.
//!
//! These are the exact shapes written to the persistence slot as JSON
//! (`{"title", "author", "pages": [{"title", "content", "image"}]}`), so the
//! field names are part of the stored format. Unknown or missing fields are
//! rejected on read: a differently-shaped snapshot is simply not a book.

use serde::{Deserialize, Serialize};

/// Title given to a page admitted with a blank title.
pub const UNTITLED_PAGE: &str = "Untitled Page";

/// Heading used by the document generator when the book has no title.
pub const DEFAULT_TITLE: &str = "My Interactive Book";

/// Author line used by the document generator when the book has no author.
pub const DEFAULT_AUTHOR: &str = "Unknown Author";

/// The in-memory book being authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Append-only under normal use; order is reading order.
    pub pages: Vec<Page>,
}

/// One titled content unit within a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Page {
    pub title: String,
    /// Free text; line breaks are preserved in the exported document.
    pub content: String,
    /// Image URL or path. Empty means no image.
    pub image: String,
}

impl Page {
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}
