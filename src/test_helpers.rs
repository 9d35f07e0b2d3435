//! Shared fixtures for the unit test suite.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let book = sample_book();
//! assert_eq!(book.pages.len(), 2);
//!
//! let store = MemoryStore::with_slot(SLOT, &serialize(&book).unwrap());
//! ```

use crate::types::{Book, Page};

/// Slot name used by persistence tests.
pub const SLOT: &str = "bookData";

/// Build a page without going through admission.
pub fn page(title: &str, content: &str, image: &str) -> Page {
    Page {
        title: title.to_string(),
        content: content.to_string(),
        image: image.to_string(),
    }
}

/// A titled, authored, two-page book. Only the second page has an image.
pub fn sample_book() -> Book {
    Book {
        title: "The Lighthouse".to_string(),
        author: "Ada Keeper".to_string(),
        pages: vec![
            page("Arrival", "The keeper climbed\nthe hundred steps.", ""),
            page("The Storm", "Waves broke over the rocks.", "images/storm.png"),
        ],
    }
}
