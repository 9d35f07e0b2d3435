//! Book mutations: page admission, title/author updates, and clearing.
//!
//! Page admission is the only way pages enter a book. Inputs are trimmed
//! before they are judged, and a page with neither a title nor any content is
//! rejected without touching the book:
//!
//! ```text
//! ("",       "",          "")  → Err(EmptyPage), book unchanged
//! ("",       "Some text", "")  → Page { title: "Untitled Page", content: "Some text", image: "" }
//! ("  Hi  ", "",          " x.png ") → Page { title: "Hi", content: "", image: "x.png" }
//! ```
//!
//! Clearing is a two-step protocol instead of a dialog: [`Book::clear_request`]
//! says whether there is anything to lose, the caller asks the user if needed,
//! then calls [`Book::reset`].

use crate::types::{Book, Page, UNTITLED_PAGE};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("a page needs at least a title or some content")]
    EmptyPage,
}

/// What clearing the book would involve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearRequest {
    /// No title, no author, no pages: clearing is a no-op.
    NothingToClear,
    /// The book holds data; the user must confirm before [`Book::reset`].
    ConfirmationRequired,
}

/// Build a page from raw form input, or reject it.
///
/// `untitled` is the title given to a page whose trimmed title is blank.
pub fn admit_page(
    title: &str,
    content: &str,
    image: &str,
    untitled: &str,
) -> Result<Page, AdmissionError> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() && content.is_empty() {
        return Err(AdmissionError::EmptyPage);
    }
    Ok(Page {
        title: if title.is_empty() {
            untitled.to_string()
        } else {
            title.to_string()
        },
        content: content.to_string(),
        image: image.trim().to_string(),
    })
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the book has no title, no author, and no pages.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.author.is_empty() && self.pages.is_empty()
    }

    /// Export needs at least one page.
    pub fn can_export(&self) -> bool {
        !self.pages.is_empty()
    }

    /// Title is stored exactly as entered.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Author is stored exactly as entered.
    pub fn set_author(&mut self, author: &str) {
        self.author = author.to_string();
    }

    /// Admit and append a page, using the stock placeholder for blank titles.
    pub fn add_page(
        &mut self,
        title: &str,
        content: &str,
        image: &str,
    ) -> Result<&Page, AdmissionError> {
        self.add_page_with_placeholder(title, content, image, UNTITLED_PAGE)
    }

    /// Admit and append a page, naming blank-titled pages `untitled`.
    pub fn add_page_with_placeholder(
        &mut self,
        title: &str,
        content: &str,
        image: &str,
        untitled: &str,
    ) -> Result<&Page, AdmissionError> {
        let page = admit_page(title, content, image, untitled)?;
        self.pages.push(page);
        Ok(&self.pages[self.pages.len() - 1])
    }

    pub fn clear_request(&self) -> ClearRequest {
        if self.is_empty() {
            ClearRequest::NothingToClear
        } else {
            ClearRequest::ConfirmationRequired
        }
    }

    /// Discard everything. Callers go through [`Book::clear_request`] first.
    pub fn reset(&mut self) {
        *self = Book::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_book;

    #[test]
    fn empty_input_is_rejected() {
        let mut book = Book::new();
        let result = book.add_page("", "", "");
        assert_eq!(result, Err(AdmissionError::EmptyPage));
        assert!(book.pages.is_empty());
    }

    #[test]
    fn rejection_message_is_readable() {
        let err = Book::new().add_page("", "", "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "a page needs at least a title or some content"
        );
    }

    #[test]
    fn whitespace_only_input_is_rejected() {
        let mut book = sample_book();
        let before = book.clone();
        assert!(book.add_page("   ", "\n\t", "pic.png").is_err());
        assert_eq!(book, before);
    }

    #[test]
    fn blank_title_gets_placeholder() {
        let mut book = Book::new();
        let page = book.add_page("", "Some text", "").unwrap();
        assert_eq!(page.title, "Untitled Page");
        assert_eq!(page.content, "Some text");
        assert_eq!(page.image, "");
    }

    #[test]
    fn custom_placeholder_is_used() {
        let mut book = Book::new();
        let page = book
            .add_page_with_placeholder("", "Text", "", "Unbenannte Seite")
            .unwrap();
        assert_eq!(page.title, "Unbenannte Seite");
    }

    #[test]
    fn inputs_are_trimmed() {
        let mut book = Book::new();
        let page = book.add_page("  Hi  ", "", " x.png ").unwrap();
        assert_eq!(page.title, "Hi");
        assert_eq!(page.content, "");
        assert_eq!(page.image, "x.png");
    }

    #[test]
    fn title_only_page_is_admitted() {
        let mut book = Book::new();
        book.add_page("Chapter One", "", "").unwrap();
        assert_eq!(book.pages.len(), 1);
        assert_eq!(book.pages[0].content, "");
    }

    #[test]
    fn pages_append_in_order() {
        let mut book = Book::new();
        book.add_page("One", "", "").unwrap();
        book.add_page("Two", "", "").unwrap();
        book.add_page("Three", "", "").unwrap();
        let titles: Vec<&str> = book.pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two", "Three"]);
    }

    #[test]
    fn inner_whitespace_in_content_survives() {
        let mut book = Book::new();
        let page = book.add_page("", "  line one\n\nline two  ", "").unwrap();
        assert_eq!(page.content, "line one\n\nline two");
    }

    #[test]
    fn title_and_author_are_stored_verbatim() {
        let mut book = Book::new();
        book.set_title("  Spaced  ");
        book.set_author("Ada");
        assert_eq!(book.title, "  Spaced  ");
        assert_eq!(book.author, "Ada");
    }

    #[test]
    fn clear_on_empty_book_needs_no_confirmation() {
        assert_eq!(Book::new().clear_request(), ClearRequest::NothingToClear);
    }

    #[test]
    fn clear_on_any_content_needs_confirmation() {
        let mut titled = Book::new();
        titled.set_title("T");
        assert_eq!(titled.clear_request(), ClearRequest::ConfirmationRequired);

        let mut authored = Book::new();
        authored.set_author("A");
        assert_eq!(authored.clear_request(), ClearRequest::ConfirmationRequired);

        assert_eq!(
            sample_book().clear_request(),
            ClearRequest::ConfirmationRequired
        );
    }

    #[test]
    fn reset_discards_everything() {
        let mut book = sample_book();
        book.reset();
        assert!(book.is_empty());
        assert_eq!(book, Book::default());
    }

    #[test]
    fn can_export_requires_a_page() {
        let mut book = Book::new();
        book.set_title("Only a title");
        assert!(!book.can_export());
        book.add_page("P", "", "").unwrap();
        assert!(book.can_export());
    }
}
