//! One authoring session: restore, edit, auto-save.
//!
//! A [`Session`] owns the book and the store for the lifetime of one run.
//! Front ends call its methods in response to user actions instead of
//! touching shared state:
//!
//! ```text
//! Session::new(store, slot)
//!   .restore(consent)   start: offer the saved book, replace the empty one on consent
//!   .set_title / .set_author / .add_page / .clear(confirm)
//!   .finish()           teardown: save if non-empty, hand the store back
//!   .conclude(result)   finish behind a command result, keeping its error
//! ```
//!
//! Questions to the user (restore the saved book? really clear?) are
//! closures, so the session never prints or reads anything itself.

use crate::book::{AdmissionError, ClearRequest};
use crate::persist::{self, PersistError, Store};
use crate::types::{Book, Page, UNTITLED_PAGE};
use tracing::{debug, error};

/// Result of the start-of-session restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing usable in the slot (missing or unparseable).
    NoSnapshot,
    /// The user accepted; the saved book replaced the empty one.
    Restored,
    /// The user declined; the book stays empty.
    Declined,
}

/// Result of a clear request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The book was already empty; nobody was asked.
    AlreadyEmpty,
    Cleared,
    /// The user did not confirm; the book is unchanged.
    Declined,
}

/// What teardown did.
#[derive(Debug)]
pub struct SessionEnd<S> {
    /// Whether a snapshot was written.
    pub saved: bool,
    pub store: S,
}

pub struct Session<S: Store> {
    book: Book,
    store: S,
    slot: String,
    untitled_page: String,
}

impl<S: Store> Session<S> {
    /// Start with an empty book.
    pub fn new(store: S, slot: &str) -> Self {
        Self {
            book: Book::default(),
            store,
            slot: slot.to_string(),
            untitled_page: UNTITLED_PAGE.to_string(),
        }
    }

    /// Use `title` for pages added without one.
    pub fn with_untitled_page(mut self, title: &str) -> Self {
        self.untitled_page = title.to_string();
        self
    }

    /// Offer the saved book, if any, and adopt it when `consent` agrees.
    ///
    /// `consent` sees the candidate book and is only called when one parsed.
    pub fn restore(&mut self, consent: impl FnOnce(&Book) -> bool) -> RestoreOutcome {
        let Some(saved) = persist::restore(&self.store, &self.slot) else {
            return RestoreOutcome::NoSnapshot;
        };
        if consent(&saved) {
            self.book = saved;
            debug!(slot = %self.slot, "restored saved book");
            RestoreOutcome::Restored
        } else {
            debug!(slot = %self.slot, "user declined saved book");
            RestoreOutcome::Declined
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn set_title(&mut self, title: &str) {
        self.book.set_title(title);
    }

    pub fn set_author(&mut self, author: &str) {
        self.book.set_author(author);
    }

    pub fn add_page(
        &mut self,
        title: &str,
        content: &str,
        image: &str,
    ) -> Result<&Page, AdmissionError> {
        self.book
            .add_page_with_placeholder(title, content, image, &self.untitled_page)
    }

    /// Reset the book, asking `confirm` first unless there is nothing to lose.
    pub fn clear(&mut self, confirm: impl FnOnce() -> bool) -> ClearOutcome {
        match self.book.clear_request() {
            ClearRequest::NothingToClear => ClearOutcome::AlreadyEmpty,
            ClearRequest::ConfirmationRequired => {
                if confirm() {
                    self.book.reset();
                    ClearOutcome::Cleared
                } else {
                    ClearOutcome::Declined
                }
            }
        }
    }

    /// End the session, saving the book if it holds anything.
    pub fn finish(mut self) -> Result<SessionEnd<S>, PersistError> {
        let saved = persist::save(&self.book, &mut self.store, &self.slot)?;
        Ok(SessionEnd {
            saved,
            store: self.store,
        })
    }

    /// Finish the session after a command produced `result`.
    ///
    /// The save runs whether or not the command failed. A command error is
    /// returned as is; a save failure behind it is logged, not substituted.
    pub fn conclude<T, E>(self, result: Result<T, E>) -> Result<T, E>
    where
        E: From<PersistError>,
    {
        match (result, self.finish()) {
            (Ok(value), Ok(_)) => Ok(value),
            (Ok(_), Err(save_err)) => Err(save_err.into()),
            (Err(e), Ok(_)) => Err(e),
            (Err(e), Err(save_err)) => {
                error!(error = %save_err, "auto-save failed");
                Err(e)
            }
        }
    }
}
