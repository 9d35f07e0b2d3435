//! # Book Builder
//!
//! Assemble a simple multi-page book (title, author, pages with a title,
//! content and an optional image) and export it as one self-contained HTML
//! document. Work in progress is auto-saved between runs and offered back on
//! the next start.
//!
//! # Architecture
//!
//! Everything revolves around one owned [`Book`](types::Book) value. The
//! renderers are pure functions of it; the session is the only thing that
//! mutates it or talks to storage:
//!
//! ```text
//!            restore (with consent)               save (if non-empty)
//!   store ───────────────────────────► Session ───────────────────────► store
//!                                         │
//!                      title / author / add-page / clear (with confirmation)
//!                                         │
//!                                        Book
//!                                    ┌────┴─────┐
//!                              render_preview  generate_document / generate_markdown
//!                               (fragment)      (standalone .html / .md)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Book` and `Page`, the shapes stored in the auto-save slot |
//! | [`book`] | Page admission, title/author updates, the clear protocol |
//! | [`escape`] | HTML escaping for all user text, plus a maud `Render` adapter |
//! | [`preview`] | Abbreviated HTML fragment for on-screen preview |
//! | [`generate`] | Standalone HTML document, Markdown, export to disk |
//! | [`persist`] | `Store` trait, file and memory stores, snapshot save/restore |
//! | [`session`] | One run: restore with consent, edits, save on finish |
//! | [`config`] | `config.toml` loading, validation, stock config, theme CSS |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Questions Are Return Values
//!
//! Rejections and confirmations are types, not dialogs. Page admission returns
//! [`AdmissionError::EmptyPage`](book::AdmissionError::EmptyPage); clearing
//! reports [`ClearRequest::ConfirmationRequired`](book::ClearRequest) before
//! anything is lost. The front end decides how to ask.
//!
//! ## Explicit Escaping
//!
//! All user text goes through [`escape::escape_html`], which maps the five
//! HTML metacharacters to entities. Templates use it through
//! [`escape::Escaped`], so the preview and the exported document escape
//! identically.
//!
//! ## Deterministic Output
//!
//! The exported document is a pure function of the book and config. No
//! timestamps, no generated ids: the same book always exports to the same
//! bytes.

pub mod book;
pub mod config;
pub mod escape;
pub mod generate;
pub mod output;
pub mod persist;
pub mod preview;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
