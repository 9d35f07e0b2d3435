//! End-to-end sessions against an on-disk store.
//!
//! Each test plays several consecutive runs the way the CLI does: restore at
//! start, one or more edits, save on finish, then a fresh session on the same
//! directory.

use book_builder::config::BuilderConfig;
use book_builder::generate::{ExportFormat, GenerateError, export, generate_document};
use book_builder::persist::{self, FileStore, Store};
use book_builder::preview::render_preview;
use book_builder::session::{ClearOutcome, RestoreOutcome, Session};
use book_builder::types::Book;
use std::fs;
use tempfile::TempDir;

const SLOT: &str = "bookData";

fn open(tmp: &TempDir) -> Session<FileStore> {
    Session::new(FileStore::new(tmp.path().join(".book-builder")), SLOT)
}

#[test]
fn book_survives_across_sessions() {
    let tmp = TempDir::new().unwrap();

    let mut first = open(&tmp);
    assert_eq!(first.restore(|_| true), RestoreOutcome::NoSnapshot);
    first.set_title("The Lighthouse");
    first.set_author("Ada Keeper");
    first.add_page("Arrival", "The keeper climbed.", "").unwrap();
    let written = first.book().clone();
    assert!(first.finish().unwrap().saved);

    let mut second = open(&tmp);
    assert_eq!(second.restore(|_| true), RestoreOutcome::Restored);
    assert_eq!(second.book(), &written);
    second.add_page("", "A second page.", "storm.png").unwrap();
    second.finish().unwrap();

    let mut third = open(&tmp);
    third.restore(|_| true);
    let book = third.book();
    assert_eq!(book.pages.len(), 2);
    assert_eq!(book.pages[1].title, "Untitled Page");
    assert_eq!(book.pages[1].image, "storm.png");
}

#[test]
fn snapshot_file_is_plain_json_book() {
    let tmp = TempDir::new().unwrap();
    let mut session = open(&tmp);
    session.set_title("T");
    session.add_page("P", "C", "I").unwrap();
    session.finish().unwrap();

    let raw = fs::read_to_string(tmp.path().join(".book-builder/bookData.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "title": "T",
            "author": "",
            "pages": [{"title": "P", "content": "C", "image": "I"}]
        })
    );
}

#[test]
fn corrupt_snapshot_starts_empty_without_asking() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join(".book-builder");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("bookData.json"), "{\"title\": \"half").unwrap();

    let mut session = open(&tmp);
    let outcome = session.restore(|_| panic!("must not ask about an unreadable snapshot"));
    assert_eq!(outcome, RestoreOutcome::NoSnapshot);
    assert!(session.book().is_empty());
}

#[test]
fn clearing_does_not_erase_the_snapshot() {
    let tmp = TempDir::new().unwrap();
    let mut first = open(&tmp);
    first.set_title("Keep me");
    first.finish().unwrap();

    let mut second = open(&tmp);
    second.restore(|_| true);
    assert_eq!(second.clear(|| true), ClearOutcome::Cleared);
    // An empty book is never saved, so the previous snapshot remains
    assert!(!second.finish().unwrap().saved);

    let mut third = open(&tmp);
    assert_eq!(third.restore(|_| true), RestoreOutcome::Restored);
    assert_eq!(third.book().title, "Keep me");
}

#[test]
fn forgetting_removes_the_snapshot() {
    let tmp = TempDir::new().unwrap();
    let mut first = open(&tmp);
    first.set_title("Gone soon");
    let mut store = first.finish().unwrap().store;

    store.remove(SLOT).unwrap();

    let mut second = open(&tmp);
    assert_eq!(second.restore(|_| true), RestoreOutcome::NoSnapshot);
}

#[test]
fn restored_book_exports_identically_to_original() {
    let tmp = TempDir::new().unwrap();
    let config = BuilderConfig::default();

    let mut first = open(&tmp);
    first.set_title("Round <Trip>");
    first.add_page("One", "line 1\nline 2", "a.png").unwrap();
    let original_html = generate_document(first.book(), &config);
    first.finish().unwrap();

    let mut second = open(&tmp);
    second.restore(|_| true);
    assert_eq!(generate_document(second.book(), &config), original_html);

    let path = export(
        second.book(),
        &tmp.path().join("dist"),
        &config,
        ExportFormat::Html,
        |_| false,
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "Round -Trip-.html");
    assert_eq!(fs::read_to_string(path).unwrap(), original_html);
}

#[test]
fn re_export_in_later_session_needs_confirmation() {
    let tmp = TempDir::new().unwrap();
    let config = BuilderConfig::default();
    let dist = tmp.path().join("dist");

    let mut first = open(&tmp);
    first.set_title("Draft");
    first.add_page("One", "first version", "").unwrap();
    let path = export(first.book(), &dist, &config, ExportFormat::Html, |_| false).unwrap();
    let first_html = fs::read_to_string(&path).unwrap();
    first.finish().unwrap();

    let mut second = open(&tmp);
    second.restore(|_| true);
    second.add_page("Two", "second version", "").unwrap();

    let declined = export(second.book(), &dist, &config, ExportFormat::Html, |_| false);
    assert!(matches!(declined, Err(GenerateError::Exists(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), first_html);

    export(second.book(), &dist, &config, ExportFormat::Html, |_| true).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("second version"));
    second.finish().unwrap();
}

#[test]
fn preview_tracks_the_session_book() {
    let tmp = TempDir::new().unwrap();
    let config = BuilderConfig::default();
    let mut session = open(&tmp);

    let empty = render_preview(session.book(), &config.labels).into_string();
    assert!(empty.contains(&config.labels.empty_state));

    session.add_page("First", "", "").unwrap();
    let filled = render_preview(session.book(), &config.labels).into_string();
    assert!(!filled.contains(&config.labels.empty_state));
    assert!(filled.contains("First"));
}

#[test]
fn serialize_restore_roundtrip_matches_field_for_field() {
    let mut book = Book::default();
    book.set_title("Title");
    book.set_author("Author");
    book.add_page("A", "alpha", "").unwrap();
    book.add_page("", "beta", "b.jpg").unwrap();

    let mut store = persist::MemoryStore::new();
    persist::save(&book, &mut store, SLOT).unwrap();
    assert_eq!(persist::restore(&store, SLOT), Some(book));
}
