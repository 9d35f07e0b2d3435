//! Auto-save and restore of the book.
//!
//! The book is kept between sessions as one JSON snapshot in a single named
//! slot of a key-value [`Store`]:
//!
//! ```json
//! {"title": "...", "author": "...", "pages": [{"title": "...", "content": "...", "image": "..."}]}
//! ```
//!
//! # Rules
//!
//! - [`save`] writes only when the book is non-empty (a title, an author, or
//!   at least one page). An empty book leaves whatever the slot held.
//! - [`restore`] never fails loudly. A missing slot is `None`; a slot that
//!   does not parse as a book (malformed JSON, missing or extra fields, arrays
//!   where objects belong) is
//!   logged at `warn` and also `None`.
//! - There is no format version. A snapshot either has the book shape or is
//!   discarded.
//!
//! # Stores
//!
//! [`FileStore`] keeps each slot as `<dir>/<slot>.json`. [`MemoryStore`] keeps
//! slots in a map and backs the tests.

use crate::types::Book;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot is not a book: {0}")]
    Shape(String),
}

/// A string-valued key-value store with named slots.
pub trait Store {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Write a slot, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Delete a slot. Removing a missing slot is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

/// Slots stored as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.slot_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with one slot already written.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.to_string(), value.to_string());
        store
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// Serialize a full snapshot of the book.
pub fn serialize(book: &Book) -> Result<String, PersistError> {
    Ok(serde_json::to_string(book)?)
}

/// Parse a snapshot. Any shape other than a book is an error.
///
/// The book and each page must be JSON objects. serde's derived struct
/// deserializers would also take positional arrays, so the shape is checked
/// on the raw value first.
pub fn deserialize(snapshot: &str) -> Result<Book, PersistError> {
    let value: serde_json::Value = serde_json::from_str(snapshot)?;
    check_shape(&value)?;
    Ok(serde_json::from_value(value)?)
}

fn check_shape(value: &serde_json::Value) -> Result<(), PersistError> {
    let Some(book) = value.as_object() else {
        return Err(PersistError::Shape("expected an object at the root".into()));
    };
    if let Some(pages) = book.get("pages").and_then(|p| p.as_array()) {
        if let Some(idx) = pages.iter().position(|p| !p.is_object()) {
            return Err(PersistError::Shape(format!("pages[{idx}] is not an object")));
        }
    }
    Ok(())
}

/// Write the book to `slot` if it holds anything.
///
/// Returns whether a snapshot was written.
pub fn save(book: &Book, store: &mut impl Store, slot: &str) -> Result<bool, PersistError> {
    if book.is_empty() {
        debug!(slot, "book is empty, skipping save");
        return Ok(false);
    }
    store.set(slot, &serialize(book)?)?;
    debug!(slot, pages = book.pages.len(), "saved book");
    Ok(true)
}

/// Read the book stored in `slot`, if there is a readable one.
pub fn restore(store: &impl Store, slot: &str) -> Option<Book> {
    let snapshot = match store.get(slot) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => return None,
        Err(e) => {
            warn!(slot, "could not read saved book: {e}");
            return None;
        }
    };
    match deserialize(&snapshot) {
        Ok(book) => {
            debug!(slot, pages = book.pages.len(), "found saved book");
            Some(book)
        }
        Err(e) => {
            warn!(slot, "discarding saved book that does not parse: {e}");
            None
        }
    }
}
