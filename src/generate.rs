//! Standalone HTML document generation.
//!
//! Turns a [`Book`] into one self-contained HTML file: doctype, a head with
//! the stylesheet embedded, and a body with the title, author line, one block
//! per page and a footer credit. Nothing is fetched at view time except page
//! images the author pointed at.
//!
//! ## Document Structure
//!
//! ```text
//! div.book-container
//! ├── h1.book-title        title, or labels.default_title
//! ├── div.book-author      "by <author>", or labels.default_author
//! ├── div.page             one per page, in order
//! │   ├── div.page-number  "Page <n>"
//! │   ├── h2               page title
//! │   ├── div.content      page content (white-space: pre-wrap)
//! │   └── img              only when the page has an image
//! └── footer.book-footer   labels.footer
//! ```
//!
//! ## Determinism
//!
//! The output is a pure function of the book and the config: no timestamps,
//! no random ids. Exporting the same book twice yields byte-identical files.
//!
//! ## CSS
//!
//! `static/book.css` is embedded at compile time. Colors and fonts are CSS
//! custom properties generated from config and prepended to it.
//!
//! ## Markdown
//!
//! [`generate_markdown`] writes the same book as a plain Markdown file: the
//! title as `#`, an italic author line, then one `##` section per page
//! separated by rules. Text is written as entered.
//!
//! ## Overwrites
//!
//! [`export`] never replaces an existing file silently. When the target
//! exists, the caller's confirmation decides; a refusal is
//! [`GenerateError::Exists`] and the old file stays untouched.

use crate::config::{self, BuilderConfig};
use crate::escape::Escaped;
use crate::types::Book;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("nothing to export: add at least one page first")]
    NothingToExport,
    #[error("{} already exists, not overwritten", .0.display())]
    Exists(PathBuf),
}

/// File format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Standalone HTML document with embedded styles.
    #[default]
    Html,
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "md",
        }
    }
}

const CSS_STATIC: &str = include_str!("../static/book.css");

/// Render the complete document for a book.
pub fn generate_document(book: &Book, config: &BuilderConfig) -> String {
    render_document(book, config).into_string()
}

/// The full stylesheet: config-driven variables followed by the static rules.
pub fn document_css(config: &BuilderConfig) -> String {
    let theme_css = config::generate_theme_css(&config.colors, &config.typography);
    format!("{}\n\n{}", theme_css, CSS_STATIC)
}

fn render_document(book: &Book, config: &BuilderConfig) -> Markup {
    let labels = &config.labels;
    let title = or_default(&book.title, &labels.default_title);
    let author = or_default(&book.author, &labels.default_author);
    let css = document_css(config);

    html! {
        (DOCTYPE)
        html lang=(config.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (Escaped(title)) }
                style { (PreEscaped(css)) }
            }
            body {
                div.book-container {
                    h1.book-title { (Escaped(title)) }
                    div.book-author { (labels.byline) " " (Escaped(author)) }
                    @for (idx, page) in book.pages.iter().enumerate() {
                        div.page {
                            div.page-number { (labels.page) " " (idx + 1) }
                            h2 { (Escaped(&page.title)) }
                            div.content { (Escaped(&page.content)) }
                            @if page.has_image() {
                                img src=(Escaped(&page.image)) alt=(Escaped(&page.title));
                            }
                        }
                    }
                    footer.book-footer {
                        small { (labels.footer) }
                    }
                }
            }
        }
    }
}

/// Render the book as Markdown.
pub fn generate_markdown(book: &Book, config: &BuilderConfig) -> String {
    let labels = &config.labels;
    let title = or_default(&book.title, &labels.default_title);
    let author = or_default(&book.author, &labels.default_author);

    let mut md = format!("# {}\n\n*{} {}*\n\n---\n\n", title, labels.byline, author);
    for page in &book.pages {
        md.push_str(&format!("## {}\n\n", page.title));
        if !page.content.is_empty() {
            md.push_str(&format!("{}\n\n", page.content));
        }
        if page.has_image() {
            md.push_str(&format!("![{}]({})\n\n", page.title, page.image));
        }
        md.push_str("---\n\n");
    }
    md
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

/// File name of the export artifact: `<title>.<ext>`, or the configured
/// default stem when the book has no title.
///
/// Characters that would leave the output directory or are not portable in
/// file names are replaced with `-`.
pub fn export_filename(book: &Book, config: &BuilderConfig, format: ExportFormat) -> String {
    let stem = or_default(&book.title, &config.export.default_filename);
    let safe: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    format!("{}.{}", safe, format.extension())
}

/// Write the book into `output_dir` in the given format, creating the
/// directory if needed.
///
/// Returns the path of the written file. A book without pages has nothing
/// to export and is refused. If the target file already exists,
/// `confirm_overwrite` is asked with its path; `false` leaves it in place
/// and returns [`GenerateError::Exists`].
pub fn export(
    book: &Book,
    output_dir: &Path,
    config: &BuilderConfig,
    format: ExportFormat,
    confirm_overwrite: impl FnOnce(&Path) -> bool,
) -> Result<PathBuf, GenerateError> {
    if !book.can_export() {
        return Err(GenerateError::NothingToExport);
    }
    let path = output_dir.join(export_filename(book, config, format));
    if path.exists() && !confirm_overwrite(&path) {
        return Err(GenerateError::Exists(path));
    }
    fs::create_dir_all(output_dir)?;
    let document = match format {
        ExportFormat::Html => generate_document(book, config),
        ExportFormat::Markdown => generate_markdown(book, config),
    };
    fs::write(&path, &document)?;
    debug!(path = %path.display(), ?format, bytes = document.len(), "exported book");
    Ok(path)
}
