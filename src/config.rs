//! Builder configuration.
//!
//! Handles loading and validating `config.toml` from the working directory.
//! Stock defaults are the base layer; a user file only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! lang = "en"                 # <html lang> of the exported document
//!
//! [labels]
//! untitled_page = "Untitled Page"
//! default_title = "My Interactive Book"
//! default_author = "Unknown Author"
//! byline = "by"
//! page = "Page"
//! empty_state = "Add pages to see a preview..."
//! footer = "Created with the Interactive Book Builder"
//!
//! [colors]
//! background = "#f5f5dc"
//! paper = "#ffffff"
//! page = "#fafafa"
//! text = "#333333"
//! text_muted = "#666666"
//! accent = "#667eea"
//! accent_text = "#ffffff"
//! border = "#dddddd"
//!
//! [typography]
//! font_family = "Georgia, serif"
//! line_height = "1.8"
//!
//! [storage]
//! dir = ".book-builder"       # Store directory, relative to the working dir
//! slot = "bookData"           # Name of the auto-save slot
//!
//! [export]
//! default_filename = "my-book"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Builder configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Language tag written to the exported document.
    pub lang: String,
    /// Fixed text used by the preview and the exported document.
    pub labels: LabelsConfig,
    /// Palette of the exported document.
    pub colors: ColorConfig,
    /// Font settings of the exported document.
    pub typography: TypographyConfig,
    /// Where the auto-save snapshot lives.
    pub storage: StorageConfig,
    /// Export artifact naming.
    pub export: ExportConfig,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            labels: LabelsConfig::default(),
            colors: ColorConfig::default(),
            typography: TypographyConfig::default(),
            storage: StorageConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl BuilderConfig {
    /// Validate that required values are present and well-formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("lang", &self.lang),
            ("labels.untitled_page", &self.labels.untitled_page),
            ("storage.dir", &self.storage.dir),
            ("storage.slot", &self.storage.slot),
            ("export.default_filename", &self.export.default_filename),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.storage.slot.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "storage.slot must not contain path separators".into(),
            ));
        }
        self.validate_css_values()
    }

    /// Theme values are pasted into the `<style>` block unescaped, so they
    /// must stay single CSS values.
    fn validate_css_values(&self) -> Result<(), ConfigError> {
        let c = &self.colors;
        let t = &self.typography;
        let css_values = [
            ("colors.background", &c.background),
            ("colors.paper", &c.paper),
            ("colors.page", &c.page),
            ("colors.text", &c.text),
            ("colors.text_muted", &c.text_muted),
            ("colors.accent", &c.accent),
            ("colors.accent_text", &c.accent_text),
            ("colors.border", &c.border),
            ("typography.font_family", &t.font_family),
            ("typography.line_height", &t.line_height),
        ];
        for (key, value) in css_values {
            if let Some(bad) = value.chars().find(|ch| CSS_FORBIDDEN.contains(ch)) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single CSS value (found '{bad}')"
                )));
            }
        }
        Ok(())
    }
}

const CSS_FORBIDDEN: [char; 5] = ['<', '>', '{', '}', ';'];

/// Fixed text used in rendered output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    /// Title given to pages added without one.
    pub untitled_page: String,
    /// Exported heading when the book has no title.
    pub default_title: String,
    /// Exported author line when the book has no author.
    pub default_author: String,
    /// Word placed before the author name.
    pub byline: String,
    /// Word placed before each page number.
    pub page: String,
    /// Preview shown while the book has no pages.
    pub empty_state: String,
    /// Credit line at the bottom of the exported document.
    pub footer: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            untitled_page: crate::types::UNTITLED_PAGE.to_string(),
            default_title: crate::types::DEFAULT_TITLE.to_string(),
            default_author: crate::types::DEFAULT_AUTHOR.to_string(),
            byline: "by".to_string(),
            page: "Page".to_string(),
            empty_state: "Add pages to see a preview...".to_string(),
            footer: "Created with the Interactive Book Builder".to_string(),
        }
    }
}

/// Exported document palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Area around the book.
    pub background: String,
    /// The book container.
    pub paper: String,
    /// Individual page blocks.
    pub page: String,
    pub text: String,
    /// Author line and footer.
    pub text_muted: String,
    /// Title rule, page border, page number badge.
    pub accent: String,
    /// Text on the page number badge.
    pub accent_text: String,
    pub border: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#f5f5dc".to_string(),
            paper: "#ffffff".to_string(),
            page: "#fafafa".to_string(),
            text: "#333333".to_string(),
            text_muted: "#666666".to_string(),
            accent: "#667eea".to_string(),
            accent_text: "#ffffff".to_string(),
            border: "#dddddd".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypographyConfig {
    /// CSS `font-family` value.
    pub font_family: String,
    /// CSS `line-height` value.
    pub line_height: String,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            font_family: "Georgia, serif".to_string(),
            line_height: "1.8".to_string(),
        }
    }
}

/// Auto-save location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Store directory, relative to the working directory.
    pub dir: String,
    /// Slot name; the snapshot is written to `<dir>/<slot>.json`.
    pub slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: ".book-builder".to_string(),
            slot: "bookData".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// File stem used when the book has no title.
    pub default_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_filename: "my-book".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BuilderConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<BuilderConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BuilderConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<BuilderConfig, ConfigError> {
    resolve_config(load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Book Builder Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as config.toml in the directory you run book-builder from
# (or pass --dir). Unknown keys will cause an error.

# Language tag of the exported document (<html lang="...">).
lang = "en"

# ---------------------------------------------------------------------------
# Labels - fixed text in the preview and the exported document
# ---------------------------------------------------------------------------
[labels]
# Title given to a page added without one.
untitled_page = "Untitled Page"

# Used in the exported document when the book has no title / author.
default_title = "My Interactive Book"
default_author = "Unknown Author"

# "by <author>" and "Page <n>".
byline = "by"
page = "Page"

# Shown by `preview` while the book has no pages.
empty_state = "Add pages to see a preview..."

# Credit line at the bottom of the exported document.
footer = "Created with the Interactive Book Builder"

# ---------------------------------------------------------------------------
# Colors of the exported document
# ---------------------------------------------------------------------------
[colors]
background = "#f5f5dc"    # Around the book
paper = "#ffffff"         # Book container
page = "#fafafa"          # Page blocks
text = "#333333"
text_muted = "#666666"    # Author line, footer
accent = "#667eea"        # Title rule, page border, page number badge
accent_text = "#ffffff"   # Text on the page number badge
border = "#dddddd"

# ---------------------------------------------------------------------------
# Typography
# ---------------------------------------------------------------------------
[typography]
font_family = "Georgia, serif"
line_height = "1.8"

# ---------------------------------------------------------------------------
# Auto-save
# ---------------------------------------------------------------------------
[storage]
# Directory holding the snapshot, relative to the working directory.
dir = ".book-builder"

# Slot name. The snapshot is stored as <dir>/<slot>.json.
slot = "bookData"

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# File name (without .html) used when the book has no title.
default_filename = "my-book"
"##
}

/// Generate CSS custom properties from the color and typography config.
pub fn generate_theme_css(colors: &ColorConfig, typography: &TypographyConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-paper: {paper};
    --color-page: {page};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --color-accent-text: {accent_text};
    --color-border: {border};
    --font-family: {font_family};
    --line-height: {line_height};
}}"#,
        background = colors.background,
        paper = colors.paper,
        page = colors.page,
        text = colors.text,
        text_muted = colors.text_muted,
        accent = colors.accent,
        accent_text = colors.accent_text,
        border = colors.border,
        font_family = typography.font_family,
        line_height = typography.line_height,
    )
}
