//! Converter configuration.
//!
//! Handles loading, validating, and merging the optional `docx-site.toml`
//! in the root directory. Stock defaults reproduce the classic output: 20pt
//! of left indent per blockquote level, headings clamped at `<h6>`, and the
//! Chinese page chrome of the classic pages.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [render]
//! indent_unit = 20.0           # Points of left indent per <blockquote> level
//! heading_overflow = "clamp"   # "clamp" levels 7-9 to <h6>, or "passthrough"
//! escape_text = true           # false writes paragraph text as raw markup
//!
//! [page]
//! lang = "zh-CN"
//! toc_title = "文档目录"
//! footer_text = "已经到底啦"
//!
//! [index]
//! root_title = "Root Directory"
//! title_suffix = " - 索引"
//! count_label = "共 {count} 个项目"
//!
//! [scan]
//! extension = "docx"           # Matched case-insensitively
//! lock_prefix = "~$"           # Word lock files are skipped
//!
//! [processing]
//! max_processes = 4            # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the config file looked up in the root directory.
pub const CONFIG_FILE: &str = "docx-site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Converter configuration loaded from `docx-site.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// How paragraphs become HTML.
    pub render: RenderConfig,
    /// Chrome of the generated document pages.
    pub page: PageConfig,
    /// Directory index pages.
    pub index: IndexConfig,
    /// Which files are picked up as source documents.
    pub scan: ScanConfig,
    /// Parallel conversion settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.render.indent_unit.is_finite() && self.render.indent_unit > 0.0) {
            return Err(ConfigError::Validation(
                "render.indent_unit must be a positive number".into(),
            ));
        }
        if self.scan.extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Validation(
                "scan.extension must not be empty".into(),
            ));
        }
        if !self.index.count_label.contains("{count}") {
            return Err(ConfigError::Validation(
                "index.count_label must contain {count}".into(),
            ));
        }
        Ok(())
    }
}

/// What to do with headings deeper than HTML's `<h6>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingOverflow {
    /// Render levels 7-9 as `<h6>`.
    #[default]
    Clamp,
    /// Emit `<h7>`..`<h9>` as resolved.
    Passthrough,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Points of left indent per blockquote nesting level.
    pub indent_unit: f64,
    pub heading_overflow: HeadingOverflow,
    /// Escape `<`, `>` and `&` in paragraph text.
    pub escape_text: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_unit: 20.0,
            heading_overflow: HeadingOverflow::Clamp,
            escape_text: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// `lang` attribute of the `<html>` element.
    pub lang: String,
    /// Heading above the table of contents sidebar.
    pub toc_title: String,
    pub footer_text: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            lang: "zh-CN".to_string(),
            toc_title: "文档目录".to_string(),
            footer_text: "已经到底啦".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Display name of the root directory's index.
    pub root_title: String,
    /// Appended to the directory name in the `<title>`.
    pub title_suffix: String,
    /// Item count line; `{count}` is replaced with the number of entries.
    pub count_label: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            root_title: "Root Directory".to_string(),
            title_suffix: " - 索引".to_string(),
            count_label: "共 {count} 个项目".to_string(),
        }
    }
}

impl IndexConfig {
    pub fn count_text(&self, count: usize) -> String {
        self.count_label.replace("{count}", &count.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Source document extension, without the dot.
    pub extension: String,
    /// File names starting with this are editor lock files.
    pub lock_prefix: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "docx".to_string(),
            lock_prefix: "~$".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel conversion workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config: {e}")))
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

/// Load `docx-site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config for a root directory, falling back to stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(root)?;
    if overlay.is_some() {
        log::debug!("loaded {}", root.join(CONFIG_FILE).display());
    }
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock `docx-site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docx-site configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file in the root
# directory as docx-site.toml. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Rendering
# ---------------------------------------------------------------------------
[render]
# Points of left indent per <blockquote> nesting level. A paragraph indented
# 45pt with the default unit is wrapped in two blockquotes.
indent_unit = 20.0

# Outline levels go down to 9 but HTML stops at <h6>.
# "clamp" renders levels 7-9 as <h6>; "passthrough" writes <h7>..<h9>.
heading_overflow = "clamp"

# Escape <, > and & in paragraph text. Set to false to write text as raw
# markup, the way older versions of this tool did.
escape_text = true

# ---------------------------------------------------------------------------
# Document pages
# ---------------------------------------------------------------------------
[page]
lang = "zh-CN"
toc_title = "文档目录"
footer_text = "已经到底啦"

# ---------------------------------------------------------------------------
# Directory index pages
# ---------------------------------------------------------------------------
[index]
# Display name used for the root directory.
root_title = "Root Directory"
# Appended to the directory name in the page <title>.
title_suffix = " - 索引"
# Item count line. {count} is replaced with the number of entries.
count_label = "共 {count} 个项目"

# ---------------------------------------------------------------------------
# Source discovery
# ---------------------------------------------------------------------------
[scan]
# Source document extension, matched case-insensitively.
extension = "docx"
# Files whose names start with this prefix are editor lock files.
lock_prefix = "~$"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel conversion workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
