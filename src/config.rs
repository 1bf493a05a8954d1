//! Generator configuration.
//!
//! Handles loading, validating, and merging `vmdoc.toml`. Stock defaults are
//! overridden by an optional `vmdoc.toml` in the docs root, and CLI flags are
//! applied on top of the result by the binary.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [tags]
//! start = "[vmdoc:start]"
//! end = "[vmdoc:end]"
//! description_start = "[vmdoc:description]"
//! description_end = "[vmdoc:enddescription]"
//! skip_line = "[vmdoc:skip_line]"
//!
//! [output]
//! dir = "vmdoc"                 # Under <docs>/docs/
//! overview_page = "vmdocs.md"
//! nav_section = "files"
//! nav_mode = "overview"         # "overview" or "section"
//!
//! [patterns]
//! # rules = """..."""           # Replaces the default include/exclude set
//!
//! [site]
//! name = "My Docs"
//! generator = "mkdocs"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the config file looked up in the docs root.
pub const CONFIG_FILENAME: &str = "vmdoc.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Complete generator configuration, passed explicitly to every component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VmdocConfig {
    /// Marker strings recognized in source files.
    pub tags: TagsConfig,
    /// Where and how generated pages are written.
    pub output: OutputConfig,
    /// Include/exclude rules for the source scan.
    pub patterns: PatternsConfig,
    /// External site generator settings.
    pub site: SiteConfig,
}

impl VmdocConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tags;
        for (name, value) in [
            ("tags.start", &t.start),
            ("tags.end", &t.end),
            ("tags.description_start", &t.description_start),
            ("tags.description_end", &t.description_end),
            ("tags.skip_line", &t.skip_line),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }
        if t.start == t.end {
            return Err(ConfigError::Validation(
                "tags.start and tags.end must differ".into(),
            ));
        }
        if t.description_start == t.description_end {
            return Err(ConfigError::Validation(
                "tags.description_start and tags.description_end must differ".into(),
            ));
        }

        let mut components = Path::new(&self.output.dir).components();
        let single_normal = matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none();
        if !single_normal {
            return Err(ConfigError::Validation(
                "output.dir must be a single relative directory name".into(),
            ));
        }
        if !self.output.overview_page.ends_with(".md") || self.output.overview_page.contains('/')
        {
            return Err(ConfigError::Validation(
                "output.overview_page must be a .md file name".into(),
            ));
        }
        if self.output.nav_section.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.nav_section must not be empty".into(),
            ));
        }
        if self.site.generator.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.generator must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Marker strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    pub start: String,
    pub end: String,
    pub description_start: String,
    pub description_end: String,
    /// Lines of extracted body text containing this marker are dropped.
    pub skip_line: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            start: "[vmdoc:start]".to_string(),
            end: "[vmdoc:end]".to_string(),
            description_start: "[vmdoc:description]".to_string(),
            description_end: "[vmdoc:enddescription]".to_string(),
            skip_line: "[vmdoc:skip_line]".to_string(),
        }
    }
}

/// How the generated pages are surfaced in the site navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavMode {
    /// Drop the generated nav section; the overview page is the entry point.
    #[default]
    Overview,
    /// Replace the generated nav section with one entry per documented file.
    Section,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory under `<docs>/docs/` receiving generated pages.
    pub dir: String,
    /// File name of the flat overview page inside `dir`.
    pub overview_page: String,
    /// Name of the managed `nav` section in `mkdocs.yml`.
    pub nav_section: String,
    pub nav_mode: NavMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "vmdoc".to_string(),
            overview_page: "vmdocs.md".to_string(),
            nav_section: "files".to_string(),
            nav_mode: NavMode::Overview,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternsConfig {
    /// Gitignore-style rules. `None` uses [`crate::matcher::DEFAULT_PATTERNS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
}

impl PatternsConfig {
    pub fn effective(&self) -> &str {
        self.rules
            .as_deref()
            .unwrap_or(crate::matcher::DEFAULT_PATTERNS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// `site_name` written into a freshly scaffolded `mkdocs.yml`.
    pub name: String,
    /// Executable of the external static site generator.
    pub generator: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "My Docs".to_string(),
            generator: "mkdocs".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(VmdocConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
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

/// Load `vmdoc.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
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
) -> Result<VmdocConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: VmdocConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `vmdoc.toml` in the docs root, falling back to defaults.
pub fn load_config(docs_root: &Path) -> Result<VmdocConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(docs_root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `vmdoc.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# vmdoc configuration
# ===================
# All settings are optional. Values shown below are the defaults.
# Place this file in the docs root, next to mkdocs.yml.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Tags recognized inside source files
# ---------------------------------------------------------------------------
[tags]
# Everything between start and end becomes the page body.
start = "[vmdoc:start]"
end = "[vmdoc:end]"

# Everything between these becomes the page description.
description_start = "[vmdoc:description]"
description_end = "[vmdoc:enddescription]"

# Body lines containing this marker are dropped from the page.
skip_line = "[vmdoc:skip_line]"

# ---------------------------------------------------------------------------
# Generated output
# ---------------------------------------------------------------------------
[output]
# Directory under <docs>/docs/ receiving the generated pages.
dir = "vmdoc"

# Flat listing of every documented file, regenerated on each run.
overview_page = "vmdocs.md"

# Name of the nav section managed in mkdocs.yml.
nav_section = "files"

# "overview": remove the managed nav section, link only the overview page.
# "section":  rewrite the managed nav section with one entry per file.
nav_mode = "overview"

# ---------------------------------------------------------------------------
# Source selection (gitignore syntax, last matching rule wins)
# ---------------------------------------------------------------------------
[patterns]
# rules = """
# *
# !*.py
# !*.rs
# target/
# """

# ---------------------------------------------------------------------------
# External site generator
# ---------------------------------------------------------------------------
[site]
# site_name used when a new docs project is scaffolded.
name = "My Docs"

# Executable invoked for build and serve.
generator = "mkdocs"
"##
}
