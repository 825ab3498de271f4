//! Configuration loaded from `makesite.toml`.
//!
//! The config file is optional. Without one, makesite behaves like the
//! classic single-file tool: it reads `template.tmpl` from the working
//! directory, aborts on the first failure, and echoes every rendered page.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! template = "template.tmpl"      # Page template (Tera syntax)
//! default_file = "first-post.txt" # Processed when neither --file nor --dir is given
//! on_error = "abort"              # "abort" or "continue" (directory mode)
//! echo_html = true                # Echo each rendered page to stdout
//! raw_html_filter = "html"        # Template filter that embeds raw HTML
//!
//! [markdown]
//! raw_html = true                 # Pass inline HTML through untouched
//! tables = false
//! strikethrough = false
//! footnotes = false
//! tasklists = false
//! smart_punctuation = false
//! ```
//!
//! Command-line flags (`--template`, `--keep-going`, `--quiet`) override the
//! file. Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "makesite.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// What the batch driver does when one document fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failing document; no summary is printed.
    #[default]
    Abort,
    /// Record the failure, process the remaining documents, report at the end.
    Continue,
}

/// Site configuration.
///
/// All fields have defaults. Config files need only the values they override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the page template.
    pub template: PathBuf,
    /// Source document used when no `--file`/`--dir` is given.
    pub default_file: PathBuf,
    /// Batch behavior on per-document failure.
    pub on_error: FailurePolicy,
    /// Echo each rendered page to the preview stream.
    pub echo_html: bool,
    /// Name of the template filter that marks a value as raw HTML.
    /// Empty string disables the filter.
    pub raw_html_filter: String,
    /// Markdown conversion settings.
    pub markdown: MarkdownOptions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("template.tmpl"),
            default_file: PathBuf::from("first-post.txt"),
            on_error: FailurePolicy::Abort,
            echo_html: true,
            raw_html_filter: "html".to_string(),
            markdown: MarkdownOptions::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.template.as_os_str().is_empty() {
            return Err(ConfigError::Validation("template must not be empty".into()));
        }
        if self.default_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "default_file must not be empty".into(),
            ));
        }
        if !self.raw_html_filter.is_empty() && !is_identifier(&self.raw_html_filter) {
            return Err(ConfigError::Validation(format!(
                "raw_html_filter must be an identifier, got {:?}",
                self.raw_html_filter
            )));
        }
        Ok(())
    }

    /// The raw-HTML filter name, if enabled.
    pub fn raw_html_filter(&self) -> Option<&str> {
        (!self.raw_html_filter.is_empty()).then_some(self.raw_html_filter.as_str())
    }
}

/// Markdown conversion settings.
///
/// The defaults are plain CommonMark with raw HTML passthrough.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownOptions {
    /// Emit inline and block HTML verbatim. When false it is escaped as text.
    pub raw_html: bool,
    pub tables: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
    pub tasklists: bool,
    /// Curly quotes, en/em dashes and ellipses.
    pub smart_punctuation: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            raw_html: true,
            tables: false,
            strikethrough: false,
            footnotes: false,
            tasklists: false,
            smart_punctuation: false,
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Load config from `path`.
///
/// A missing file yields the defaults. A present file is parsed and validated.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate a config document.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// A documented config file with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r##"# makesite configuration
# All options are optional. Values shown are the defaults.

# Page template, Tera syntax. Available variables:
#   TextFilePath, TextFileName, HTMLPagePath, Content, Title, IsMarkdown
template = "template.tmpl"

# Processed when neither --file nor --dir is given.
default_file = "first-post.txt"

# Directory mode: what to do when one document fails.
#   "abort"    - stop at the first failure (no summary)
#   "continue" - keep going, list the failures at the end, exit non-zero
on_error = "abort"

# Echo each rendered page to stdout before writing it.
echo_html = true

# Template filter that embeds an already-rendered value as raw HTML,
# e.g. {{ Content | html }}. Set to "" to disable.
raw_html_filter = "html"

[markdown]
# Pass inline and block HTML through untouched.
raw_html = true
# Extensions beyond CommonMark.
tables = false
strikethrough = false
footnotes = false
tasklists = false
smart_punctuation = false
"##
}
