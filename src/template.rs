//! Page template loading and rendering.
//!
//! The template is a single [Tera](https://keats.github.io/tera/) file,
//! `template.tmpl` by default, loaded once per run. Pages are bound under the
//! names in [`Page`]'s serialization:
//!
//! ```text
//! <title>{{ Title }}</title>
//! {% if IsMarkdown %}{{ Content | html }}{% else %}<pre>{{ Content }}</pre>{% endif %}
//! ```
//!
//! ## Escaping
//!
//! Autoescaping is on for every template whatever its file suffix, so plain
//! text is always HTML-escaped. Markdown output is already HTML and must not
//! be escaped again; templates pipe it through the raw-HTML filter. That
//! filter only exists when [`TemplateOptions::raw_html_filter`] names it. It
//! is a capability granted at construction, not a global registration.
//!
//! Tera's escaper also rewrites `/` as `&#x2F;`, so a path field renders as
//! `posts&#x2F;hello.md`. Browsers show it as `posts/hello.md`. The stock
//! template prints only the last path segment (`split(pat="/") | last`).

use crate::types::Page;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tera::{Context, Filter, Tera, Value};
use thiserror::Error;

/// The stock template, printed by `makesite gen-template`.
pub const STOCK_TEMPLATE: &str = include_str!("../static/template.tmpl");

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to load template {path}: {detail}")]
    Load { path: PathBuf, detail: String },
    #[error("Failed to render template {name} for {page}: {detail}")]
    Render {
        name: String,
        page: String,
        detail: String,
    },
}

/// Options fixed when the engine is built.
#[derive(Debug, Clone)]
pub struct TemplateOptions {
    /// Register a filter under this name that embeds its value as raw HTML.
    pub raw_html_filter: Option<String>,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            raw_html_filter: Some("html".to_string()),
        }
    }
}

/// Marks a value as safe, pre-rendered HTML.
///
/// Non-string values are formatted with their JSON display (`true`, `3`).
#[derive(Debug, Clone, Copy)]
pub struct RawHtml;

impl Filter for RawHtml {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(match value {
            Value::String(_) => value.clone(),
            other => Value::String(other.to_string()),
        })
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// A loaded page template.
#[derive(Debug)]
pub struct TemplateEngine {
    tera: Tera,
    name: String,
}

impl TemplateEngine {
    /// Load the template file at `path`.
    pub fn load(path: &Path, options: &TemplateOptions) -> Result<Self, TemplateError> {
        let name = template_name(path);
        let mut tera = new_tera(options);
        tera.add_template_file(path, Some(name.as_str()))
            .map_err(|e| TemplateError::Load {
                path: path.to_path_buf(),
                detail: error_chain(&e),
            })?;
        tracing::debug!(template = %path.display(), %name, "Loaded template");
        Ok(Self { tera, name })
    }

    /// Build an engine from template source held in memory.
    pub fn from_source(
        name: &str,
        source: &str,
        options: &TemplateOptions,
    ) -> Result<Self, TemplateError> {
        let mut tera = new_tera(options);
        tera.add_raw_template(name, source)
            .map_err(|e| TemplateError::Load {
                path: PathBuf::from(name),
                detail: error_chain(&e),
            })?;
        Ok(Self {
            tera,
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render `page` to a string.
    ///
    /// Deterministic: the same page always yields the same bytes, so the
    /// preview and the written file match.
    pub fn render(&self, page: &Page) -> Result<String, TemplateError> {
        let render_error = |e: tera::Error| TemplateError::Render {
            name: self.name.clone(),
            page: page.source_path.clone(),
            detail: error_chain(&e),
        };
        let context = Context::from_serialize(page).map_err(render_error)?;
        self.tera.render(&self.name, &context).map_err(render_error)
    }
}

fn new_tera(options: &TemplateOptions) -> Tera {
    let mut tera = Tera::default();
    // Every name ends with "", so every template is escaped.
    tera.autoescape_on(vec![""]);
    if let Some(filter) = &options.raw_html_filter {
        tera.register_filter(filter, RawHtml);
    }
    tera
}

fn template_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Tera keeps the useful part of an error (line, column, missing variable)
/// in its source chain, so flatten the whole chain into one message.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(err) = source {
        parts.push(err.to_string());
        source = err.source();
    }
    parts.join(": ")
}
