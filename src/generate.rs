//! The single-document pipeline.
//!
//! ```text
//! read source → classify → extract title → render content → assemble Page
//!             → render template → preview stream
//!             → render template → <source>.html
//! ```
//!
//! A [`Generator`] owns everything that is loaded once per run (the template
//! and the renderers) and processes one document per call to
//! [`Generator::generate_page`]. Nothing carries over between documents.
//!
//! Both template renders happen before the output file is created, so a
//! template failure never leaves a partial or empty `.html` behind.

use crate::config::SiteConfig;
use crate::metadata;
use crate::naming::ContentKind;
use crate::output;
use crate::render::{RenderError, Renderers};
use crate::template::{TemplateEngine, TemplateError, TemplateOptions};
use crate::types::Page;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Cannot read source {path}: {source}")]
    SourceRead { path: PathBuf, source: io::Error },
    #[error("Cannot render {path}: {source}")]
    Render { path: PathBuf, source: RenderError },
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("Cannot write {path}: {source}")]
    OutputWrite { path: PathBuf, source: io::Error },
    #[error("Refusing to overwrite source {0} with its own output")]
    OutputIsSource(PathBuf),
    #[error("Output {path} is already produced by {other}")]
    OutputCollision { path: PathBuf, other: PathBuf },
    #[error("Cannot write preview: {0}")]
    Preview(io::Error),
}

/// Result of one processed document.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub kind: ContentKind,
    pub source: PathBuf,
    pub output: PathBuf,
    pub bytes: usize,
}

/// Per-run state: the loaded template and the content renderers.
#[derive(Debug)]
pub struct Generator {
    engine: TemplateEngine,
    renderers: Renderers,
    echo_html: bool,
}

impl Generator {
    pub fn new(engine: TemplateEngine, renderers: Renderers, echo_html: bool) -> Self {
        Self {
            engine,
            renderers,
            echo_html,
        }
    }

    /// Load the template named in `config` and set up renderers from it.
    pub fn from_config(config: &SiteConfig) -> Result<Self, TemplateError> {
        let options = TemplateOptions {
            raw_html_filter: config.raw_html_filter().map(str::to_string),
        };
        let engine = TemplateEngine::load(&config.template, &options)?;
        Ok(Self::new(
            engine,
            Renderers::new(&config.markdown),
            config.echo_html,
        ))
    }

    /// Read and assemble the page for `source` without rendering the template.
    pub fn build_page(&self, source: &Path) -> Result<Page, GenerateError> {
        let text = read_source(source)?;
        let kind = ContentKind::from_path(source);
        tracing::debug!(source = %source.display(), %kind, "Classified source");

        let title = metadata::extract_title(&text, kind);
        let content =
            self.renderers
                .render(kind, &text)
                .map_err(|source_err| GenerateError::Render {
                    path: source.to_path_buf(),
                    source: source_err,
                })?;

        Ok(Page::assemble(source, kind, title, content))
    }

    /// Run the full pipeline for one document.
    ///
    /// The rendered page goes to `preview` (when echo is on) and to the
    /// output file next to the source, replacing any existing file.
    pub fn generate_page(
        &self,
        source: &Path,
        preview: &mut dyn Write,
    ) -> Result<GeneratedPage, GenerateError> {
        let page = self.build_page(source)?;
        let output_path = page.output_path().to_path_buf();
        if output_path == source {
            return Err(GenerateError::OutputIsSource(output_path));
        }

        let preview_html = self.engine.render(&page)?;
        let file_html = self.engine.render(&page)?;

        if self.echo_html {
            write_preview(preview, &preview_html).map_err(GenerateError::Preview)?;
        }

        write_output(&output_path, &file_html).map_err(|e| GenerateError::OutputWrite {
            path: output_path.clone(),
            source: e,
        })?;

        writeln!(preview, "{}", output::format_written(&output_path))
            .map_err(GenerateError::Preview)?;
        tracing::info!(
            source = %source.display(),
            output = %output_path.display(),
            title = %page.title,
            "Generated page"
        );

        Ok(GeneratedPage {
            kind: page.kind,
            source: source.to_path_buf(),
            output: output_path,
            bytes: file_html.len(),
        })
    }
}

/// Read a source document as text.
///
/// Invalid UTF-8 is replaced rather than rejected; a warning is logged.
fn read_source(path: &Path) -> Result<String, GenerateError> {
    let bytes = fs::read(path).map_err(|e| GenerateError::SourceRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!(source = %path.display(), "Source is not valid UTF-8, replacing invalid bytes");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

fn write_preview(preview: &mut dyn Write, html: &str) -> io::Result<()> {
    writeln!(preview, "{}", output::PREVIEW_HEADER)?;
    preview.write_all(html.as_bytes())?;
    writeln!(preview)?;
    preview.flush()
}

fn write_output(path: &Path, html: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(html.as_bytes())?;
    file.flush()
}
