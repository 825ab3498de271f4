//! Content renderers: document body → HTML fragment.
//!
//! The [`ContentRenderer`] trait has one implementation per [`ContentKind`]:
//!
//! | Kind       | Renderer              | Output |
//! |------------|-----------------------|--------|
//! | plain text | [`PlainTextRenderer`] | the text, unchanged |
//! | markdown   | [`MarkdownRenderer`]  | pulldown-cmark HTML |
//!
//! [`Renderers`] holds both and picks one by kind, so dispatch is total.
//!
//! Plain text is deliberately not escaped here. The template engine escapes
//! every value unless the template asks for the raw-HTML filter, so escaping
//! happens exactly once, at render time.

use crate::config::MarkdownOptions;
use crate::naming::ContentKind;
use pulldown_cmark::{Event, Options, Parser, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Markdown conversion failed: {0}")]
    Markdown(#[from] std::fmt::Error),
}

/// Turns a document's text into the HTML body embedded in the page.
pub trait ContentRenderer {
    fn render(&self, text: &str) -> Result<String, RenderError>;
}

/// Identity renderer for plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRenderer;

impl ContentRenderer for PlainTextRenderer {
    fn render(&self, text: &str) -> Result<String, RenderError> {
        Ok(text.to_string())
    }
}

/// Markdown renderer backed by pulldown-cmark.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
    raw_html: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(&MarkdownOptions::default())
    }
}

impl MarkdownRenderer {
    pub fn new(config: &MarkdownOptions) -> Self {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, config.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, config.strikethrough);
        options.set(Options::ENABLE_FOOTNOTES, config.footnotes);
        options.set(Options::ENABLE_TASKLISTS, config.tasklists);
        options.set(Options::ENABLE_SMART_PUNCTUATION, config.smart_punctuation);

        Self {
            options,
            raw_html: config.raw_html,
        }
    }
}

impl ContentRenderer for MarkdownRenderer {
    fn render(&self, text: &str) -> Result<String, RenderError> {
        let raw_html = self.raw_html;
        let parser = Parser::new_ext(text, self.options).map(move |event| match event {
            Event::Html(s) | Event::InlineHtml(s) if !raw_html => Event::Text(s),
            other => other,
        });

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::write_html_fmt(&mut out, parser)?;
        Ok(out)
    }
}

/// Both renderers, selected by content kind.
#[derive(Debug, Clone, Default)]
pub struct Renderers {
    plain: PlainTextRenderer,
    markdown: MarkdownRenderer,
}

impl Renderers {
    pub fn new(markdown: &MarkdownOptions) -> Self {
        Self {
            plain: PlainTextRenderer,
            markdown: MarkdownRenderer::new(markdown),
        }
    }

    pub fn for_kind(&self, kind: ContentKind) -> &dyn ContentRenderer {
        match kind {
            ContentKind::PlainText => &self.plain,
            ContentKind::Markup => &self.markdown,
        }
    }

    /// Render `text` with the renderer for `kind`.
    pub fn render(&self, kind: ContentKind, text: &str) -> Result<String, RenderError> {
        self.for_kind(kind).render(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_identity() {
        let text = "Line <one> & \"two\"\n\n  indented\n";
        assert_eq!(PlainTextRenderer.render(text).unwrap(), text);
    }

    #[test]
    fn plain_text_empty() {
        assert_eq!(PlainTextRenderer.render("").unwrap(), "");
    }

    #[test]
    fn markdown_heading_and_paragraph() {
        let html = MarkdownRenderer::default()
            .render("# Hello\n\nSome *text*.\n")
            .unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>Some <em>text</em>.</p>"));
    }

    #[test]
    fn markdown_is_deterministic() {
        let renderer = MarkdownRenderer::default();
        let source = "# Title\n\n- a\n- b\n\n```\ncode\n```\n";
        assert_eq!(
            renderer.render(source).unwrap(),
            renderer.render(source).unwrap()
        );
    }

    #[test]
    fn markdown_passes_raw_html_by_default() {
        let html = MarkdownRenderer::default()
            .render("Before <span class=\"x\">inline</span> after\n\n<div>block</div>\n")
            .unwrap();
        assert!(html.contains("<span class=\"x\">inline</span>"));
        assert!(html.contains("<div>block</div>"));
    }

    #[test]
    fn markdown_escapes_raw_html_when_disabled() {
        let options = MarkdownOptions {
            raw_html: false,
            ..MarkdownOptions::default()
        };
        let html = MarkdownRenderer::new(&options)
            .render("Before <span>inline</span> after\n")
            .unwrap();
        assert!(!html.contains("<span>"));
        assert!(html.contains("&lt;span&gt;"));
    }

    #[test]
    fn markdown_tables_are_opt_in() {
        let table = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        let plain = MarkdownRenderer::default().render(table).unwrap();
        assert!(!plain.contains("<table>"));

        let options = MarkdownOptions {
            tables: true,
            ..MarkdownOptions::default()
        };
        let html = MarkdownRenderer::new(&options).render(table).unwrap();
        assert!(html.contains("<table>"));
    }

    #[test]
    fn markdown_strikethrough_opt_in() {
        let options = MarkdownOptions {
            strikethrough: true,
            ..MarkdownOptions::default()
        };
        let html = MarkdownRenderer::new(&options).render("~~gone~~\n").unwrap();
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn renderers_dispatch_by_kind() {
        let renderers = Renderers::default();
        let source = "# Heading\n";
        assert_eq!(
            renderers.render(ContentKind::PlainText, source).unwrap(),
            source
        );
        assert!(
            renderers
                .render(ContentKind::Markup, source)
                .unwrap()
                .contains("<h1>Heading</h1>")
        );
    }
}
