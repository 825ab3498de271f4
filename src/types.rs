//! The page record bound to the template.
//!
//! Field names are serialized under the names templates use
//! (`TextFilePath`, `HTMLPagePath`, `IsMarkdown`, ...), so a template written
//! for the classic tool keeps working unchanged.

use crate::naming::{self, ContentKind};
use serde::Serialize;
use std::path::Path;

/// An assembled page, ready for rendering.
///
/// Built once per source document and never mutated. Every field is derived
/// from the source path and the already-rendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Path of the source document as given.
    #[serde(rename = "TextFilePath")]
    pub source_path: String,
    /// Display name (same as the source path).
    #[serde(rename = "TextFileName")]
    pub source_name: String,
    /// Where the HTML is written: the source path with an `.html` extension.
    #[serde(rename = "HTMLPagePath")]
    pub output_path: String,
    /// Rendered HTML body.
    #[serde(rename = "Content")]
    pub content: String,
    /// Title from the document's first line.
    #[serde(rename = "Title")]
    pub title: String,
    /// Whether `content` came from the markdown renderer.
    #[serde(rename = "IsMarkdown")]
    pub is_markup: bool,
    #[serde(skip)]
    pub kind: ContentKind,
}

impl Page {
    /// Assemble a page. Pure, infallible.
    pub fn assemble(source: &Path, kind: ContentKind, title: String, content: String) -> Self {
        let source_path = source.to_string_lossy().into_owned();
        Self {
            source_name: source_path.clone(),
            output_path: naming::output_path(source).to_string_lossy().into_owned(),
            source_path,
            content,
            title,
            is_markup: kind.is_markup(),
            kind,
        }
    }

    pub fn output_path(&self) -> &Path {
        Path::new(&self.output_path)
    }
}
