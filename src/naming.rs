//! Centralized filename handling for source documents.
//!
//! Every decision that depends on a source file's name lives here, so the
//! rest of the pipeline never inspects extensions itself:
//!
//! - **Eligibility**: only `.txt` and `.md` files are picked up from a directory.
//! - **Content kind**: `.md` is markup, everything else is plain text.
//! - **Output path**: the extension is swapped for `.html`, next to the source.
//!
//! ```text
//! first-post.txt   → PlainText → first-post.html
//! notes/post.md    → Markup    → notes/post.html
//! README           → PlainText → README.html
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Extensions the directory scan treats as source documents.
pub const SOURCE_EXTENSIONS: &[&str] = &["txt", "md"];

const MARKUP_EXTENSION: &str = "md";
const OUTPUT_EXTENSION: &str = "html";

/// How a source document's body is turned into HTML.
///
/// Computed once per document by [`ContentKind::from_path`] and threaded
/// through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Passed through unchanged; the template is responsible for escaping.
    PlainText,
    /// Markdown, converted to an HTML fragment.
    Markup,
}

impl ContentKind {
    /// Classify a source path by its extension.
    ///
    /// Total: anything that is not `.md` (including no extension at all)
    /// is plain text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(MARKUP_EXTENSION) => ContentKind::Markup,
            _ => ContentKind::PlainText,
        }
    }

    pub fn is_markup(self) -> bool {
        self == ContentKind::Markup
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::PlainText => f.write_str("plain text"),
            ContentKind::Markup => f.write_str("markdown"),
        }
    }
}

/// Whether a directory entry name is an eligible source document.
pub fn is_source_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Derive the HTML output path for a source document.
///
/// Exactly one substitution: the final extension (if any) is replaced with
/// `.html`. A path already ending in `.html` maps to itself.
pub fn output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}
