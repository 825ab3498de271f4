//! Title resolution for source documents.
//!
//! The title always comes from the first line of the document:
//!
//! | Kind       | First line            | Title          |
//! |------------|-----------------------|----------------|
//! | plain text | `Hello World`         | `Hello World`  |
//! | markdown   | `# Hello, World!`     | `Hello, World` |
//! | markdown   | `## Notes: part two.` | `Notes: part two` |
//!
//! For markdown the heading marker and trailing punctuation are display noise
//! and are stripped. Plain text keeps the line as written. There is no
//! fallback and no failure: an empty document has an empty title.

use crate::naming::ContentKind;

/// Characters stripped from the end of a markdown title.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Extract the display title from a document's text.
pub fn extract_title(text: &str, kind: ContentKind) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();

    match kind {
        ContentKind::PlainText => first_line.to_string(),
        ContentKind::Markup => first_line
            .trim_start_matches(['#', ' '])
            .trim_end_matches(TRAILING_PUNCTUATION)
            .trim_end()
            .to_string(),
    }
}
