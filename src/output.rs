//! Console output formatting.
//!
//! Everything user-facing goes to stdout, the preview stream. Diagnostics
//! and logs go to stderr through `tracing`.
//!
//! ```text
//! === Found .txt and .md files: ===
//! a.txt
//! b.md
//! === Rendered HTML ===
//! <!DOCTYPE html>
//! ...
//! === HTML written to posts/a.html ===
//! ...
//! Success! Generated 2 pages.
//! ```
//!
//! With `--keep-going`, failures are listed after the summary:
//!
//! ```text
//! Generated 1 of 2 pages. 1 failed:
//!     posts/b.txt: Cannot write posts/b.html: Is a directory (os error 21)
//! ```
//!
//! Each `format_*` function is pure and returns lines for testability; the
//! `print_*` wrappers add color and write to stdout.

use crate::batch::BatchReport;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub const FOUND_HEADER: &str = "=== Found .txt and .md files: ===";
pub const PREVIEW_HEADER: &str = "=== Rendered HTML ===";
const SUCCESS: &str = "Success!";

/// Lines listing the discovered source files by name.
pub fn format_discovered(sources: &[PathBuf]) -> Vec<String> {
    let mut lines = Vec::with_capacity(sources.len() + 1);
    lines.push(FOUND_HEADER.to_string());
    lines.extend(sources.iter().map(|p| display_name(p)));
    lines
}

/// Line announcing a written output file.
pub fn format_written(output: &Path) -> String {
    format!("=== HTML written to {} ===", output.display())
}

/// The final summary, uncolored.
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    if report.is_complete() {
        return vec![format!(
            "{SUCCESS} Generated {} {}.",
            report.generated.len(),
            pages(report.generated.len())
        )];
    }

    let total = report.generated.len() + report.failures.len();
    let mut lines = vec![format!(
        "Generated {} of {} {}. {} failed:",
        report.generated.len(),
        total,
        pages(total),
        report.failures.len()
    )];
    for failure in &report.failures {
        lines.push(format!("    {}: {}", failure.path.display(), failure.error));
    }
    lines
}

/// Print the summary with the status word highlighted.
pub fn print_summary(report: &BatchReport) {
    let mut lines = format_summary(report).into_iter();
    if let Some(head) = lines.next() {
        match head.strip_prefix(SUCCESS) {
            Some(rest) => println!("{}{}", SUCCESS.green().bold(), rest),
            None => println!("{}", head.yellow().bold()),
        }
    }
    for line in lines {
        println!("{}", line);
    }
}

fn pages(n: usize) -> &'static str {
    if n == 1 { "page" } else { "pages" }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
