//! Directory mode: run the pipeline over every source in a directory.
//!
//! ```text
//! === Found .txt and .md files: ===
//! a.txt
//! b.md
//! === Rendered HTML ===          (per document, see generate)
//! ...
//! Success! Generated 2 pages.
//! ```
//!
//! The discovered list is written to the preview stream before any document
//! is processed. What happens when a document fails is decided once, here,
//! by [`FailurePolicy`]:
//!
//! - `Abort`: return the first error; nothing more is processed or reported.
//! - `Continue`: log it, record it in the [`BatchReport`], move on.
//!
//! A directory that cannot be listed is fatal under both policies.
//!
//! Two sources that map to the same page (`x.md` and `x.txt`) would
//! overwrite each other. The first in processing order claims `x.html`; every
//! later one fails with [`GenerateError::OutputCollision`] under the policy.

use crate::config::FailurePolicy;
use crate::generate::{GenerateError, GeneratedPage, Generator};
use crate::naming;
use crate::output;
use crate::scan::{self, ScanError};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Failed to generate {path}: {source}")]
    Document { path: PathBuf, source: GenerateError },
    #[error("Cannot write preview: {0}")]
    Preview(#[from] io::Error),
    #[error("{failed} of {total} documents failed")]
    Incomplete { failed: usize, total: usize },
}

/// A document that failed under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: GenerateError,
}

/// Outcome of a completed batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub discovered: Vec<PathBuf>,
    pub generated: Vec<GeneratedPage>,
    pub failures: Vec<Failure>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn recorded failures into an error, for the process exit status.
    pub fn ensure_complete(&self) -> Result<(), BatchError> {
        if self.is_complete() {
            return Ok(());
        }
        Err(BatchError::Incomplete {
            failed: self.failures.len(),
            total: self.discovered.len(),
        })
    }
}

/// Process every source document directly inside `dir`.
pub fn run(
    generator: &Generator,
    dir: &Path,
    policy: FailurePolicy,
    preview: &mut dyn Write,
) -> Result<BatchReport, BatchError> {
    let discovered = scan::discover_sources(dir)?;
    for line in output::format_discovered(&discovered) {
        writeln!(preview, "{}", line)?;
    }

    let mut report = BatchReport {
        discovered,
        ..BatchReport::default()
    };

    let mut claimed = HashMap::new();
    for path in &report.discovered {
        let result = claim_output(&mut claimed, path)
            .and_then(|()| generator.generate_page(path, preview));
        match result {
            Ok(page) => report.generated.push(page),
            Err(error) => match policy {
                FailurePolicy::Abort => {
                    return Err(BatchError::Document {
                        path: path.clone(),
                        source: error,
                    });
                }
                FailurePolicy::Continue => {
                    tracing::warn!(source = %path.display(), %error, "Skipping failed document");
                    report.failures.push(Failure {
                        path: path.clone(),
                        error,
                    });
                }
            },
        }
    }

    tracing::info!(
        dir = %dir.display(),
        generated = report.generated.len(),
        markdown = report.generated.iter().filter(|p| p.kind.is_markup()).count(),
        bytes = report.generated.iter().map(|p| p.bytes).sum::<usize>(),
        failed = report.failures.len(),
        "Batch finished"
    );
    Ok(report)
}

/// Reserve the output path of `source`, or name the source that holds it.
fn claim_output(
    claimed: &mut HashMap<PathBuf, PathBuf>,
    source: &Path,
) -> Result<(), GenerateError> {
    let output = naming::output_path(source);
    if let Some(other) = claimed.get(&output) {
        return Err(GenerateError::OutputCollision {
            path: output,
            other: other.clone(),
        });
    }
    claimed.insert(output, source.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;

    #[test]
    fn generates_one_page_per_source() {
        let site = TestSite::new();
        site.write("a.txt", "Alpha\nbody\n");
        site.write("b.md", "# Beta\n\nbody\n");
        site.write("c.png", "not an image really");
        let generator = site.generator();
        let mut preview = Vec::new();

        let report = run(&generator, site.path(), FailurePolicy::Abort, &mut preview).unwrap();

        assert_eq!(report.discovered.len(), 2);
        assert_eq!(report.generated.len(), 2);
        assert!(report.is_complete());
        assert!(site.path().join("a.html").exists());
        assert!(site.path().join("b.html").exists());
        assert!(!site.path().join("c.html").exists());
        assert_eq!(
            fs::read_to_string(site.path().join("c.png")).unwrap(),
            "not an image really"
        );
    }

    #[test]
    fn discovered_list_precedes_rendering() {
        let site = TestSite::new();
        site.write("a.txt", "Alpha\n");
        site.write("b.md", "# Beta\n");
        let generator = site.generator();
        let mut preview = Vec::new();

        run(&generator, site.path(), FailurePolicy::Abort, &mut preview).unwrap();

        let preview = String::from_utf8(preview).unwrap();
        let found = preview.find(output::FOUND_HEADER).unwrap();
        let first_render = preview.find(output::PREVIEW_HEADER).unwrap();
        assert!(found < first_render);
        let listed: Vec<&str> = preview.lines().skip(1).take(2).collect();
        assert_eq!(listed, vec!["a.txt", "b.md"]);
    }

    #[test]
    fn abort_stops_at_first_failure() {
        let site = TestSite::new();
        site.write("a.txt", "Alpha\n");
        site.write("b.txt", "Beta\n");
        site.write("c.txt", "Gamma\n");
        fs::create_dir(site.path().join("b.html")).unwrap();
        let generator = site.quiet_generator();

        let err = run(&generator, site.path(), FailurePolicy::Abort, &mut Vec::new()).unwrap_err();

        match err {
            BatchError::Document { path, source } => {
                assert_eq!(path, site.path().join("b.txt"));
                assert!(matches!(source, GenerateError::OutputWrite { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(site.path().join("a.html").is_file());
        assert!(!site.path().join("c.html").exists());
    }

    #[test]
    fn continue_processes_remaining_documents() {
        let site = TestSite::new();
        site.write("a.txt", "Alpha\n");
        site.write("b.txt", "Beta\n");
        site.write("c.txt", "Gamma\n");
        fs::create_dir(site.path().join("b.html")).unwrap();
        let generator = site.quiet_generator();

        let report =
            run(&generator, site.path(), FailurePolicy::Continue, &mut Vec::new()).unwrap();

        assert_eq!(report.generated.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, site.path().join("b.txt"));
        assert!(!report.is_complete());
        assert!(site.path().join("c.html").is_file());
        let err = report.ensure_complete().unwrap_err();
        assert_eq!(err.to_string(), "1 of 3 documents failed");
    }

    #[test]
    fn same_stem_sources_do_not_overwrite_each_other() {
        let site = TestSite::new();
        site.write("x.md", "# Marked\n");
        site.write("x.txt", "Plain\n");
        site.write("README", "not a source");
        let generator = site.generator_with_template("{{ Title }}");

        let err = run(&generator, site.path(), FailurePolicy::Abort, &mut Vec::new()).unwrap_err();

        match err {
            BatchError::Document { path, source } => {
                assert_eq!(path, site.path().join("x.txt"));
                match source {
                    GenerateError::OutputCollision { path, other } => {
                        assert_eq!(path, site.path().join("x.html"));
                        assert_eq!(other, site.path().join("x.md"));
                    }
                    other => panic!("unexpected error: {other}"),
                }
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            fs::read_to_string(site.path().join("x.html")).unwrap(),
            "Marked"
        );
    }

    #[test]
    fn same_stem_collision_is_recorded_under_continue() {
        let site = TestSite::new();
        site.write("x.md", "# Marked\n");
        site.write("x.txt", "Plain\n");
        site.write("y.txt", "Why\n");
        let generator = site.generator_with_template("{{ Title }}");

        let report =
            run(&generator, site.path(), FailurePolicy::Continue, &mut Vec::new()).unwrap();

        assert_eq!(file_names(&report.discovered), vec!["x.md", "x.txt", "y.txt"]);
        assert_eq!(report.generated.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, site.path().join("x.txt"));
        assert!(matches!(
            report.failures[0].error,
            GenerateError::OutputCollision { .. }
        ));
        assert_eq!(
            fs::read_to_string(site.path().join("x.html")).unwrap(),
            "Marked"
        );
        assert_eq!(
            fs::read_to_string(site.path().join("y.html")).unwrap(),
            "Why"
        );
        let summary = output::format_summary(&report);
        assert_eq!(summary[0], "Generated 2 of 3 pages. 1 failed:");
    }

    #[test]
    fn missing_directory_is_fatal_under_continue() {
        let site = TestSite::new();
        let generator = site.generator();

        let err = run(
            &generator,
            &site.path().join("missing"),
            FailurePolicy::Continue,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BatchError::Scan(_)));
    }

    #[test]
    fn empty_directory_generates_nothing() {
        let site = TestSite::new();
        let generator = site.generator();

        let report = run(&generator, site.path(), FailurePolicy::Abort, &mut Vec::new()).unwrap();
        assert!(report.discovered.is_empty());
        assert!(report.generated.is_empty());
        assert!(report.ensure_complete().is_ok());
    }
}
