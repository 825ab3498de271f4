//! Shared test utilities.
//!
//! [`TestSite`] is a throwaway directory of source documents plus ready-made
//! [`Generator`]s, so pipeline and batch tests don't repeat setup.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let site = TestSite::new();
//! let source = site.write("post.md", "# Hello\n");
//! let page = site.generator().generate_page(&source, &mut Vec::new()).unwrap();
//! assert_eq!(page.output, site.path().join("post.html"));
//! ```

use crate::generate::Generator;
use crate::render::Renderers;
use crate::template::{STOCK_TEMPLATE, TemplateEngine, TemplateOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestSite {
    dir: TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` inside the site and return the full path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Generator using the stock template, echoing rendered HTML.
    pub fn generator(&self) -> Generator {
        self.generator_with_template(STOCK_TEMPLATE)
    }

    /// Generator with an in-memory template, echoing rendered HTML.
    pub fn generator_with_template(&self, source: &str) -> Generator {
        Generator::new(engine(source), Renderers::default(), true)
    }

    /// Generator using the stock template that does not echo rendered HTML.
    pub fn quiet_generator(&self) -> Generator {
        Generator::new(engine(STOCK_TEMPLATE), Renderers::default(), false)
    }
}

fn engine(source: &str) -> TemplateEngine {
    TemplateEngine::from_source("template.tmpl", source, &TemplateOptions::default()).unwrap()
}

/// File names of `paths`, in order.
pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}
