//! Source discovery for directory mode.
//!
//! Lists a directory (non-recursively) and keeps the regular files whose
//! names end in a source extension:
//!
//! ```text
//! posts/
//! ├── a.txt        ✓
//! ├── b.md         ✓
//! ├── c.png        skipped (not a source extension)
//! ├── a.html       skipped (previous output)
//! └── drafts.md/   skipped (directory)
//! ```
//!
//! Results are sorted by file name so runs are reproducible across
//! filesystems.

use crate::naming;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot list directory {path}: {source}")]
    DirectoryList { path: PathBuf, source: io::Error },
}

/// Find every source document directly inside `dir`.
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let list_error = |source: io::Error| ScanError::DirectoryList {
        path: dir.to_path_buf(),
        source,
    };

    let mut sources = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let entry = entry.map_err(list_error)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::debug!(entry = ?entry.path(), "Skipping non-UTF-8 file name");
            continue;
        };
        let path = entry.path();
        if naming::is_source_name(name) && path.is_file() {
            sources.push(path);
        }
    }

    sources.sort();
    tracing::debug!(dir = %dir.display(), count = sources.len(), "Discovered sources");
    Ok(sources)
}
