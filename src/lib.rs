//! # makesite
//!
//! A tiny static page generator. Write posts as plain text or markdown, keep
//! one HTML template next to them, and get one `.html` page per post.
//!
//! # Pipeline
//!
//! Every document goes through the same steps, independently of the others:
//!
//! ```text
//! post.md ──read──► text ──classify──► Markup
//!                    │
//!                    ├──first line──► title "Hello, World"
//!                    └──markdown────► <h1>…</h1><p>…</p>
//!                                        │
//!                         Page { title, content, paths, IsMarkdown }
//!                                        │
//!                  template.tmpl ──render──► stdout preview
//!                                └─render──► post.html
//! ```
//!
//! Directory mode runs this for every `.txt` and `.md` file in a directory
//! and finishes with a count of generated pages.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Content kind classification and output path derivation |
//! | [`metadata`] | Title extraction from the first line |
//! | [`render`] | Plain-text and markdown renderers behind one trait |
//! | [`types`] | The immutable [`types::Page`] record bound to the template |
//! | [`template`] | Tera template loading, raw-HTML filter, rendering |
//! | [`generate`] | The single-document pipeline |
//! | [`scan`] | Source discovery in a directory |
//! | [`batch`] | Directory mode with a configurable failure policy |
//! | [`config`] | Optional `makesite.toml` |
//! | [`output`] | Console output formatting |
//!
//! # Design Decisions
//!
//! ## Runtime Template
//!
//! The page layout is a Tera file the author edits, not compiled-in markup.
//! It is loaded once per run and autoescaped; markdown output opts out of
//! escaping through the raw-HTML filter, which is handed to the engine at
//! construction (see [`template::TemplateOptions`]).
//!
//! ## One Classification
//!
//! The extension is inspected exactly once, by
//! [`naming::ContentKind::from_path`]. Title extraction, rendering and the
//! template's `IsMarkdown` all follow from the resulting variant.
//!
//! ## Errors Are Values
//!
//! Every failure is a typed error returned to the caller. The batch driver
//! is the only place that decides whether one bad document stops the run
//! ([`config::FailurePolicy`]).

pub mod batch;
pub mod config;
pub mod generate;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

/// Initialize tracing on stderr.
///
/// Verbosity: 0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE. `RUST_LOG`
/// directives are honored on top.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
