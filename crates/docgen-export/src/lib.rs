//! PDF export for docgen documents.
//!
//! Renders a document's diagrams, then composes the rewritten Markdown into
//! a PDF with pandoc and `WeasyPrint`, styled by the workspace's
//! `styles/print.css` plus a generated page stylesheet.

mod pipeline;
mod style;

use std::path::{Path, PathBuf};

use docgen_config::ConfigError;
use docgen_diagrams::DiagramError;
use docgen_document::DocumentError;
use docgen_exec::ExecError;

pub use pipeline::{DEFAULT_HIGHLIGHT_STYLE, DEFAULT_TOC_DEPTH, ExportPipeline, ExportReport, PandocOptions};
pub use style::PageStyle;

/// Error returned by an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Diagram(#[from] DiagramError),
    /// Compositor missing or failed.
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
