//! Diagram rendering for docgen.
//!
//! Finds diagrams in a document, renders them with external tools and
//! rewrites the document to reference the rendered images:
//! - fenced ```` ```mermaid ```` blocks are rendered with `mmdc` and replaced
//!   by `![Diagram N](...)` image references, numbered in document order
//! - `.drawio` files listed under `diagrams.drawio_files` in the frontmatter
//!   are rendered with the draw.io CLI next to them
//!
//! # Architecture
//!
//! - [`extract`]: mermaid fence detection and span replacement
//! - [`processor`]: [`DiagramPipeline`] driving both renderers
//! - [`options`]: frontmatter and configuration resolution
//! - [`gantt`]: mermaid Gantt chart generation

pub mod extract;
pub mod gantt;
mod drawio;
mod language;
mod mermaid;
mod options;
mod processor;

use std::path::{Path, PathBuf};

use docgen_exec::ExecError;

pub use gantt::{GanttChart, GanttPhase, GanttTask, TaskDuration, TaskStart, TaskStatus};
pub use language::{DiagramFormat, DiagramKind};
pub use options::DiagramOptions;
pub use processor::{DiagramPipeline, ProcessedDiagrams, RenderedDiagram, process_document};

/// Error returned by the diagram pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// A renderer was missing or failed.
    #[error(transparent)]
    Exec(#[from] ExecError),
    /// Filesystem error while preparing a render.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DiagramError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
