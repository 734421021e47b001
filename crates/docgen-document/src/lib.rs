//! Markdown documents with YAML frontmatter.
//!
//! A [`Document`] is a body of Markdown plus a metadata block. The metadata
//! is available both as the raw YAML mapping (for faithful re-serialization)
//! and as a typed [`Frontmatter`] covering the keys docgen interprets:
//!
//! ```yaml
//! ---
//! title: "Payments Platform"
//! project: payments
//! export:
//!   toc_depth: 3
//! sections:
//!   toc: true
//! diagrams:
//!   mermaid_theme: default
//!   export_format: png
//!   drawio_files: [architecture.drawio]
//! ---
//! ```

mod document;
mod frontmatter;

use std::path::PathBuf;

pub use document::Document;
pub use frontmatter::{DiagramsMeta, ExportMeta, Frontmatter, Sections};

/// Error type for document operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Reading the document failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Frontmatter could not be parsed.
    #[error("{0}")]
    Parse(String),
    /// Frontmatter could not be serialized.
    #[error("Failed to serialize frontmatter: {0}")]
    Serialize(String),
}
