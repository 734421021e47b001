//! CLI error types.

use docgen_config::ConfigError;
use docgen_diagrams::DiagramError;
use docgen_document::DocumentError;
use docgen_export::ExportError;
use docgen_scaffold::ScaffoldError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("{0}")]
    Diagram(#[from] DiagramError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Scaffold(#[from] ScaffoldError),
}
