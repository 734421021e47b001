//! Project scaffolding for docgen.
//!
//! Creates the standard project layout under `projects/<name>/` and renders
//! a first document from a template chosen by [`DocType`]. Optional sections
//! are switched on or off per type by [`SectionToggles`].

mod doc_type;
mod scaffold;
mod templates;

use std::path::{Path, PathBuf};

use docgen_config::ConfigError;

pub use doc_type::{DocType, SectionToggles};
pub use scaffold::{ScaffoldReport, Scaffolder, title_case};
pub use templates::{TemplateContext, TemplateSet};

/// Error returned by scaffolding.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("Unknown document type '{tag}'. Must be one of: {valid}")]
    UnknownDocType { tag: String, valid: String },
    #[error("Invalid project name '{0}'")]
    InvalidProjectName(String),
    #[error("Document already exists: {} (use --force to replace it)", .0.display())]
    AlreadyExists(PathBuf),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Template {name}: {source}")]
    Template {
        name: String,
        source: minijinja::Error,
    },
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn template(name: &str, source: minijinja::Error) -> Self {
        Self::Template {
            name: name.to_owned(),
            source,
        }
    }
}
