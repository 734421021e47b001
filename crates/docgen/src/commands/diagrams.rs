//! `docgen diagrams` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use console::Term;
use docgen_config::{Config, ProjectPaths, Workspace};
use docgen_diagrams::process_document;
use docgen_document::Document;
use docgen_exec::SystemRunner;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the diagrams command.
#[derive(Args)]
pub(crate) struct DiagramsArgs {
    /// Path to the markdown document (inside `<project>/docs/`).
    document: PathBuf,

    /// Print the rewritten document to stdout.
    #[arg(long)]
    print: bool,
}

impl DiagramsArgs {
    /// Execute the diagrams command.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or a renderer fails.
    pub(crate) fn execute(self, workspace: &Workspace) -> Result<(), CliError> {
        let output = Output::new();

        let doc_path = resolve_document(&self.document)?;
        let document = Document::load(&doc_path)?;
        let paths = ProjectPaths::for_document(&doc_path);
        let project = workspace.config_project(document.frontmatter().project.as_deref(), &paths);
        let config = Config::load(workspace, Some(&project))?;
        tracing::debug!(
            project = %project.root.display(),
            project_config = ?config.project_config_path,
            "Configuration loaded"
        );
        let doc_dir = doc_path.parent().unwrap_or(Path::new("."));

        output.info(&format!("Rendering diagrams for {}...", doc_path.display()));
        let processed = process_document(&SystemRunner, &document, &paths, &config.settings, doc_dir)?;
        output.warnings(&processed.warnings);

        for diagram in &processed.rendered {
            output.rendered(diagram);
        }
        output.success(&format!(
            "Diagrams exported to: {} ({} rendered)",
            paths.diagram_exports.display(),
            processed.rendered.len()
        ));

        if self.print {
            let markdown = document.with_body(processed.content).to_markdown()?;
            Term::stdout().write_str(&markdown)?;
        }

        Ok(())
    }
}

/// Absolute path of an existing document.
pub(crate) fn resolve_document(path: &Path) -> Result<PathBuf, CliError> {
    path.canonicalize().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })
}
