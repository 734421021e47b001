//! `docgen export` command implementation.

use std::path::PathBuf;

use clap::Args;
use docgen_config::Workspace;
use docgen_exec::SystemRunner;
use docgen_export::ExportPipeline;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Path to the markdown document (inside `<project>/docs/`).
    document: PathBuf,

    /// Output PDF path (default: `<project>/output/<name>.pdf`).
    output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if a tool is missing or fails.
    pub(crate) fn execute(self, workspace: &Workspace) -> Result<(), CliError> {
        let output = Output::new();

        output.info(&format!("Exporting {}...", self.document.display()));
        let report = ExportPipeline::new(&SystemRunner, workspace)
            .export(&self.document, self.output.as_deref())?;

        output.warnings(&report.warnings);
        if !report.diagrams.is_empty() {
            output.info(&format!("Rendered {} diagram(s)", report.diagrams.len()));
        }
        output.success(&format!("PDF exported: {}", report.output.display()));
        Ok(())
    }
}
