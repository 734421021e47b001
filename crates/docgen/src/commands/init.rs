//! `docgen init` command implementation.

use clap::Args;
use docgen_config::Workspace;
use docgen_scaffold::Scaffolder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the init command.
#[derive(Args)]
pub(crate) struct InitArgs {
    /// Project name (directory under `projects/`).
    project: String,

    /// Document type: tech-spec, proposal, sow or architecture.
    doc_type: String,

    /// Document title (default: derived from the project name).
    title: Option<String>,

    /// Client name used by the templates.
    #[arg(long)]
    client: Option<String>,

    /// Replace an existing document.
    #[arg(short, long)]
    force: bool,
}

impl InitArgs {
    /// Execute the init command.
    ///
    /// # Errors
    ///
    /// Returns an error if the document type is unknown or the configuration
    /// is missing.
    pub(crate) fn execute(self, workspace: &Workspace) -> Result<(), CliError> {
        let output = Output::new();

        let mut scaffolder = Scaffolder::new(workspace).force(self.force);
        if let Some(title) = self.title {
            scaffolder = scaffolder.title(title);
        }
        if let Some(client) = self.client {
            scaffolder = scaffolder.client(client);
        }
        let report = scaffolder.scaffold(&self.project, &self.doc_type)?;

        if report.overwritten {
            output.warning(&format!("Replaced {}", report.document.display()));
        }
        for name in &report.overridden_templates {
            output.info(&format!("Using workspace template: {name}"));
        }
        output.highlight(&format!("Project scaffolded: {}", report.paths.root.display()));
        output.info(&format!("  Document: {}", report.document.display()));
        output.info(&format!("  Diagrams: {}", report.paths.diagrams.display()));
        output.info(&format!("  Output:   {}", report.paths.output.display()));
        output.info(&format!("  Assets:   {}", report.paths.assets.display()));
        Ok(())
    }
}
