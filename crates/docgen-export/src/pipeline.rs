//! Markdown to PDF export.
//!
//! The export runs in three steps:
//! 1. render diagrams and rewrite the document body ([`process_document`])
//! 2. write the rewritten document and a page stylesheet to scratch files
//!    next to the source, so relative image links keep resolving
//! 3. run pandoc with `WeasyPrint` as the PDF engine
//!
//! Scratch files are [`tempfile::NamedTempFile`]s and are removed when the
//! export returns, on success and on failure alike.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use docgen_config::{Config, ProjectPaths, Workspace};
use docgen_diagrams::{RenderedDiagram, process_document};
use docgen_document::Document;
use docgen_exec::{CommandRunner, ExternalCommand, Tool};
use tempfile::NamedTempFile;

use crate::ExportError;
use crate::style::PageStyle;

/// Table of contents depth when the frontmatter sets none.
pub const DEFAULT_TOC_DEPTH: u8 = 3;

/// Code highlighting style when the frontmatter sets none.
pub const DEFAULT_HIGHLIGHT_STYLE: &str = "pygments";

const SCRATCH_PREFIX: &str = ".docgen-";

/// Outcome of a successful export.
#[derive(Debug)]
pub struct ExportReport {
    /// Written PDF.
    pub output: PathBuf,
    /// Diagrams rendered along the way.
    pub diagrams: Vec<RenderedDiagram>,
    /// Non-fatal problems encountered.
    pub warnings: Vec<String>,
}

/// Pandoc invocation settings derived from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PandocOptions {
    pub title: String,
    pub toc: bool,
    pub toc_depth: u8,
    pub highlight_style: String,
    /// Stylesheets in application order.
    pub stylesheets: Vec<PathBuf>,
    /// Directory relative image links resolve against.
    pub resource_dir: Option<PathBuf>,
}

impl PandocOptions {
    /// Resolve options from the document frontmatter.
    ///
    /// The title falls back to `default_title` (the file stem).
    #[must_use]
    pub fn for_document(document: &Document, default_title: &str) -> Self {
        let frontmatter = document.frontmatter();
        Self {
            title: document.title_or(default_title).to_owned(),
            toc: frontmatter.sections.enabled("toc", true),
            toc_depth: frontmatter.export.toc_depth.unwrap_or(DEFAULT_TOC_DEPTH),
            highlight_style: frontmatter
                .export
                .highlight_style
                .clone()
                .unwrap_or_else(|| DEFAULT_HIGHLIGHT_STYLE.to_owned()),
            stylesheets: Vec::new(),
            resource_dir: None,
        }
    }

    /// Build the pandoc command for `input` -> `output`.
    #[must_use]
    pub fn command(&self, pandoc: &Path, pdf_engine: &Path, input: &Path, output: &Path) -> ExternalCommand {
        let mut engine = OsString::from("--pdf-engine=");
        engine.push(pdf_engine);

        let mut command = ExternalCommand::new(pandoc)
            .arg(input)
            .arg("-o")
            .arg(output)
            .arg(engine);
        if let Some(dir) = &self.resource_dir {
            let mut resource_path = OsString::from("--resource-path=");
            resource_path.push(dir);
            command = command.arg(resource_path);
        }
        for sheet in &self.stylesheets {
            command = command.arg("--css").arg(sheet);
        }
        command = command
            .arg("--standalone")
            .arg("--embed-resources")
            .arg(format!("--metadata=title:{}", self.title));
        if self.toc {
            command = command
                .arg("--toc")
                .arg(format!("--toc-depth={}", self.toc_depth));
        }
        command.args(["--highlight-style", self.highlight_style.as_str()])
    }
}

/// Exports documents of one workspace.
///
/// # Example
///
/// ```ignore
/// use docgen_config::Workspace;
/// use docgen_exec::SystemRunner;
/// use docgen_export::ExportPipeline;
///
/// let workspace = Workspace::discover(None);
/// let report = ExportPipeline::new(&SystemRunner, &workspace)
///     .export(Path::new("projects/acme/docs/acme-proposal.md"), None)?;
/// println!("{}", report.output.display());
/// ```
pub struct ExportPipeline<'a> {
    runner: &'a dyn CommandRunner,
    workspace: &'a Workspace,
}

impl<'a> ExportPipeline<'a> {
    #[must_use]
    pub fn new(runner: &'a dyn CommandRunner, workspace: &'a Workspace) -> Self {
        Self { runner, workspace }
    }

    /// Export `doc_path` to PDF.
    ///
    /// `output` defaults to `<project>/output/<stem>.pdf`. Missing tools are
    /// reported before any diagram is rendered.
    pub fn export(&self, doc_path: &Path, output: Option<&Path>) -> Result<ExportReport, ExportError> {
        let doc_path = doc_path
            .canonicalize()
            .map_err(|e| ExportError::io(doc_path, e))?;
        let document = Document::load(&doc_path)?;
        let doc_dir = doc_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        let paths = ProjectPaths::for_document(&doc_path);
        let project = self
            .workspace
            .config_project(document.frontmatter().project.as_deref(), &paths);
        let config = Config::load(self.workspace, Some(&project))?;

        let pandoc = self.runner.locate(Tool::Pandoc)?;
        let weasyprint = self.runner.locate(Tool::WeasyPrint)?;

        let stem = doc_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_owned());
        let output = resolve_output(output, paths.output.join(format!("{stem}.pdf")))?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
        }

        tracing::info!(
            document = %doc_path.display(),
            project = %project.name().unwrap_or_default(),
            project_config = ?config.project_config_path,
            output = %output.display(),
            "Exporting document"
        );

        let processed = process_document(self.runner, &document, &paths, &config.settings, &doc_dir)?;
        let markdown = document.clone().with_body(processed.content).to_markdown()?;
        let mut warnings = processed.warnings;

        let scratch = write_scratch(&doc_dir, ".md", &markdown)?;
        let page_css = PageStyle::resolve(&document.frontmatter().export, &config.settings).to_css();
        let page_sheet = write_scratch(&doc_dir, ".css", &page_css)?;

        let mut options = PandocOptions::for_document(&document, &stem);
        let print_css = self.workspace.print_css();
        if print_css.is_file() {
            options.stylesheets.push(print_css);
        } else {
            let warning = format!("Stylesheet not found: {}", print_css.display());
            tracing::warn!(path = %print_css.display(), "Stylesheet not found, exporting without it");
            warnings.push(warning);
        }
        options.stylesheets.push(page_sheet.path().to_path_buf());
        options.resource_dir = Some(doc_dir);

        let command = options
            .command(&pandoc, &weasyprint, scratch.path(), &output)
            .current_dir(&paths.root);
        if let Err(err) = self.runner.run(&command) {
            tracing::error!(error = %err, "PDF composition failed");
            return Err(err.into());
        }

        tracing::info!(output = %output.display(), diagrams = processed.rendered.len(), "Export complete");
        Ok(ExportReport {
            output,
            diagrams: processed.rendered,
            warnings,
        })
    }
}

/// Make a caller-supplied output path absolute against the current
/// directory, since pandoc runs from the project root.
fn resolve_output(output: Option<&Path>, default: PathBuf) -> Result<PathBuf, ExportError> {
    match output {
        Some(path) => std::path::absolute(path).map_err(|e| ExportError::io(path, e)),
        None => Ok(default),
    }
}

fn write_scratch(dir: &Path, suffix: &str, content: &str) -> Result<NamedTempFile, ExportError> {
    let mut file = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .suffix(suffix)
        .tempfile_in(dir)
        .map_err(|e| ExportError::io(dir, e))?;
    let path = file.path().to_path_buf();
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| ExportError::io(&path, e))?;
    Ok(file)
}
