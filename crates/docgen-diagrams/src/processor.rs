//! Diagram preprocessing pipeline.
//!
//! [`DiagramPipeline`] renders every mermaid block of a document body and
//! every draw.io file listed in its frontmatter, then returns the body with
//! each mermaid block replaced by an image reference.

use std::path::{Component, Path, PathBuf};

use docgen_config::{ProjectPaths, Settings};
use docgen_document::Document;
use docgen_exec::{CommandRunner, Tool};

use crate::DiagramError;
use crate::drawio::DrawioRenderer;
use crate::extract::{find_mermaid_blocks, replace_blocks};
use crate::language::DiagramKind;
use crate::mermaid::MermaidRenderer;
use crate::options::DiagramOptions;

/// File name prefix for rendered inline diagrams.
const INLINE_PREFIX: &str = "diagram";

/// A diagram written to the export directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    pub kind: DiagramKind,
    /// `diagram-<n>` for inline blocks, the listed file name for draw.io.
    pub name: String,
    /// Rendered image.
    pub path: PathBuf,
}

/// Result of running the pipeline over one document.
#[derive(Debug, Default)]
pub struct ProcessedDiagrams {
    /// Body with mermaid blocks replaced by image references.
    pub content: String,
    /// Rendered images, mermaid first (document order) then draw.io.
    pub rendered: Vec<RenderedDiagram>,
    /// Non-fatal problems (missing draw.io files, unknown options).
    pub warnings: Vec<String>,
}

/// Renders the diagrams of one document.
///
/// Renders run one after another in document order. A failed render aborts
/// the run with the tool's diagnostics; a missing draw.io file only adds a
/// warning.
///
/// # Example
///
/// ```ignore
/// use docgen_config::ProjectPaths;
/// use docgen_diagrams::{DiagramOptions, DiagramPipeline};
/// use docgen_exec::SystemRunner;
///
/// let paths = ProjectPaths::new("projects/acme");
/// let pipeline = DiagramPipeline::new(&SystemRunner, &paths, DiagramOptions::default())
///     .link_base(&paths.docs);
/// let processed = pipeline.process("```mermaid\ngraph TD\nA-->B\n```\n")?;
/// assert_eq!(processed.content, "![Diagram 1](../diagrams/exports/diagram-1.png)\n");
/// ```
pub struct DiagramPipeline<'a> {
    runner: &'a dyn CommandRunner,
    options: DiagramOptions,
    diagrams_dir: PathBuf,
    export_dir: PathBuf,
    link_base: Option<PathBuf>,
}

impl<'a> DiagramPipeline<'a> {
    /// Create a pipeline reading from and writing to a project's layout.
    #[must_use]
    pub fn new(runner: &'a dyn CommandRunner, paths: &ProjectPaths, options: DiagramOptions) -> Self {
        Self {
            runner,
            options,
            diagrams_dir: paths.diagrams.clone(),
            export_dir: paths.diagram_exports.clone(),
            link_base: None,
        }
    }

    /// Write image references relative to `dir` (usually the document's
    /// directory) instead of using the export path as-is.
    #[must_use]
    pub fn link_base(mut self, dir: impl Into<PathBuf>) -> Self {
        self.link_base = Some(dir.into());
        self
    }

    /// Render all diagrams and rewrite `body`.
    pub fn process(&self, body: &str) -> Result<ProcessedDiagrams, DiagramError> {
        let (content, mut rendered) = self.render_inline(body)?;
        let (drawio, warnings) = self.render_drawio_files()?;
        rendered.extend(drawio);
        Ok(ProcessedDiagrams {
            content,
            rendered,
            warnings,
        })
    }

    /// Render mermaid blocks and replace each with an image reference.
    ///
    /// A body without mermaid blocks is returned unchanged and no tool is
    /// looked up.
    pub fn render_inline(&self, body: &str) -> Result<(String, Vec<RenderedDiagram>), DiagramError> {
        let blocks = find_mermaid_blocks(body);
        if blocks.is_empty() {
            return Ok((body.to_owned(), Vec::new()));
        }

        let renderer = MermaidRenderer {
            runner: self.runner,
            program: self.runner.locate(Tool::Mermaid)?,
            theme: &self.options.theme,
            format: self.options.format,
        };
        self.ensure_export_dir()?;

        let mut rendered = Vec::with_capacity(blocks.len());
        let mut replacements = Vec::with_capacity(blocks.len());
        for block in &blocks {
            let name = format!("{INLINE_PREFIX}-{}", block.index);
            let path = renderer.render(&block.source, &self.export_dir, &name)?;
            replacements.push(format!(
                "![Diagram {}]({})",
                block.index,
                self.image_link(&path)
            ));
            rendered.push(RenderedDiagram {
                kind: DiagramKind::Mermaid,
                name,
                path,
            });
        }

        tracing::info!(count = blocks.len(), "Rendered mermaid diagrams");
        Ok((replace_blocks(body, &blocks, &replacements), rendered))
    }

    /// Render the draw.io files listed in the options.
    ///
    /// Files missing from the diagrams directory are skipped with one
    /// warning each. Document text is not touched; authors reference these
    /// images directly.
    pub fn render_drawio_files(&self) -> Result<(Vec<RenderedDiagram>, Vec<String>), DiagramError> {
        let mut rendered = Vec::new();
        let mut warnings = Vec::new();
        let mut renderer: Option<DrawioRenderer<'_>> = None;

        for file in &self.options.drawio_files {
            let source = self.diagrams_dir.join(file);
            if !source.is_file() {
                tracing::warn!(path = %source.display(), "draw.io file not found, skipping");
                warnings.push(format!("draw.io file not found: {}", source.display()));
                continue;
            }

            // Located on the first file that exists
            if renderer.is_none() {
                let program = self.runner.locate(Tool::DrawIo)?;
                self.ensure_export_dir()?;
                renderer = Some(DrawioRenderer {
                    runner: self.runner,
                    program,
                    format: self.options.format,
                });
            }

            if let Some(renderer) = &renderer {
                let path = renderer.render(&source, &self.export_dir)?;
                rendered.push(RenderedDiagram {
                    kind: DiagramKind::DrawIo,
                    name: file.clone(),
                    path,
                });
            }
        }

        Ok((rendered, warnings))
    }

    fn ensure_export_dir(&self) -> Result<(), DiagramError> {
        std::fs::create_dir_all(&self.export_dir).map_err(|e| DiagramError::io(&self.export_dir, e))
    }

    /// Markdown link target for a rendered image.
    fn image_link(&self, path: &Path) -> String {
        let target = self
            .link_base
            .as_deref()
            .and_then(|base| relative_path(path, base))
            .unwrap_or_else(|| path.to_path_buf());
        let link = target.to_string_lossy().replace('\\', "/");
        if link.contains(char::is_whitespace) {
            format!("<{link}>")
        } else {
            link
        }
    }
}

/// Path of `target` relative to the directory `base`.
///
/// Returns `None` when no purely lexical relative path exists (one path
/// absolute and the other not, or `..` components in `base`).
fn relative_path(target: &Path, base: &Path) -> Option<PathBuf> {
    if target.is_absolute() != base.is_absolute() {
        return None;
    }

    let mut target_components = target.components().peekable();
    let mut base_components = base.components().peekable();
    while let (Some(t), Some(b)) = (target_components.peek(), base_components.peek()) {
        if t != b {
            break;
        }
        target_components.next();
        base_components.next();
    }

    let mut result = PathBuf::new();
    for component in base_components {
        match component {
            Component::Normal(_) => result.push(".."),
            Component::CurDir => {}
            _ => return None,
        }
    }
    result.extend(target_components);
    Some(result)
}

/// Run the pipeline for a document using its frontmatter and configuration.
///
/// Image references are written relative to `doc_dir`.
pub fn process_document(
    runner: &dyn CommandRunner,
    document: &Document,
    paths: &ProjectPaths,
    settings: &Settings,
    doc_dir: &Path,
) -> Result<ProcessedDiagrams, DiagramError> {
    let mut warnings = Vec::new();
    let options = DiagramOptions::resolve(&document.frontmatter().diagrams, settings, &mut warnings);
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Diagram option warning");
    }

    let mut processed = DiagramPipeline::new(runner, paths, options)
        .link_base(doc_dir)
        .process(document.body())?;
    warnings.append(&mut processed.warnings);
    processed.warnings = warnings;
    Ok(processed)
}
