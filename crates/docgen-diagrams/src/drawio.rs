//! draw.io rendering via the draw.io desktop CLI.

use std::path::{Path, PathBuf};

use docgen_exec::{CommandRunner, ExternalCommand};

use crate::DiagramError;
use crate::language::DiagramFormat;

/// Renders `.drawio` files through the draw.io CLI.
pub(crate) struct DrawioRenderer<'a> {
    pub runner: &'a dyn CommandRunner,
    /// Resolved draw.io executable.
    pub program: PathBuf,
    pub format: DiagramFormat,
}

impl DrawioRenderer<'_> {
    /// Render `source` to `<output_dir>/<stem>.<format>`.
    pub fn render(&self, source: &Path, output_dir: &Path) -> Result<PathBuf, DiagramError> {
        let stem = source
            .file_stem()
            .map_or_else(|| "diagram".into(), |s| s.to_string_lossy());
        let output = output_dir.join(format!("{stem}.{}", self.format.as_str()));

        let command = ExternalCommand::new(&self.program)
            .arg("--export")
            .args(["--format", self.format.as_str()])
            .arg("--output")
            .arg(&output)
            .arg(source);

        self.runner.run(&command)?;
        tracing::debug!(
            source = %source.display(),
            output = %output.display(),
            "Rendered draw.io diagram"
        );
        Ok(output)
    }
}
