//! Mermaid rendering via the `mmdc` CLI.

use std::io::Write;
use std::path::{Path, PathBuf};

use docgen_exec::{CommandRunner, ExternalCommand};

use crate::DiagramError;
use crate::language::DiagramFormat;

/// Renders mermaid source through `mmdc`.
pub(crate) struct MermaidRenderer<'a> {
    pub runner: &'a dyn CommandRunner,
    /// Resolved `mmdc` executable.
    pub program: PathBuf,
    pub theme: &'a str,
    pub format: DiagramFormat,
}

impl MermaidRenderer<'_> {
    /// Render `source` to `<output_dir>/<name>.<format>`.
    ///
    /// The source is written to a temporary `.mmd` file that is removed
    /// whether or not rendering succeeds.
    pub fn render(&self, source: &str, output_dir: &Path, name: &str) -> Result<PathBuf, DiagramError> {
        let mut input = tempfile::Builder::new()
            .prefix("docgen-")
            .suffix(".mmd")
            .tempfile()
            .map_err(|e| DiagramError::io(std::env::temp_dir(), e))?;
        let input_path = input.path().to_path_buf();
        input
            .write_all(source.as_bytes())
            .and_then(|()| input.flush())
            .map_err(|e| DiagramError::io(&input_path, e))?;

        let output = output_dir.join(format!("{name}.{}", self.format.as_str()));
        let command = ExternalCommand::new(&self.program)
            .arg("-i")
            .arg(&input_path)
            .arg("-o")
            .arg(&output)
            .args(["-t", self.theme])
            .args(["-b", "transparent"])
            .args(["-e", self.format.as_str()]);

        self.runner.run(&command)?;
        tracing::debug!(output = %output.display(), "Rendered mermaid diagram");
        Ok(output)
    }
}
