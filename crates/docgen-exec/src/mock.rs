//! Mock command runner for testing.
//!
//! Provides [`MockRunner`] for exercising the pipelines without invoking
//! real binaries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::command::{CommandOutput, CommandRunner, ExecError, ExternalCommand};
use crate::locate::Tool;

/// A command observed by [`MockRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    /// The command as issued.
    pub command: ExternalCommand,
    /// Contents of every argument that named an existing file at call time.
    ///
    /// Lets tests inspect temporary inputs that are removed after the call.
    pub files: Vec<(PathBuf, String)>,
}

impl RecordedCommand {
    /// Program file name.
    #[must_use]
    pub fn program(&self) -> String {
        self.command.program_name()
    }

    /// Arguments as strings.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        self.command.args_lossy()
    }

    /// Value following `flag` in the argument list.
    #[must_use]
    pub fn flag_value(&self, flag: &str) -> Option<String> {
        let args = self.args();
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    }
}

/// Command runner that records commands instead of executing them.
///
/// # Example
///
/// ```ignore
/// use docgen_exec::{CommandRunner, ExternalCommand, MockRunner};
///
/// let runner = MockRunner::new().with_failure("pandoc", "pandoc: unknown option");
/// assert!(runner.run(&ExternalCommand::new("pandoc")).is_err());
/// assert_eq!(runner.calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockRunner {
    calls: RwLock<Vec<RecordedCommand>>,
    failures: RwLock<HashMap<String, String>>,
    missing: RwLock<Vec<Tool>>,
    create_outputs: bool,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command for `program` fail with the given diagnostics.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, program: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(program.into(), diagnostics.into());
        self
    }

    /// Make [`CommandRunner::locate`] report `tool` as not installed.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn without_tool(self, tool: Tool) -> Self {
        self.missing.write().unwrap().push(tool);
        self
    }

    /// Write an empty file at the path following `-o`/`--output` on each
    /// successful call.
    #[must_use]
    pub fn creating_outputs(mut self) -> Self {
        self.create_outputs = true;
        self
    }

    /// All commands run so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls.read().unwrap().clone()
    }

    /// Commands run for one program.
    #[must_use]
    pub fn calls_to(&self, program: &str) -> Vec<RecordedCommand> {
        self.calls()
            .into_iter()
            .filter(|c| c.program() == program)
            .collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &ExternalCommand) -> Result<CommandOutput, ExecError> {
        let files = command
            .args
            .iter()
            .map(Path::new)
            .filter(|p| p.is_file())
            .filter_map(|p| {
                std::fs::read_to_string(p)
                    .ok()
                    .map(|content| (p.to_path_buf(), content))
            })
            .collect();
        let recorded = RecordedCommand {
            command: command.clone(),
            files,
        };

        let program = command.program_name();
        let failure = self.failures.read().unwrap().get(&program).cloned();
        let output_path = recorded
            .flag_value("-o")
            .or_else(|| recorded.flag_value("--output"));
        self.calls.write().unwrap().push(recorded);

        if let Some(diagnostics) = failure {
            return Err(ExecError::Failed {
                program,
                code: Some(1),
                diagnostics,
            });
        }

        if self.create_outputs
            && let Some(path) = output_path
        {
            let _ = std::fs::write(path, b"");
        }

        Ok(CommandOutput::default())
    }

    fn locate(&self, tool: Tool) -> Result<PathBuf, ExecError> {
        if self.missing.read().unwrap().contains(&tool) {
            return Err(ExecError::NotFound {
                program: tool.program().to_owned(),
                hint: tool.install_hint().to_owned(),
            });
        }
        Ok(PathBuf::from(tool.program()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_records_commands_in_order() {
        let runner = MockRunner::new();
        runner.run(&ExternalCommand::new("mmdc").arg("a")).unwrap();
        runner.run(&ExternalCommand::new("pandoc").arg("b")).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program(), "mmdc");
        assert_eq!(calls[1].args(), vec!["b"]);
        assert_eq!(runner.calls_to("pandoc").len(), 1);
    }

    #[test]
    fn test_configured_failure() {
        let runner = MockRunner::new().with_failure("pandoc", "Unknown option --foo");
        let err = runner
            .run(&ExternalCommand::new("/usr/bin/pandoc"))
            .unwrap_err();
        assert!(err.to_string().contains("Unknown option --foo"));
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_snapshots_file_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mmd");
        std::fs::write(&input, "graph TD\nA-->B\n").unwrap();

        let runner = MockRunner::new();
        runner
            .run(&ExternalCommand::new("mmdc").arg("-i").arg(&input))
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].files, vec![(input, "graph TD\nA-->B\n".to_owned())]);
    }

    #[test]
    fn test_locate_and_missing_tool() {
        let runner = MockRunner::new().without_tool(Tool::DrawIo);
        assert_eq!(runner.locate(Tool::Mermaid).unwrap(), PathBuf::from("mmdc"));
        assert!(matches!(
            runner.locate(Tool::DrawIo),
            Err(ExecError::NotFound { .. })
        ));
    }

    #[test]
    fn test_creating_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.png");
        let runner = MockRunner::new().creating_outputs();
        runner
            .run(&ExternalCommand::new("mmdc").arg("-o").arg(&out))
            .unwrap();
        assert!(out.is_file());
    }
}
