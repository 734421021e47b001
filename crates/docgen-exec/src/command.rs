//! Command description, runner trait and the subprocess runner.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::locate::Tool;

/// An external command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    /// Program path or name.
    pub program: PathBuf,
    /// Arguments, in order.
    pub args: Vec<OsString>,
    /// Working directory (inherits the current directory when `None`).
    pub cwd: Option<PathBuf>,
}

impl ExternalCommand {
    /// Create a command with no arguments.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Set the working directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Program file name, for messages.
    #[must_use]
    pub fn program_name(&self) -> String {
        self.program.file_name().map_or_else(
            || self.program.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        )
    }

    /// Arguments as lossy UTF-8 strings.
    #[must_use]
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured output of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Error running an external command.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// Executable could not be found.
    #[error("{program} not found. {hint}")]
    NotFound {
        program: String,
        /// Installation hint.
        hint: String,
    },
    /// Command ran and exited unsuccessfully.
    #[error("{program} failed ({}): {}", exit_label(.code.as_ref()), .diagnostics.trim())]
    Failed {
        program: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Diagnostic output captured from the command.
        diagnostics: String,
    },
    /// Command could not be started.
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

fn exit_label(code: Option<&i32>) -> String {
    code.map_or_else(|| "terminated by signal".to_owned(), |c| format!("exit {c}"))
}

/// Executes external commands.
///
/// Implementations block until the command completes. There is no timeout,
/// retry or cancellation.
pub trait CommandRunner {
    /// Run a command to completion.
    ///
    /// Returns the captured output on a zero exit status and
    /// [`ExecError::Failed`] otherwise.
    fn run(&self, command: &ExternalCommand) -> Result<CommandOutput, ExecError>;

    /// Resolve the executable for a tool.
    fn locate(&self, tool: Tool) -> Result<PathBuf, ExecError> {
        tool.locate()
    }
}

/// Runs commands as blocking subprocesses.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ExternalCommand) -> Result<CommandOutput, ExecError> {
        tracing::debug!(command = %command, "Running external command");

        let mut process = Command::new(&command.program);
        process.args(&command.args);
        if let Some(dir) = &command.cwd {
            process.current_dir(dir);
        }

        let output = process.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExecError::NotFound {
                    program: command.program.display().to_string(),
                    hint: not_found_hint(&command.program),
                }
            } else {
                ExecError::Spawn {
                    program: command.program_name(),
                    source: e,
                }
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(CommandOutput { stdout, stderr })
        } else {
            // Some tools report errors on stdout only
            let diagnostics = if stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            };
            Err(ExecError::Failed {
                program: command.program_name(),
                code: output.status.code(),
                diagnostics,
            })
        }
    }
}

fn not_found_hint(program: &Path) -> String {
    let name = program.file_name().unwrap_or(program.as_os_str());
    Tool::from_program(&name.to_string_lossy())
        .map_or_else(|| "Check that it is installed and on PATH.".to_owned(), |t| {
            t.install_hint().to_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_and_display() {
        let cmd = ExternalCommand::new("/usr/bin/pandoc")
            .arg("in.md")
            .args(["-o", "out.pdf"])
            .current_dir("/tmp");
        assert_eq!(cmd.to_string(), "/usr/bin/pandoc in.md -o out.pdf");
        assert_eq!(cmd.program_name(), "pandoc");
        assert_eq!(cmd.args_lossy(), vec!["in.md", "-o", "out.pdf"]);
        assert_eq!(cmd.cwd, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_failed_error_message_includes_diagnostics() {
        let err = ExecError::Failed {
            program: "mmdc".to_owned(),
            code: Some(1),
            diagnostics: "Parse error on line 2\n".to_owned(),
        };
        assert_eq!(err.to_string(), "mmdc failed (exit 1): Parse error on line 2");
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let cmd = ExternalCommand::new("docgen-definitely-not-a-real-binary");
        let err = SystemRunner.run(&cmd).unwrap_err();
        assert!(matches!(err, ExecError::NotFound { .. }), "got {err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_success_and_failure() {
        let ok = SystemRunner
            .run(&ExternalCommand::new("sh").args(["-c", "echo hello"]))
            .unwrap();
        assert_eq!(ok.stdout.trim(), "hello");

        let err = SystemRunner
            .run(&ExternalCommand::new("sh").args(["-c", "echo boom >&2; exit 3"]))
            .unwrap_err();
        match err {
            ExecError::Failed {
                program,
                code,
                diagnostics,
            } => {
                assert_eq!(program, "sh");
                assert_eq!(code, Some(3));
                assert_eq!(diagnostics.trim(), "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_uses_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let out = SystemRunner
            .run(&ExternalCommand::new("pwd").current_dir(dir.path()))
            .unwrap();
        let reported = PathBuf::from(out.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
