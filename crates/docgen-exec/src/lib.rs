//! External command abstraction for docgen.
//!
//! Every piece of real work in docgen (diagram rendering, document
//! composition, PDF generation) is done by an external binary. This crate
//! provides the seam between the pipelines and those binaries:
//!
//! - [`ExternalCommand`]: program, arguments and working directory
//! - [`CommandRunner`]: executes a command, returning its output or a failure
//! - [`SystemRunner`]: blocking subprocess implementation
//! - [`Tool`]: the binaries docgen knows how to locate
//!
//! With the `mock` feature, [`MockRunner`] records commands instead of
//! running them.
//!
//! # Example
//!
//! ```no_run
//! use docgen_exec::{CommandRunner, ExternalCommand, SystemRunner, Tool};
//!
//! let runner = SystemRunner;
//! let pandoc = runner.locate(Tool::Pandoc)?;
//! let output = runner.run(&ExternalCommand::new(pandoc).arg("--version"))?;
//! assert!(output.stdout.contains("pandoc"));
//! # Ok::<(), docgen_exec::ExecError>(())
//! ```

mod command;
mod locate;
#[cfg(feature = "mock")]
mod mock;

pub use command::{CommandOutput, CommandRunner, ExecError, ExternalCommand, SystemRunner};
pub use locate::{Tool, find_in_path};
#[cfg(feature = "mock")]
pub use mock::{MockRunner, RecordedCommand};
