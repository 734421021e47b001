//! docgen CLI - Business document generator.
//!
//! Provides commands for:
//! - `init`: Scaffold a project and its first document
//! - `diagrams`: Render a document's diagrams
//! - `export`: Render diagrams and export a document to PDF
//! - `gantt`: Print a mermaid Gantt chart for sequential phases

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docgen_config::{ROOT_ENV_VAR, Workspace};
use tracing_subscriber::EnvFilter;

use commands::{DiagramsArgs, ExportArgs, GanttArgs, InitArgs};
use output::Output;

/// docgen - Markdown business documents to styled PDFs.
#[derive(Parser)]
#[command(name = "docgen", version, about)]
struct Cli {
    /// Workspace root (default: $DOCGEN_ROOT, then the nearest directory
    /// containing docgen.config.json).
    #[arg(long, global = true, env = ROOT_ENV_VAR)]
    root: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a project and render its first document.
    Init(InitArgs),
    /// Render the diagrams of a document.
    Diagrams(DiagramsArgs),
    /// Export a document to PDF.
    Export(ExportArgs),
    /// Print a Gantt chart of sequential phases.
    Gantt(GanttArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let workspace = Workspace::discover(cli.root.as_deref());
    tracing::debug!(root = %workspace.root().display(), "Using workspace");

    let result = match cli.command {
        Commands::Init(args) => args.execute(&workspace),
        Commands::Diagrams(args) => args.execute(&workspace),
        Commands::Export(args) => args.execute(&workspace),
        Commands::Gantt(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
