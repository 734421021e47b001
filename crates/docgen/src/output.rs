//! Colored terminal output utilities.

use console::{Style, Term};
use docgen_diagrams::RenderedDiagram;

/// Terminal output formatter.
///
/// Status messages go to stderr so stdout stays free for generated text.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print every warning, if any.
    pub(crate) fn warnings(&self, warnings: &[String]) {
        for warning in warnings {
            self.warning(&format!("Warning: {warning}"));
        }
    }

    /// Print one rendered diagram.
    pub(crate) fn rendered(&self, diagram: &RenderedDiagram) {
        self.info(&rendered_line(diagram));
    }
}

/// `  mermaid  diagram-1 -> /p/diagrams/exports/diagram-1.png`
fn rendered_line(diagram: &RenderedDiagram) -> String {
    format!(
        "  {:<8} {} -> {}",
        diagram.kind.as_str(),
        diagram.name,
        diagram.path.display()
    )
}
