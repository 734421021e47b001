//! `docgen gantt` command implementation.

use chrono::{Local, NaiveDate};
use clap::Args;
use console::Term;
use docgen_diagrams::GanttChart;

use crate::error::CliError;

/// Arguments for the gantt command.
#[derive(Args)]
pub(crate) struct GanttArgs {
    /// Chart title.
    #[arg(long, default_value = "Project Timeline")]
    title: String,

    /// First phase start date, YYYY-MM-DD (default: today).
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Phase as NAME:DAYS, in order. Repeat for each phase.
    #[arg(long = "phase", value_name = "NAME:DAYS", value_parser = parse_phase, required = true)]
    phases: Vec<(String, u32)>,
}

impl GanttArgs {
    /// Execute the gantt command.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let start = self.start.unwrap_or_else(|| Local::now().date_naive());
        let chart = GanttChart::high_level(self.title, start, &self.phases);
        Term::stdout().write_line(&chart.to_mermaid())?;
        Ok(())
    }
}

/// Parse `NAME:DAYS`. The name may itself contain colons.
fn parse_phase(value: &str) -> Result<(String, u32), String> {
    let (name, days) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:DAYS, got '{value}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing phase name in '{value}'"));
    }
    let days = days
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of days in '{value}'"))?;
    Ok((name.to_owned(), days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_phase() {
        assert_eq!(parse_phase("Design:21").unwrap(), ("Design".to_owned(), 21));
        assert_eq!(
            parse_phase("Phase 1: Discovery:14").unwrap(),
            ("Phase 1: Discovery".to_owned(), 14)
        );
    }

    #[test]
    fn test_parse_phase_errors() {
        assert!(parse_phase("Design").is_err());
        assert!(parse_phase(":5").is_err());
        assert!(parse_phase("Design:soon").is_err());
        assert!(parse_phase("Design:-3").is_err());
    }
}
