//! Mermaid Gantt chart generation.
//!
//! Builds the text of a fenced mermaid `gantt` block from structured phase
//! and task data, ready to paste into a document (where the pipeline
//! renders it like any other mermaid block).

use std::fmt;

use chrono::{Days, NaiveDate};

/// Mermaid date format used when none is given.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Task state modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Done,
    Active,
    Crit,
}

impl TaskStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Active => "active",
            Self::Crit => "crit",
        }
    }
}

/// When a task starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStart {
    /// Calendar date, written in ISO form.
    Date(NaiveDate),
    /// Raw mermaid expression (e.g. `after design`).
    Text(String),
}

impl fmt::Display for TaskStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<NaiveDate> for TaskStart {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

/// How long a task runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDuration {
    /// Number of days, written as `<n>d`.
    Days(u32),
    /// Raw mermaid expression, typically an end date.
    Text(String),
}

impl fmt::Display for TaskDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days}d"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<u32> for TaskDuration {
    fn from(days: u32) -> Self {
        Self::Days(days)
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GanttTask {
    pub name: String,
    pub start: TaskStart,
    pub duration: TaskDuration,
    pub status: Option<TaskStatus>,
    /// Render as a milestone diamond.
    pub milestone: bool,
}

impl GanttTask {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        start: impl Into<TaskStart>,
        duration: impl Into<TaskDuration>,
    ) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            duration: duration.into(),
            status: None,
            milestone: false,
        }
    }

    #[must_use]
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn milestone(mut self) -> Self {
        self.milestone = true;
        self
    }

    fn write_line(&self, out: &mut String) {
        out.push_str("    ");
        out.push_str(&self.name);
        out.push(':');

        let mut modifiers = Vec::new();
        if self.milestone {
            modifiers.push("milestone");
        }
        if let Some(status) = self.status {
            modifiers.push(status.as_str());
        }
        if !modifiers.is_empty() {
            out.push(' ');
            out.push_str(&modifiers.join(", "));
            out.push(',');
        }

        out.push_str(&format!(" {}, {}", self.start, self.duration));
    }
}

/// A named section of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GanttPhase {
    pub name: String,
    pub tasks: Vec<GanttTask>,
}

impl GanttPhase {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    #[must_use]
    pub fn task(mut self, task: GanttTask) -> Self {
        self.tasks.push(task);
        self
    }
}

/// A complete Gantt chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GanttChart {
    pub title: String,
    /// Mermaid `dateFormat` directive.
    pub date_format: String,
    pub phases: Vec<GanttPhase>,
}

impl GanttChart {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
            phases: Vec::new(),
        }
    }

    #[must_use]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    #[must_use]
    pub fn phase(mut self, phase: GanttPhase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Chart with one single-task section per phase, placed back to back.
    ///
    /// The first phase starts on `start`; each later phase starts the day
    /// the previous one ends (start + duration).
    #[must_use]
    pub fn high_level<S: AsRef<str>>(title: impl Into<String>, start: NaiveDate, phases: &[(S, u32)]) -> Self {
        let mut chart = Self::new(title);
        let mut current = start;
        for (name, days) in phases {
            let name = name.as_ref();
            chart = chart.phase(GanttPhase::new(name).task(GanttTask::new(name, current, *days)));
            current = current
                .checked_add_days(Days::new(u64::from(*days)))
                .unwrap_or(NaiveDate::MAX);
        }
        chart
    }

    /// Render as a fenced mermaid block (no trailing newline).
    #[must_use]
    pub fn to_mermaid(&self) -> String {
        let mut out = String::new();
        out.push_str("```mermaid\ngantt\n");
        out.push_str(&format!("    title {}\n", self.title));
        out.push_str(&format!("    dateFormat {}\n", self.date_format));
        for phase in &self.phases {
            out.push_str(&format!("    section {}\n", phase.name));
            for task in &phase.tasks {
                task.write_line(&mut out);
                out.push('\n');
            }
        }
        out.push_str("```");
        out
    }
}

impl fmt::Display for GanttChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_mermaid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_high_level_sequential_phases() {
        let chart = GanttChart::high_level(
            "Delivery",
            date("2026-01-01"),
            &[("Design", 10), ("Build", 20)],
        );
        assert_eq!(
            chart.to_mermaid(),
            "```mermaid\ngantt\n    title Delivery\n    dateFormat YYYY-MM-DD\n\
             \x20   section Design\n    Design: 2026-01-01, 10d\n\
             \x20   section Build\n    Build: 2026-01-11, 20d\n```"
        );
    }

    #[test]
    fn test_high_level_crosses_month_boundary() {
        let chart = GanttChart::high_level(
            "Plan",
            date("2026-03-01"),
            &[("Discovery", 14), ("Design", 21), ("Implementation", 42)],
        );
        let text = chart.to_mermaid();
        assert!(text.contains("    Design: 2026-03-15, 21d"));
        assert!(text.contains("    Implementation: 2026-04-05, 42d"));
    }

    #[test]
    fn test_task_modifiers() {
        let chart = GanttChart::new("Release")
            .phase(
                GanttPhase::new("Launch")
                    .task(GanttTask::new("Code freeze", date("2026-05-01"), 1_u32).milestone().status(TaskStatus::Crit))
                    .task(
                        GanttTask::new(
                            "Rollout",
                            TaskStart::Text("after freeze".to_owned()),
                            TaskDuration::Text("2026-05-20".to_owned()),
                        )
                        .status(TaskStatus::Active),
                    ),
            );
        let text = chart.to_mermaid();
        assert!(text.contains("    Code freeze: milestone, crit, 2026-05-01, 1d\n"));
        assert!(text.contains("    Rollout: active, after freeze, 2026-05-20\n"));
    }

    #[test]
    fn test_custom_date_format() {
        let chart = GanttChart::new("T").date_format("DD-MM-YYYY");
        assert_eq!(
            chart.to_string(),
            "```mermaid\ngantt\n    title T\n    dateFormat DD-MM-YYYY\n```"
        );
    }

    #[test]
    fn test_generated_chart_is_a_mermaid_block() {
        let text = GanttChart::high_level("T", date("2026-01-01"), &[("Only", 3)]).to_mermaid();
        let blocks = crate::extract::find_mermaid_blocks(&text);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].source.starts_with("gantt\n"));
    }
}
