//! Project creation.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use docgen_config::{Config, ProjectPaths, Workspace};

use crate::ScaffoldError;
use crate::doc_type::{DocType, SectionToggles};
use crate::templates::{TemplateContext, TemplateSet};

/// What a scaffold run created.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub doc_type: DocType,
    pub paths: ProjectPaths,
    /// Rendered document.
    pub document: PathBuf,
    /// An existing document was replaced.
    pub overwritten: bool,
    /// Templates taken from the workspace instead of the built-in set.
    pub overridden_templates: Vec<String>,
}

/// Creates a project and its first document.
///
/// Everything that can fail without touching the filesystem (document type,
/// project name, configuration, templates) is checked before any directory
/// is created.
///
/// # Example
///
/// ```ignore
/// use docgen_config::Workspace;
/// use docgen_scaffold::Scaffolder;
///
/// let workspace = Workspace::discover(None);
/// let report = Scaffolder::new(&workspace)
///     .title("Payments Platform")
///     .scaffold("payments", "tech-spec")?;
/// println!("{}", report.document.display());
/// ```
#[derive(Debug, Clone)]
pub struct Scaffolder<'a> {
    workspace: &'a Workspace,
    title: Option<String>,
    client: Option<String>,
    date: Option<NaiveDate>,
    force: bool,
}

impl<'a> Scaffolder<'a> {
    #[must_use]
    pub fn new(workspace: &'a Workspace) -> Self {
        Self {
            workspace,
            title: None,
            client: None,
            date: None,
            force: false,
        }
    }

    /// Document title. Empty titles fall back to the project name.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        let title: String = title.into();
        self.title = Some(title).filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    /// Document date (defaults to today).
    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Replace an existing document.
    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Create `projects/<project>/` and render its `<doc_type>` document.
    pub fn scaffold(&self, project: &str, doc_type: &str) -> Result<ScaffoldReport, ScaffoldError> {
        let doc_type: DocType = doc_type.parse()?;
        validate_project_name(project)?;

        let paths = self.workspace.project_paths(project);
        let document = paths.docs.join(format!("{project}-{doc_type}.md"));
        let overwritten = document.exists();
        if overwritten && !self.force {
            return Err(ScaffoldError::AlreadyExists(document));
        }

        let config = Config::load(self.workspace, Some(&paths))?;
        let settings = &config.settings;
        let context = TemplateContext {
            title: self.title.clone().unwrap_or_else(|| title_case(project)),
            author: settings.require_author()?.to_owned(),
            date: self
                .date
                .unwrap_or_else(|| Local::now().date_naive())
                .format("%Y-%m-%d")
                .to_string(),
            client: self.client.clone().unwrap_or_default(),
            project: project.to_owned(),
            company: settings.company().to_owned(),
            email: settings.email().to_owned(),
            mermaid_theme: settings.mermaid_theme().to_owned(),
            export_format: settings.export_format().to_owned(),
            paper_size: settings.paper_size().to_owned(),
            margin: settings.margin().to_owned(),
            accent_color: settings.accent_color().to_owned(),
            sections: SectionToggles::for_doc_type(doc_type),
        };
        let templates = TemplateSet::load(self.workspace)?;
        let rendered = templates.render(doc_type.template_name(), &context)?;

        for dir in paths.all() {
            std::fs::create_dir_all(dir).map_err(|e| ScaffoldError::io(dir, e))?;
        }
        std::fs::write(&document, rendered).map_err(|e| ScaffoldError::io(&document, e))?;

        tracing::info!(
            project = %project,
            doc_type = %doc_type,
            document = %document.display(),
            overwritten,
            "Project scaffolded"
        );

        Ok(ScaffoldReport {
            doc_type,
            paths,
            document,
            overwritten,
            overridden_templates: templates.overridden().to_vec(),
        })
    }
}

fn validate_project_name(name: &str) -> Result<(), ScaffoldError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\']);
    if invalid {
        return Err(ScaffoldError::InvalidProjectName(name.to_owned()));
    }
    Ok(())
}

/// `payments-core-v2` -> `Payments Core V2`.
///
/// Each run of letters starts upper case and continues lower case; dashes
/// become spaces.
#[must_use]
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        let c = if c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
