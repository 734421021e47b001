//! Document templates.
//!
//! Templates ship inside the binary. A file with the same relative name under
//! the workspace `templates/` directory replaces the built-in one, and extra
//! `*.md.j2` files under `templates/partials/` become includable.

use std::path::Path;

use docgen_config::Workspace;
use minijinja::Environment;
use serde::Serialize;

use crate::ScaffoldError;
use crate::doc_type::SectionToggles;

const EMBEDDED: &[(&str, &str)] = &[
    ("tech-spec.md.j2", include_str!("templates/tech-spec.md.j2")),
    ("proposal.md.j2", include_str!("templates/proposal.md.j2")),
    ("sow.md.j2", include_str!("templates/sow.md.j2")),
    ("architecture.md.j2", include_str!("templates/architecture.md.j2")),
    ("partials/frontmatter.md.j2", include_str!("templates/partials/frontmatter.md.j2")),
    ("partials/revision-history.md.j2", include_str!("templates/partials/revision-history.md.j2")),
    ("partials/executive-summary.md.j2", include_str!("templates/partials/executive-summary.md.j2")),
    ("partials/risk-assessment.md.j2", include_str!("templates/partials/risk-assessment.md.j2")),
    ("partials/timeline.md.j2", include_str!("templates/partials/timeline.md.j2")),
    ("partials/acceptance-criteria.md.j2", include_str!("templates/partials/acceptance-criteria.md.j2")),
    ("partials/budget.md.j2", include_str!("templates/partials/budget.md.j2")),
    ("partials/glossary.md.j2", include_str!("templates/partials/glossary.md.j2")),
    ("partials/references.md.j2", include_str!("templates/partials/references.md.j2")),
    ("partials/appendix.md.j2", include_str!("templates/partials/appendix.md.j2")),
    ("partials/closing.md.j2", include_str!("templates/partials/closing.md.j2")),
];

const TEMPLATE_SUFFIX: &str = ".md.j2";

/// Values available to every template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub title: String,
    pub author: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    pub client: String,
    pub project: String,
    pub company: String,
    pub email: String,
    pub mermaid_theme: String,
    pub export_format: String,
    pub paper_size: String,
    pub margin: String,
    pub accent_color: String,
    pub sections: SectionToggles,
}

/// Template sources keyed by relative name (`proposal.md.j2`,
/// `partials/budget.md.j2`).
#[derive(Debug, Clone)]
pub struct TemplateSet {
    sources: Vec<(String, String)>,
    overridden: Vec<String>,
}

impl TemplateSet {
    /// Built-in templates only.
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            sources: EMBEDDED
                .iter()
                .map(|(name, source)| ((*name).to_owned(), (*source).to_owned()))
                .collect(),
            overridden: Vec::new(),
        }
    }

    /// Built-in templates with workspace overrides applied.
    pub fn load(workspace: &Workspace) -> Result<Self, ScaffoldError> {
        let mut set = Self::embedded();
        let templates_dir = workspace.templates_dir();

        for (name, source) in &mut set.sources {
            let path = templates_dir.join(name.as_str());
            if path.is_file() {
                *source = read(&path)?;
                tracing::debug!(template = %name, path = %path.display(), "Using workspace template");
                set.overridden.push(name.clone());
            }
        }

        let partials_dir = workspace.partials_dir();
        if partials_dir.is_dir() {
            let entries = std::fs::read_dir(&partials_dir).map_err(|e| ScaffoldError::io(&partials_dir, e))?;
            let mut extra = Vec::new();
            for entry in entries {
                let path = entry.map_err(|e| ScaffoldError::io(&partials_dir, e))?.path();
                let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                let name = format!("partials/{file_name}");
                if !file_name.ends_with(TEMPLATE_SUFFIX) || !path.is_file() || set.contains(&name) {
                    continue;
                }
                extra.push((name, read(&path)?));
            }
            extra.sort();
            set.sources.extend(extra);
        }

        Ok(set)
    }

    /// Whether a template with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sources.iter().any(|(n, _)| n == name)
    }

    /// Names replaced by workspace files.
    #[must_use]
    pub fn overridden(&self) -> &[String] {
        &self.overridden
    }

    /// Render `name` with `context`.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String, ScaffoldError> {
        let env = self.environment()?;
        let template = env
            .get_template(name)
            .map_err(|e| ScaffoldError::template(name, e))?;
        template
            .render(context)
            .map_err(|e| ScaffoldError::template(name, e))
    }

    fn environment(&self) -> Result<Environment<'_>, ScaffoldError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("yaml_str", yaml_str);
        for (name, source) in &self.sources {
            env.add_template(name, source)
                .map_err(|e| ScaffoldError::template(name, e))?;
        }
        Ok(env)
    }
}

/// Double-quoted YAML scalar.
fn yaml_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn read(path: &Path) -> Result<String, ScaffoldError> {
    std::fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc_type::DocType;
    use pretty_assertions::assert_eq;

    fn context(doc_type: DocType) -> TemplateContext {
        TemplateContext {
            title: "Payments \"Core\" Platform".to_owned(),
            author: "Jane Doe".to_owned(),
            date: "2026-03-02".to_owned(),
            client: String::new(),
            project: "payments".to_owned(),
            company: "Acme".to_owned(),
            email: String::new(),
            mermaid_theme: "forest".to_owned(),
            export_format: "svg".to_owned(),
            paper_size: "A4".to_owned(),
            margin: "2cm".to_owned(),
            accent_color: "#2563eb".to_owned(),
            sections: SectionToggles::for_doc_type(doc_type),
        }
    }

    #[test]
    fn test_yaml_str_escapes() {
        assert_eq!(yaml_str("plain"), "\"plain\"");
        assert_eq!(yaml_str("say \"hi\"\\"), "\"say \\\"hi\\\"\\\\\"");
    }

    #[test]
    fn test_every_doc_type_renders() {
        let set = TemplateSet::embedded();
        for doc_type in DocType::ALL {
            let text = set.render(doc_type.template_name(), &context(doc_type)).unwrap();
            assert!(text.starts_with("---\ntitle: \"Payments \\\"Core\\\" Platform\"\n"), "{doc_type}");
            assert!(text.contains("\n# Payments \"Core\" Platform\n"), "{doc_type}");
            assert!(!text.contains("{%"), "{doc_type}");
        }
    }

    #[test]
    fn test_section_toggles_control_output() {
        let set = TemplateSet::embedded();

        let proposal = set.render("proposal.md.j2", &context(DocType::Proposal)).unwrap();
        assert!(proposal.contains("## Budget"));
        assert!(!proposal.contains("## Glossary"));

        let architecture = set
            .render("architecture.md.j2", &context(DocType::Architecture))
            .unwrap();
        assert!(architecture.contains("## Glossary"));
        assert!(architecture.contains("```mermaid\ngraph LR"));
        assert!(!architecture.contains("## Timeline"));

        let sow = set.render("sow.md.j2", &context(DocType::Sow)).unwrap();
        assert!(!sow.contains("## Executive Summary"));
        assert!(sow.contains("- **Provider:** Acme"));
    }

    #[test]
    fn test_workspace_override_and_extra_partial() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path());
        std::fs::create_dir_all(workspace.partials_dir()).unwrap();
        std::fs::write(
            workspace.templates_dir().join("sow.md.j2"),
            "# SOW for {{ project }}\n{% include \"partials/legal.md.j2\" %}",
        )
        .unwrap();
        std::fs::write(workspace.partials_dir().join("legal.md.j2"), "Terms apply.\n").unwrap();
        std::fs::write(workspace.partials_dir().join("notes.txt"), "ignored").unwrap();

        let set = TemplateSet::load(&workspace).unwrap();

        assert_eq!(set.overridden(), ["sow.md.j2".to_owned()]);
        assert!(set.contains("partials/legal.md.j2"));
        assert!(!set.contains("partials/notes.txt"));
        assert_eq!(
            set.render("sow.md.j2", &context(DocType::Sow)).unwrap(),
            "# SOW for payments\nTerms apply.\n"
        );
    }

    #[test]
    fn test_template_syntax_error_names_template() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path());
        std::fs::create_dir_all(workspace.templates_dir()).unwrap();
        std::fs::write(workspace.templates_dir().join("proposal.md.j2"), "{% if %}").unwrap();

        let set = TemplateSet::load(&workspace).unwrap();
        let err = set
            .render("proposal.md.j2", &context(DocType::Proposal))
            .unwrap_err();

        assert!(err.to_string().contains("proposal.md.j2"));
    }
}
