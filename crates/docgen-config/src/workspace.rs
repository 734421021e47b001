//! Workspace and project directory layout.
//!
//! A docgen workspace is a directory holding the global configuration file,
//! optional template overrides, print stylesheets, and one directory per
//! project:
//!
//! ```text
//! <root>/
//! ├── docgen.config.json
//! ├── templates/
//! │   └── partials/
//! ├── styles/
//! │   └── print.css
//! └── projects/
//!     └── <name>/
//!         ├── docgen.config.json   (optional overrides)
//!         ├── docs/
//!         ├── diagrams/
//!         │   └── exports/
//!         ├── output/
//!         └── assets/
//! ```

use std::path::{Path, PathBuf};

/// Configuration filename, used for both global and project-level files.
pub const CONFIG_FILENAME: &str = "docgen.config.json";

/// Environment variable naming the workspace root (read by the CLI).
pub const ROOT_ENV_VAR: &str = "DOCGEN_ROOT";

const PROJECTS_DIRNAME: &str = "projects";

/// Root of a docgen workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the workspace root.
    ///
    /// Resolution order:
    /// 1. `explicit` (`--root` or `DOCGEN_ROOT`)
    /// 2. the nearest ancestor of the current directory containing
    ///    `docgen.config.json`, skipping project directories
    /// 3. the current directory
    #[must_use]
    pub fn discover(explicit: Option<&Path>) -> Self {
        if let Some(root) = explicit {
            return Self::new(root);
        }
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::discover_from(&cwd).unwrap_or_else(|| Self::new(cwd))
    }

    /// Search `start` and its ancestors for a global configuration file.
    ///
    /// `projects/<name>/docgen.config.json` holds project overrides, not a
    /// workspace root, so a match there is skipped when the directory above
    /// `projects/` has its own configuration file.
    pub(crate) fn discover_from(start: &Path) -> Option<Self> {
        let mut current = start.to_path_buf();
        loop {
            if current.join(CONFIG_FILENAME).is_file() && !is_nested_project(&current) {
                tracing::debug!(root = %current.display(), "Discovered workspace");
                return Some(Self::new(current));
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Workspace root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Global configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILENAME)
    }

    /// Directory holding document template overrides.
    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    /// Directory holding partial template overrides.
    #[must_use]
    pub fn partials_dir(&self) -> PathBuf {
        self.templates_dir().join("partials")
    }

    /// Directory holding print stylesheets.
    #[must_use]
    pub fn styles_dir(&self) -> PathBuf {
        self.root.join("styles")
    }

    /// Main print stylesheet passed to the compositor.
    #[must_use]
    pub fn print_css(&self) -> PathBuf {
        self.styles_dir().join("print.css")
    }

    /// Directory containing all projects.
    #[must_use]
    pub fn projects_dir(&self) -> PathBuf {
        self.root.join(PROJECTS_DIRNAME)
    }

    /// Directory of a single project.
    #[must_use]
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.projects_dir().join(name)
    }

    /// Standard layout of a single project.
    #[must_use]
    pub fn project_paths(&self, name: &str) -> ProjectPaths {
        ProjectPaths::new(self.project_dir(name))
    }

    /// Project whose configuration applies to a document.
    ///
    /// A `project` named in the document metadata selects
    /// `projects/<name>/`; otherwise the project containing the document
    /// is used.
    #[must_use]
    pub fn config_project(&self, named: Option<&str>, containing: &ProjectPaths) -> ProjectPaths {
        match named.map(str::trim) {
            Some(name)
                if !name.is_empty() && !matches!(name, "." | "..") && !name.contains(['/', '\\']) =>
            {
                self.project_paths(name)
            }
            _ => containing.clone(),
        }
    }
}

fn is_nested_project(dir: &Path) -> bool {
    let Some(parent) = dir.parent() else {
        return false;
    };
    parent.file_name().is_some_and(|n| n == PROJECTS_DIRNAME)
        && parent
            .parent()
            .is_some_and(|root| root.join(CONFIG_FILENAME).is_file())
}

/// Standard directories of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Project root.
    pub root: PathBuf,
    /// Markdown sources.
    pub docs: PathBuf,
    /// Diagram sources (e.g. `.drawio` files).
    pub diagrams: PathBuf,
    /// Rendered diagram images.
    pub diagram_exports: PathBuf,
    /// Exported PDFs.
    pub output: PathBuf,
    /// Static assets referenced by documents.
    pub assets: PathBuf,
}

impl ProjectPaths {
    /// Derive the layout from a project root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let diagrams = root.join("diagrams");
        Self {
            docs: root.join("docs"),
            diagram_exports: diagrams.join("exports"),
            diagrams,
            output: root.join("output"),
            assets: root.join("assets"),
            root,
        }
    }

    /// Derive the layout from a document inside `<project>/docs/`.
    ///
    /// Falls back to the document's own directory when it has no grandparent.
    #[must_use]
    pub fn for_document(doc_path: &Path) -> Self {
        let doc_dir = doc_path.parent().unwrap_or(Path::new("."));
        Self::new(doc_dir.parent().unwrap_or(doc_dir))
    }

    /// Project-level configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILENAME)
    }

    /// Project name derived from the root directory name.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Every directory of the layout, parents before children.
    #[must_use]
    pub fn all(&self) -> [&Path; 6] {
        [
            &self.root,
            &self.docs,
            &self.diagrams,
            &self.diagram_exports,
            &self.output,
            &self.assets,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_workspace_paths() {
        let ws = Workspace::new("/work");
        assert_eq!(ws.config_path(), PathBuf::from("/work/docgen.config.json"));
        assert_eq!(ws.partials_dir(), PathBuf::from("/work/templates/partials"));
        assert_eq!(ws.print_css(), PathBuf::from("/work/styles/print.css"));
        assert_eq!(ws.project_dir("acme"), PathBuf::from("/work/projects/acme"));
    }

    #[test]
    fn test_project_layout() {
        let paths = Workspace::new("/work").project_paths("acme");
        assert_eq!(paths.docs, PathBuf::from("/work/projects/acme/docs"));
        assert_eq!(
            paths.diagram_exports,
            PathBuf::from("/work/projects/acme/diagrams/exports")
        );
        assert_eq!(paths.output, PathBuf::from("/work/projects/acme/output"));
        assert_eq!(paths.assets, PathBuf::from("/work/projects/acme/assets"));
        assert_eq!(paths.name(), Some("acme".to_owned()));
    }

    #[test]
    fn test_layout_for_document() {
        let paths = ProjectPaths::for_document(Path::new("/work/projects/acme/docs/spec.md"));
        assert_eq!(paths.root, PathBuf::from("/work/projects/acme"));
        assert_eq!(
            paths.config_path(),
            PathBuf::from("/work/projects/acme/docgen.config.json")
        );
    }

    #[test]
    fn test_all_lists_parents_first() {
        let paths = ProjectPaths::new("/p");
        let all = paths.all();
        let diagrams = all.iter().position(|p| *p == Path::new("/p/diagrams"));
        let exports = all
            .iter()
            .position(|p| *p == Path::new("/p/diagrams/exports"));
        assert!(diagrams < exports);
        assert_eq!(all[0], Path::new("/p"));
    }

    #[test]
    fn test_discover_from_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "{}").unwrap();
        let nested = dir.path().join("projects/acme/docs");
        std::fs::create_dir_all(&nested).unwrap();

        let ws = Workspace::discover_from(&nested).unwrap();
        assert_eq!(ws.root(), dir.path());
    }

    #[test]
    fn test_discover_from_project_dir_finds_workspace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), r#"{"author": "Global"}"#).unwrap();
        let project = dir.path().join("projects/acme");
        std::fs::create_dir_all(project.join("docs")).unwrap();
        std::fs::write(project.join(CONFIG_FILENAME), r#"{"company": "Acme"}"#).unwrap();

        for start in [project.join("docs"), project] {
            let ws = Workspace::discover_from(&start).unwrap();
            assert_eq!(ws.root(), dir.path());
        }
    }

    #[test]
    fn test_discover_standalone_projects_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("projects/acme");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join(CONFIG_FILENAME), "{}").unwrap();

        let ws = Workspace::discover_from(&nested).unwrap();
        assert_eq!(ws.root(), nested);
    }

    #[test]
    fn test_config_project_from_metadata() {
        let ws = Workspace::new("/work");
        let containing = ws.project_paths("acme");

        assert_eq!(
            ws.config_project(Some("other"), &containing).root,
            PathBuf::from("/work/projects/other")
        );
        for named in [None, Some(""), Some("  "), Some("../x"), Some("..")] {
            assert_eq!(ws.config_project(named, &containing), containing, "{named:?}");
        }
    }

    #[test]
    fn test_discover_explicit_root_wins() {
        let ws = Workspace::discover(Some(Path::new("/explicit")));
        assert_eq!(ws.root(), Path::new("/explicit"));
    }
}
