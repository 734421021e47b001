//! Configuration management for docgen.
//!
//! Configuration lives in `docgen.config.json` files: one global file at the
//! workspace root and an optional file of the same schema in a project
//! directory. Project values overwrite global values key by key; there is
//! no deep merge.
//!
//! Recognized keys (all optional, unknown keys are ignored):
//! `author`, `company`, `email`, `mermaid_theme`, `default_export_format`,
//! `default_paper_size`, `default_margin`, `accent_color`.
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` and `${VAR:-default}`.

mod expand;
mod workspace;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use workspace::{CONFIG_FILENAME, ProjectPaths, ROOT_ENV_VAR, Workspace};

/// Default mermaid theme.
pub const DEFAULT_MERMAID_THEME: &str = "default";
/// Default diagram export format.
pub const DEFAULT_EXPORT_FORMAT: &str = "png";
/// Default paper size.
pub const DEFAULT_PAPER_SIZE: &str = "A4";
/// Default page margin.
pub const DEFAULT_MARGIN: &str = "2cm";
/// Default accent colour.
pub const DEFAULT_ACCENT_COLOR: &str = "#2563eb";

/// Recognized configuration keys.
pub const RECOGNIZED_KEYS: [&str; 8] = [
    "author",
    "company",
    "email",
    "mermaid_theme",
    "default_export_format",
    "default_paper_size",
    "default_margin",
    "accent_color",
];

/// Values from one configuration file.
///
/// All fields are optional. `None` means the key was not set in that file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub author: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub mermaid_theme: Option<String>,
    pub default_export_format: Option<String>,
    pub default_paper_size: Option<String>,
    pub default_margin: Option<String>,
    pub accent_color: Option<String>,
}

impl Settings {
    /// Parse settings from JSON content.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = serde_json::from_str(content)?;
        settings.expand_env_vars()?;
        Ok(settings)
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Every key set in `other` replaces the value in `self`; keys unset in
    /// `other` pass through unchanged.
    #[must_use]
    pub fn overlay(self, other: Self) -> Self {
        Self {
            author: other.author.or(self.author),
            company: other.company.or(self.company),
            email: other.email.or(self.email),
            mermaid_theme: other.mermaid_theme.or(self.mermaid_theme),
            default_export_format: other.default_export_format.or(self.default_export_format),
            default_paper_size: other.default_paper_size.or(self.default_paper_size),
            default_margin: other.default_margin.or(self.default_margin),
            accent_color: other.accent_color.or(self.accent_color),
        }
    }

    /// Author name, required for scaffolding.
    pub fn require_author(&self) -> Result<&str, ConfigError> {
        match self.author.as_deref() {
            Some(author) if !author.trim().is_empty() => Ok(author),
            _ => Err(ConfigError::Validation(
                "author must be set in docgen.config.json".to_owned(),
            )),
        }
    }

    #[must_use]
    pub fn company(&self) -> &str {
        self.company.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn mermaid_theme(&self) -> &str {
        self.mermaid_theme.as_deref().unwrap_or(DEFAULT_MERMAID_THEME)
    }

    #[must_use]
    pub fn export_format(&self) -> &str {
        self.default_export_format
            .as_deref()
            .unwrap_or(DEFAULT_EXPORT_FORMAT)
    }

    #[must_use]
    pub fn paper_size(&self) -> &str {
        self.default_paper_size
            .as_deref()
            .unwrap_or(DEFAULT_PAPER_SIZE)
    }

    #[must_use]
    pub fn margin(&self) -> &str {
        self.default_margin.as_deref().unwrap_or(DEFAULT_MARGIN)
    }

    #[must_use]
    pub fn accent_color(&self) -> &str {
        self.accent_color.as_deref().unwrap_or(DEFAULT_ACCENT_COLOR)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_values(RECOGNIZED_KEYS.into_iter().zip(self.values_mut()))
    }

    /// Values in [`RECOGNIZED_KEYS`] order.
    fn values_mut(&mut self) -> [&mut Option<String>; 8] {
        [
            &mut self.author,
            &mut self.company,
            &mut self.email,
            &mut self.mermaid_theme,
            &mut self.default_export_format,
            &mut self.default_paper_size,
            &mut self.default_margin,
            &mut self.accent_color,
        ]
    }
}

/// Resolved configuration for one invocation.
///
/// Built once at process start and passed by reference to the pipelines.
#[derive(Debug, Clone)]
pub struct Config {
    /// Merged settings (global overlaid with project).
    pub settings: Settings,
    /// Project configuration file, if one was found and applied.
    pub project_config_path: Option<PathBuf>,
}

impl Config {
    /// Load the global configuration and overlay the project configuration.
    ///
    /// The global file is required. The project file
    /// (`<project>/docgen.config.json`) is optional.
    pub fn load(workspace: &Workspace, project: Option<&ProjectPaths>) -> Result<Self, ConfigError> {
        let global_path = workspace.config_path();
        if !global_path.is_file() {
            return Err(ConfigError::NotFound(global_path));
        }
        let mut settings = Self::load_file(&global_path)?;

        let mut project_config_path = None;
        if let Some(project) = project {
            let path = project.config_path();
            if path.is_file() && path != global_path {
                tracing::debug!(path = %path.display(), "Applying project configuration");
                settings = settings.overlay(Self::load_file(&path)?);
                project_config_path = Some(path);
            }
        }

        Ok(Self {
            settings,
            project_config_path,
        })
    }

    fn load_file(path: &Path) -> Result<Settings, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Settings::from_json(&content).map_err(|e| match e {
            ConfigError::Parse(source) => ConfigError::InvalidFile {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// JSON parsing error in a specific file.
    #[error("JSON parse error in {}: {source}", path.display())]
    InvalidFile {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config key (e.g., "author").
        field: String,
        /// Error message (e.g., "${`DOCGEN_AUTHOR`} not set").
        message: String,
    },
}
