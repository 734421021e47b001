//! Per-document diagram options.

use docgen_config::Settings;
use docgen_document::DiagramsMeta;

use crate::language::DiagramFormat;

/// Options for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramOptions {
    /// Mermaid theme passed to the renderer.
    pub theme: String,
    /// Output image format for every diagram.
    pub format: DiagramFormat,
    /// draw.io files relative to the project's `diagrams/` directory.
    pub drawio_files: Vec<String>,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            theme: docgen_config::DEFAULT_MERMAID_THEME.to_owned(),
            format: DiagramFormat::default(),
            drawio_files: Vec::new(),
        }
    }
}

impl DiagramOptions {
    /// Resolve options from frontmatter, falling back to configuration.
    ///
    /// An unrecognized format adds a warning and falls back to PNG.
    #[must_use]
    pub fn resolve(meta: &DiagramsMeta, settings: &Settings, warnings: &mut Vec<String>) -> Self {
        let theme = meta
            .mermaid_theme
            .as_deref()
            .unwrap_or_else(|| settings.mermaid_theme())
            .to_owned();

        let format_name = meta
            .export_format
            .as_deref()
            .unwrap_or_else(|| settings.export_format());
        let format = DiagramFormat::parse(format_name).unwrap_or_else(|| {
            warnings.push(format!(
                "unknown diagram export format '{format_name}', using default 'png' (valid: png, svg)"
            ));
            DiagramFormat::default()
        });

        Self {
            theme,
            format,
            drawio_files: meta.drawio_files.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_frontmatter_wins_over_config() {
        let meta = DiagramsMeta {
            mermaid_theme: Some("forest".to_owned()),
            export_format: Some("svg".to_owned()),
            drawio_files: vec!["a.drawio".to_owned()],
        };
        let settings = Settings {
            mermaid_theme: Some("dark".to_owned()),
            default_export_format: Some("png".to_owned()),
            ..Settings::default()
        };
        let mut warnings = Vec::new();
        let options = DiagramOptions::resolve(&meta, &settings, &mut warnings);
        assert_eq!(options.theme, "forest");
        assert_eq!(options.format, DiagramFormat::Svg);
        assert_eq!(options.drawio_files, vec!["a.drawio"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_config_fallback() {
        let settings = Settings {
            mermaid_theme: Some("neutral".to_owned()),
            default_export_format: Some("svg".to_owned()),
            ..Settings::default()
        };
        let mut warnings = Vec::new();
        let options = DiagramOptions::resolve(&DiagramsMeta::default(), &settings, &mut warnings);
        assert_eq!(options.theme, "neutral");
        assert_eq!(options.format, DiagramFormat::Svg);
    }

    #[test]
    fn test_builtin_defaults() {
        let mut warnings = Vec::new();
        let options =
            DiagramOptions::resolve(&DiagramsMeta::default(), &Settings::default(), &mut warnings);
        assert_eq!(options, DiagramOptions::default());
    }

    #[test]
    fn test_unknown_format_warns() {
        let meta = DiagramsMeta {
            export_format: Some("gif".to_owned()),
            ..DiagramsMeta::default()
        };
        let mut warnings = Vec::new();
        let options = DiagramOptions::resolve(&meta, &Settings::default(), &mut warnings);
        assert_eq!(options.format, DiagramFormat::Png);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("gif"));
    }
}
