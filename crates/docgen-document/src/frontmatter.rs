//! Typed view of the frontmatter keys docgen understands.
//!
//! Reading is lenient: a scalar of any type is accepted where text is
//! expected (`title: 2026`), and an empty key or block (`toc:`) counts as
//! unset.

use std::collections::BTreeMap;

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// Recognized frontmatter keys.
///
/// Keys not listed here are still kept in the document's raw metadata and
/// written back on export; they are just not interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    /// Document title, passed to the compositor.
    #[serde(deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Project identifier, used to locate project configuration.
    #[serde(deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Compositor options.
    #[serde(deserialize_with = "null_as_default")]
    pub export: ExportMeta,
    /// Boolean section toggles.
    #[serde(deserialize_with = "null_as_default")]
    pub sections: Sections,
    /// Diagram rendering options.
    #[serde(deserialize_with = "null_as_default")]
    pub diagrams: DiagramsMeta,
}

/// `export:` block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportMeta {
    /// Heading depth included in the table of contents.
    #[serde(deserialize_with = "scalar_depth", skip_serializing_if = "Option::is_none")]
    pub toc_depth: Option<u8>,
    /// Syntax highlighting style name.
    #[serde(deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub highlight_style: Option<String>,
    /// CSS page size (e.g. `A4`, `Letter`).
    #[serde(deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub paper_size: Option<String>,
    /// CSS page margin (e.g. `2cm`).
    #[serde(deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    /// Accent colour exposed to the stylesheet.
    #[serde(deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
}

/// `diagrams:` block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramsMeta {
    /// Mermaid theme.
    #[serde(
        alias = "theme",
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub mermaid_theme: Option<String>,
    /// Image format for rendered diagrams (`png` or `svg`).
    #[serde(
        alias = "format",
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub export_format: Option<String>,
    /// draw.io files relative to the project's `diagrams/` directory.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub drawio_files: Vec<String>,
}

/// `sections:` block of boolean toggles.
///
/// Toggles without a value are left unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sections(BTreeMap<String, bool>);

impl Sections {
    /// Whether a section is enabled, falling back to `default` when unset.
    #[must_use]
    pub fn enabled(&self, name: &str, default: bool) -> bool {
        self.0.get(name).copied().unwrap_or(default)
    }
}

impl<'de> Deserialize<'de> for Sections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let toggles = Option::<BTreeMap<String, Option<bool>>>::deserialize(deserializer)?;
        Ok(Self(
            toggles
                .unwrap_or_default()
                .into_iter()
                .filter_map(|(name, enabled)| Some((name, enabled?)))
                .collect(),
        ))
    }
}

/// An empty key reads as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Any scalar as text. Numbers and booleans keep their YAML spelling.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Tagged(tagged) => scalar_text(tagged.value).map_err(D::Error::custom),
        Value::Sequence(_) => Err(D::Error::invalid_type(Unexpected::Seq, &"a scalar")),
        Value::Mapping(_) => Err(D::Error::invalid_type(Unexpected::Map, &"a scalar")),
    }
}

/// Heading depth given as a number or numeric text.
fn scalar_depth<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let Some(text) = scalar_text(deserializer)? else {
        return Ok(None);
    };
    text.trim()
        .parse()
        .map(Some)
        .map_err(|_| D::Error::invalid_value(Unexpected::Str(&text), &"a heading depth from 1 to 255"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_frontmatter() {
        let yaml = r#"
title: "Payments Platform"
project: payments
export:
  toc_depth: 2
  highlight_style: tango
  paper_size: Letter
sections:
  toc: false
  budget: true
diagrams:
  mermaid_theme: forest
  export_format: svg
  drawio_files:
    - architecture.drawio
    - flows/checkout.drawio
"#;
        let fm: Frontmatter = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Payments Platform"));
        assert_eq!(fm.project.as_deref(), Some("payments"));
        assert_eq!(fm.export.toc_depth, Some(2));
        assert_eq!(fm.export.highlight_style.as_deref(), Some("tango"));
        assert_eq!(fm.export.paper_size.as_deref(), Some("Letter"));
        assert!(!fm.sections.enabled("toc", true));
        assert!(fm.sections.enabled("budget", false));
        assert_eq!(fm.diagrams.mermaid_theme.as_deref(), Some("forest"));
        assert_eq!(fm.diagrams.export_format.as_deref(), Some("svg"));
        assert_eq!(
            fm.diagrams.drawio_files,
            vec!["architecture.drawio", "flows/checkout.drawio"]
        );
    }

    #[test]
    fn test_short_diagram_aliases() {
        let fm: Frontmatter =
            serde_yaml::from_str("diagrams:\n  theme: dark\n  format: png\n").unwrap();
        assert_eq!(fm.diagrams.mermaid_theme.as_deref(), Some("dark"));
        assert_eq!(fm.diagrams.export_format.as_deref(), Some("png"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let fm: Frontmatter =
            serde_yaml::from_str("title: X\nclient: Globex\nversion: 1.2\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("X"));
    }

    #[test]
    fn test_sections_default_fallback() {
        let sections = Sections::default();
        assert!(sections.enabled("toc", true));
        assert!(!sections.enabled("glossary", false));
    }

    #[test]
    fn test_non_string_scalars_become_text() {
        let fm: Frontmatter = serde_yaml::from_str(
            "title: 2026\nproject: 42\nexport:\n  toc_depth: \"2\"\n  margin: 0\ndiagrams:\n  theme: true\n",
        )
        .unwrap();
        assert_eq!(fm.title.as_deref(), Some("2026"));
        assert_eq!(fm.project.as_deref(), Some("42"));
        assert_eq!(fm.export.toc_depth, Some(2));
        assert_eq!(fm.export.margin.as_deref(), Some("0"));
        assert_eq!(fm.diagrams.mermaid_theme.as_deref(), Some("true"));
    }

    #[test]
    fn test_empty_keys_are_unset() {
        let fm: Frontmatter = serde_yaml::from_str(
            "title:\nexport:\nsections:\n  toc:\n  budget: true\ndiagrams:\n  drawio_files:\n",
        )
        .unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(fm.export, ExportMeta::default());
        assert!(fm.sections.enabled("toc", true));
        assert!(!fm.sections.enabled("toc", false));
        assert!(fm.sections.enabled("budget", false));
        assert!(fm.diagrams.drawio_files.is_empty());
    }

    #[test]
    fn test_nested_value_for_text_rejected() {
        let err = serde_yaml::from_str::<Frontmatter>("title:\n  - a\n  - b\n").unwrap_err();
        assert!(err.to_string().contains("a scalar"));
    }
}
