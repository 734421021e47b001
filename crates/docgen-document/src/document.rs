//! Markdown document with a YAML frontmatter block.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::DocumentError;
use crate::frontmatter::Frontmatter;

/// Frontmatter delimiter line.
const DELIMITER: &str = "---";

/// A Markdown body plus its frontmatter.
///
/// The raw metadata mapping is kept alongside the typed [`Frontmatter`] so
/// that re-serialization preserves key order, nested values and keys docgen
/// does not interpret.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    metadata: Mapping,
    frontmatter: Frontmatter,
    body: String,
}

impl Document {
    /// Parse a document from text.
    ///
    /// A frontmatter block opens with a `---` first line and closes at the
    /// next line that is exactly `---`. Blank lines between the closing
    /// delimiter and the body are dropped. Text without an opening delimiter
    /// (or without a closing one) is treated as body only.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let Some((yaml, body)) = split_frontmatter(text) else {
            return Ok(Self {
                body: text.to_owned(),
                ..Self::default()
            });
        };

        let metadata = parse_mapping(yaml)?;
        let frontmatter = serde_yaml::from_value(Value::Mapping(metadata.clone()))
            .map_err(|e| DocumentError::Parse(format!("Invalid frontmatter: {e}")))?;

        Ok(Self {
            metadata,
            frontmatter,
            body: body.trim_start_matches(['\r', '\n']).to_owned(),
        })
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Typed frontmatter.
    #[must_use]
    pub fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    /// Raw metadata mapping, in source order.
    #[must_use]
    pub fn metadata(&self) -> &Mapping {
        &self.metadata
    }

    /// Document body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replace the body, keeping the metadata.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Title from frontmatter, or `default`.
    #[must_use]
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.frontmatter.title.as_deref().unwrap_or(default)
    }

    /// Serialize back to Markdown with frontmatter.
    ///
    /// The whole metadata block is written with a YAML serializer rather
    /// than field by field, so numbers, lists and nested mappings survive.
    /// A document without metadata is written as its body alone.
    pub fn to_markdown(&self) -> Result<String, DocumentError> {
        if self.metadata.is_empty() {
            return Ok(self.body.clone());
        }
        let yaml = serde_yaml::to_string(&self.metadata)
            .map_err(|e| DocumentError::Serialize(e.to_string()))?;
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n\n{}", self.body))
    }
}

/// Split text into frontmatter YAML and the remainder.
fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix(DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_mapping(yaml: &str) -> Result<Mapping, DocumentError> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str(yaml) {
        Ok(Value::Mapping(mapping)) => Ok(mapping),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(DocumentError::Parse(
            "Frontmatter must be a mapping of keys to values".to_owned(),
        )),
        Err(e) => Err(DocumentError::Parse(format!("Invalid YAML: {e}"))),
    }
}
