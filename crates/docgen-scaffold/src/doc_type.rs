//! Document types and their default section toggles.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ScaffoldError;

/// Kind of document a project starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocType {
    TechSpec,
    Proposal,
    Sow,
    Architecture,
}

impl DocType {
    /// Every document type, in the order they are listed to users.
    pub const ALL: [Self; 4] = [Self::TechSpec, Self::Proposal, Self::Sow, Self::Architecture];

    /// Command-line tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TechSpec => "tech-spec",
            Self::Proposal => "proposal",
            Self::Sow => "sow",
            Self::Architecture => "architecture",
        }
    }

    /// Template file rendered for this type.
    #[must_use]
    pub fn template_name(self) -> &'static str {
        match self {
            Self::TechSpec => "tech-spec.md.j2",
            Self::Proposal => "proposal.md.j2",
            Self::Sow => "sow.md.j2",
            Self::Architecture => "architecture.md.j2",
        }
    }

    /// Comma-separated list of valid tags.
    #[must_use]
    pub fn valid_tags() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl FromStr for DocType {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ScaffoldError::UnknownDocType {
                tag: s.to_owned(),
                valid: Self::valid_tags(),
            })
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which optional sections a template renders.
///
/// Serialized into the template context as `sections` and written into the
/// scaffolded document's frontmatter, where the exporter reads `toc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct SectionToggles {
    pub toc: bool,
    pub cover_page: bool,
    pub page_numbers: bool,
    pub headers: bool,
    pub executive_summary: bool,
    pub revision_history: bool,
    pub appendix: bool,
    pub glossary: bool,
    pub references: bool,
    pub risk_assessment: bool,
    pub timeline: bool,
    pub budget: bool,
    pub acceptance_criteria: bool,
    pub architecture_diagrams: bool,
}

impl SectionToggles {
    /// Defaults for a document type.
    #[must_use]
    pub fn for_doc_type(doc_type: DocType) -> Self {
        let common = Self {
            toc: true,
            cover_page: true,
            page_numbers: true,
            headers: true,
            executive_summary: true,
            revision_history: true,
            appendix: true,
            glossary: false,
            references: true,
            risk_assessment: true,
            timeline: true,
            budget: false,
            acceptance_criteria: true,
            architecture_diagrams: false,
        };
        match doc_type {
            DocType::TechSpec => Self {
                glossary: true,
                architecture_diagrams: true,
                ..common
            },
            DocType::Proposal => Self {
                budget: true,
                ..common
            },
            DocType::Sow => Self {
                executive_summary: false,
                budget: true,
                ..common
            },
            DocType::Architecture => Self {
                glossary: true,
                timeline: false,
                acceptance_criteria: false,
                architecture_diagrams: true,
                ..common
            },
        }
    }
}
