//! Diagram kinds and output formats.

use std::fmt;

/// Source kind of a rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    /// Fenced ```` ```mermaid ```` block inside the document.
    Mermaid,
    /// External `.drawio` file listed in frontmatter.
    DrawIo,
}

impl DiagramKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
            Self::DrawIo => "drawio",
        }
    }
}

/// Image format for rendered diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramFormat {
    /// Raster image (default).
    #[default]
    Png,
    /// Vector image.
    Svg,
}

impl DiagramFormat {
    /// Parse a format name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    /// Format name, also used as the file extension.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for DiagramFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(DiagramFormat::parse("png"), Some(DiagramFormat::Png));
        assert_eq!(DiagramFormat::parse("SVG"), Some(DiagramFormat::Svg));
        assert_eq!(DiagramFormat::parse(" svg "), Some(DiagramFormat::Svg));
        assert_eq!(DiagramFormat::parse("jpeg"), None);
    }

    #[test]
    fn test_default_is_png() {
        assert_eq!(DiagramFormat::default(), DiagramFormat::Png);
        assert_eq!(DiagramFormat::default().to_string(), "png");
    }
}
