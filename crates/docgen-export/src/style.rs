//! Page-level stylesheet generated per export.
//!
//! Paper size, margin and accent colour come from the document's `export`
//! frontmatter block, falling back to configuration defaults. They are
//! written as a small stylesheet passed to the compositor after the
//! workspace's `print.css`, so `print.css` can use `var(--accent-color)`.

use std::fmt::Write;

use docgen_config::Settings;
use docgen_document::ExportMeta;

/// Resolved page settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStyle {
    pub paper_size: String,
    pub margin: String,
    pub accent_color: String,
}

impl PageStyle {
    /// Frontmatter values first, then configuration.
    #[must_use]
    pub fn resolve(meta: &ExportMeta, settings: &Settings) -> Self {
        Self {
            paper_size: meta
                .paper_size
                .clone()
                .unwrap_or_else(|| settings.paper_size().to_owned()),
            margin: meta
                .margin
                .clone()
                .unwrap_or_else(|| settings.margin().to_owned()),
            accent_color: meta
                .accent_color
                .clone()
                .unwrap_or_else(|| settings.accent_color().to_owned()),
        }
    }

    /// Stylesheet text.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::with_capacity(128);
        let _ = writeln!(css, "@page {{");
        let _ = writeln!(css, "  size: {};", self.paper_size);
        let _ = writeln!(css, "  margin: {};", self.margin);
        let _ = writeln!(css, "}}");
        let _ = writeln!(css, ":root {{");
        let _ = writeln!(css, "  --accent-color: {};", self.accent_color);
        let _ = writeln!(css, "}}");
        css
    }
}
