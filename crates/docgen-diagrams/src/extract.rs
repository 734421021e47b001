//! Location of fenced mermaid blocks in Markdown.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Opening ```` ```mermaid ```` line through the next ```` ``` ````.
static MERMAID_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```mermaid[ \t]*\r?\n(.*?)```").unwrap());

/// A fenced mermaid block found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MermaidBlock {
    /// One-based position among the document's mermaid blocks.
    pub index: usize,
    /// Byte range of the whole fenced block, fences included.
    pub span: Range<usize>,
    /// Diagram source between the fences.
    pub source: String,
}

/// Find all mermaid blocks in order of appearance.
///
/// Matches are non-overlapping; indices run 1..=N.
#[must_use]
pub fn find_mermaid_blocks(markdown: &str) -> Vec<MermaidBlock> {
    MERMAID_FENCE
        .captures_iter(markdown)
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            Some(MermaidBlock {
                index: i + 1,
                span: whole.range(),
                source: caps.get(1)?.as_str().to_owned(),
            })
        })
        .collect()
}

/// Replace each block's span with the corresponding replacement.
///
/// `replacements` must be in the same order as `blocks`.
#[must_use]
pub fn replace_blocks(markdown: &str, blocks: &[MermaidBlock], replacements: &[String]) -> String {
    let mut result = String::with_capacity(markdown.len());
    let mut last_end = 0;
    for (block, replacement) in blocks.iter().zip(replacements) {
        result.push_str(&markdown[last_end..block.span.start]);
        result.push_str(replacement);
        last_end = block.span.end;
    }
    result.push_str(&markdown[last_end..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_finds_blocks_in_order() {
        let md = "# T\n\n```mermaid\ngraph TD\nA-->B\n```\n\ntext\n\n```mermaid\nsequenceDiagram\nA->>B: hi\n```\n";
        let blocks = find_mermaid_blocks(md);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].index, 1);
        assert_eq!(blocks[0].source, "graph TD\nA-->B\n");
        assert_eq!(blocks[1].index, 2);
        assert_eq!(blocks[1].source, "sequenceDiagram\nA->>B: hi\n");
        assert_eq!(&md[blocks[0].span.clone()], "```mermaid\ngraph TD\nA-->B\n```");
    }

    #[test]
    fn test_ignores_other_languages() {
        let md = "```rust\nfn main() {}\n```\n\n```mermaidx\nnot a diagram\n```\n";
        // "mermaidx" has no newline right after the tag
        assert!(find_mermaid_blocks(md).is_empty());
    }

    #[test]
    fn test_trailing_whitespace_and_crlf() {
        let md = "```mermaid  \r\ngraph LR\r\nA-->B\r\n```\r\n";
        let blocks = find_mermaid_blocks(md);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].source, "graph LR\r\nA-->B\r\n");
    }

    #[test]
    fn test_no_blocks() {
        assert!(find_mermaid_blocks("plain text\n").is_empty());
    }

    #[test]
    fn test_replace_blocks() {
        let md = "a\n```mermaid\nx\n```\nb\n```mermaid\ny\n```\nc";
        let blocks = find_mermaid_blocks(md);
        let out = replace_blocks(md, &blocks, &["[1]".to_owned(), "[2]".to_owned()]);
        assert_eq!(out, "a\n[1]\nb\n[2]\nc");
    }
}
