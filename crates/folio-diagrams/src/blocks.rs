//! Mermaid fence detection.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// "```mermaid", at least one whitespace character, then everything up to
/// the next "```".
static MERMAID_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```mermaid\s+(.*?)```").unwrap());

/// A fenced Mermaid block found in a document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramBlock {
    /// 0-based position among the document's blocks.
    pub ordinal: usize,
    /// Diagram text with surrounding whitespace trimmed.
    pub source: String,
    /// Byte range of the whole fence in the body.
    pub range: Range<usize>,
}

/// Find every Mermaid block in one forward pass.
///
/// Ordinals follow match order. Identical blocks are reported separately.
#[must_use]
pub fn scan_blocks(body: &str) -> Vec<DiagramBlock> {
    MERMAID_FENCE
        .captures_iter(body)
        .enumerate()
        .filter_map(|(ordinal, caps)| {
            let whole = caps.get(0)?;
            let source = caps.get(1).map_or("", |m| m.as_str());
            Some(DiagramBlock {
                ordinal,
                source: source.trim().to_owned(),
                range: whole.range(),
            })
        })
        .collect()
}
