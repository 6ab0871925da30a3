//! Shared helpers for lint rule implementations.

use hdlscope_diagnostics::Finding;
use hdlscope_model::{BlockKind, DesignModel, Edge, ProceduralBlock};
use hdlscope_source::SourceText;

use crate::LintRule;

/// Lines after a `negedge` block searched for a `posedge` line.
const POSEDGE_WINDOW: u32 = 10;

/// Creates a finding at the rule's default severity.
pub(crate) fn finding(rule: &dyn LintRule, line: u32, message: impl Into<String>) -> Finding {
    Finding::new(rule.default_severity(), rule.code(), rule.name(), message).with_line(line)
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Counts whole-word occurrences of `word` in `text`.
pub(crate) fn count_word(text: &str, word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }
    let bytes = text.as_bytes();
    text.match_indices(word)
        .filter(|(at, _)| {
            let end = at + word.len();
            (*at == 0 || !is_word_byte(bytes[at - 1]))
                && (end >= bytes.len() || !is_word_byte(bytes[end]))
        })
        .count()
}

/// Returns `true` if `text` contains `word` as a whole word.
pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    count_word(text, word) > 0
}

/// Sequential blocks sensitive to a `negedge` with no `posedge` line in the
/// following ten source lines.
pub(crate) fn lone_negedge_blocks<'m>(
    model: &'m DesignModel,
    source: &SourceText,
) -> Vec<&'m ProceduralBlock> {
    let last = source.line_count();
    model
        .modules
        .iter()
        .flat_map(|m| m.blocks.iter())
        .filter(|b| {
            b.kind == BlockKind::Sequential && b.edges().iter().any(|e| e.edge == Edge::Negedge)
        })
        .filter(|b| {
            let window_end = b.line.saturating_add(POSEDGE_WINDOW).min(last);
            !(b.line + 1..=window_end).any(|n| contains_word(source.masked_line(n), "posedge"))
        })
        .collect()
}
