//! Continuous assignments.

use crate::expr::complexity;
use crate::scan::{find_assign_op, find_semicolon, in_ranges, normalize, split_top_level};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bassign\b").expect("assign pattern is valid")
});

/// A continuous assignment with the offset of its `assign` keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawAssign {
    pub lhs: String,
    pub rhs: String,
    pub complexity: u32,
    pub offset: usize,
}

/// Finds every `assign` statement outside procedural blocks.
///
/// `assign a = x, b = y;` yields two assignments on the same line.
pub(crate) fn find_assignments(masked: &str, excluded: &[Range<usize>]) -> Vec<RawAssign> {
    let mut assigns = Vec::new();
    for m in ASSIGN.find_iter(masked) {
        if in_ranges(excluded, m.start()) {
            continue;
        }
        let end = find_semicolon(masked, m.end(), masked.len()).unwrap_or(masked.len());
        let mut stmt = masked[m.end()..end].trim_start();
        if let Some(rest) = stmt.strip_prefix('#') {
            let skip = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '_'))
                .unwrap_or(rest.len());
            stmt = &rest[skip..];
        }
        for (_, piece) in split_top_level(stmt, b',') {
            let Some(op) = find_assign_op(piece) else {
                continue;
            };
            if !op.blocking {
                continue;
            }
            let rhs = &piece[op.at + op.len..];
            assigns.push(RawAssign {
                lhs: normalize(&piece[..op.at]),
                rhs: normalize(rhs),
                complexity: complexity(rhs),
                offset: m.start(),
            });
        }
    }
    assigns
}
