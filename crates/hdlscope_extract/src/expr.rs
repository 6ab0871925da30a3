//! Expression measurements: operator complexity and referenced identifiers.

use crate::scan::{is_ident_byte, is_ident_start};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static SIZED_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b[0-9][0-9_]*\s*)?'[sS]?[bBoOdDhH]\s*[0-9a-fA-FxXzZ_?]+")
        .expect("sized literal pattern is valid")
});

/// Operators counted by [`complexity`], longest first for maximal munch.
const OPERATORS: [&str; 29] = [
    "===", "!==", "<<<", ">>>", "**", "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "~&", "~|",
    "~^", "^~", "+", "-", "*", "/", "%", "&", "|", "^", "~", "!", "<", ">",
];

const KEYWORDS: [&str; 12] = [
    "begin", "end", "if", "else", "case", "endcase", "default", "posedge", "negedge", "or",
    "signed", "unsigned",
];

/// Replaces sized and based literals (`8'hFF`) with `0`.
pub(crate) fn mask_sized_literals(expr: &str) -> Cow<'_, str> {
    SIZED_LITERAL.replace_all(expr, "0")
}

/// Expression complexity: every binary or unary operator counts 1, every
/// balanced parenthesis pair counts 1 and every `?:` counts 2.
pub(crate) fn complexity(expr: &str) -> u32 {
    let masked = mask_sized_literals(expr);
    let text = masked.as_ref();
    let mut count = 0u32;
    let mut open_parens = 0u32;
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        match rest.as_bytes()[0] {
            b'(' => {
                open_parens += 1;
                i += 1;
            }
            b')' => {
                if open_parens > 0 {
                    open_parens -= 1;
                    count += 1;
                }
                i += 1;
            }
            b'?' => {
                count += 2;
                i += 1;
            }
            _ => match OPERATORS.iter().find(|op| rest.starts_with(**op)) {
                Some(op) => {
                    count += 1;
                    i += op.len();
                }
                None => i += rest.chars().next().map_or(1, char::len_utf8),
            },
        }
    }
    count
}

/// Identifiers referenced by an expression, de-duplicated in first-seen order.
///
/// Sized literals, system functions (`$clog2`) and a few keywords are skipped.
pub(crate) fn identifiers(expr: &str) -> Vec<String> {
    let masked = mask_sized_literals(expr);
    let text = masked.as_ref();
    let bytes = text.as_bytes();
    let mut names: Vec<String> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let prev = if i > 0 { bytes[i - 1] } else { b' ' };
        if is_ident_start(b) && !is_ident_byte(prev) && prev != b'.' {
            let mut end = i + 1;
            while end < bytes.len() && is_ident_byte(bytes[end]) {
                end += 1;
            }
            let name = &text[i..end];
            if !KEYWORDS.contains(&name) && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
            i = end;
        } else if is_ident_byte(b) {
            while i < bytes.len() && is_ident_byte(bytes[i]) {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    names
}

/// Pushes `name` onto `list` unless already present.
pub(crate) fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}
