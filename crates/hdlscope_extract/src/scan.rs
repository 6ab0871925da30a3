//! Byte-level scanning helpers over masked source text.
//!
//! All positions are byte offsets into the masked text. Comments and string
//! bodies are already blanked, so delimiters and keywords found here are
//! real code. Every scan is bounded by an explicit `limit` and returns that
//! limit instead of failing when a closer is missing.

use std::ops::Range;

/// Returns `true` for bytes that may continue an identifier.
pub(crate) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Returns `true` for bytes that may start an identifier.
pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Advances past ASCII whitespace.
pub(crate) fn skip_ws(text: &str, mut pos: usize, limit: usize) -> usize {
    let bytes = text.as_bytes();
    while pos < limit && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Reads the identifier starting at `pos`, returning its end offset.
pub(crate) fn ident_at(text: &str, pos: usize, limit: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if pos >= limit || !is_ident_start(bytes[pos]) {
        return None;
    }
    let mut end = pos + 1;
    while end < limit && is_ident_byte(bytes[end]) {
        end += 1;
    }
    Some(end)
}

/// Returns the word at `pos` if it starts on a word boundary.
pub(crate) fn word_at(text: &str, pos: usize, limit: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    if pos > 0 && pos < bytes.len() && is_ident_byte(bytes[pos - 1]) {
        return None;
    }
    ident_at(text, pos, limit).map(|end| &text[pos..end])
}

/// Given `pos` at an opening `(`, `[` or `{`, returns the offset just past
/// its matching closer, or `limit` when unmatched.
pub(crate) fn skip_group(text: &str, pos: usize, limit: usize) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut i = pos;
    while i < limit {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    limit
}

/// Finds the first `;` at or after `pos`, regardless of nesting.
pub(crate) fn find_semicolon(text: &str, pos: usize, limit: usize) -> Option<usize> {
    text.as_bytes()[pos..limit]
        .iter()
        .position(|&b| b == b';')
        .map(|i| pos + i)
}

/// Given `pos` at an opening keyword, returns the offset just past the
/// keyword closing it at the same nesting depth.
///
/// `opens` and `closes` are word sets; e.g. `begin`/`fork` against
/// `end`/`join`, or the `case` family against `endcase`.
pub(crate) fn skip_keyword_block(
    text: &str,
    pos: usize,
    limit: usize,
    opens: &[&str],
    closes: &[&str],
) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut i = pos;
    while i < limit {
        if is_ident_start(bytes[i]) && (i == 0 || !is_ident_byte(bytes[i - 1])) {
            let end = ident_at(text, i, limit).unwrap_or(i + 1);
            let word = &text[i..end];
            if opens.contains(&word) {
                depth += 1;
            } else if closes.contains(&word) {
                depth -= 1;
                if depth == 0 {
                    return end;
                }
            }
            i = end;
        } else {
            i += 1;
        }
    }
    limit
}

/// Splits `text` on `sep` at nesting depth zero.
///
/// Returns `(offset, piece)` pairs with offsets relative to `text`.
pub(crate) fn split_top_level(text: &str, sep: u8) -> Vec<(usize, &str)> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            _ if b == sep && depth == 0 => {
                pieces.push((start, &text[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push((start, &text[start..]));
    pieces
}

/// Position of the assignment operator in a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AssignOp {
    /// Offset of the operator.
    pub at: usize,
    /// Operator length (1 for `=`, 2 for `<=`).
    pub len: usize,
    /// `true` for `=`.
    pub blocking: bool,
}

/// Finds the first assignment operator at depth zero.
///
/// A `<=` before any plain `=` is a non-blocking assignment. Comparison
/// operators (`==`, `!=`, `>=`, `===`) are skipped.
pub(crate) fn find_assign_op(text: &str) -> Option<AssignOp> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b'<' if depth == 0 && bytes.get(i + 1) == Some(&b'=') => {
                return Some(AssignOp {
                    at: i,
                    len: 2,
                    blocking: false,
                });
            }
            b'=' if depth == 0 => {
                let prev = if i > 0 { bytes[i - 1] } else { b' ' };
                let next = bytes.get(i + 1).copied().unwrap_or(b' ');
                if next == b'=' {
                    i += 2;
                    while i < bytes.len() && bytes[i] == b'=' {
                        i += 1;
                    }
                    continue;
                }
                if !matches!(prev, b'!' | b'>' | b'<' | b'=') {
                    return Some(AssignOp {
                        at: i,
                        len: 1,
                        blocking: true,
                    });
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Collapses whitespace runs to single spaces and trims.
pub(crate) fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sorts `ranges` and merges overlapping ones for [`in_ranges`].
pub(crate) fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| r.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for r in ranges {
        match merged.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }
    merged
}

/// Returns `true` if `offset` lies in one of the sorted, disjoint `ranges`.
pub(crate) fn in_ranges(ranges: &[Range<usize>], offset: usize) -> bool {
    let i = ranges.partition_point(|r| r.end <= offset);
    ranges.get(i).is_some_and(|r| r.contains(&offset))
}
