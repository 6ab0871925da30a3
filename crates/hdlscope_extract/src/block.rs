//! Procedural blocks and the statements inside them.
//!
//! Statement extents follow the statement grammar just far enough to find
//! where a statement ends: `begin`/`end` and `fork`/`join` pairs, `if` with
//! its `else` chain, `case`/`endcase`, loop headers, event and delay
//! controls, and plain `;`-terminated statements.

use crate::modules::{owner, ModuleSpan};
use crate::scan::{
    find_assign_op, find_semicolon, ident_at, is_ident_byte, normalize, skip_group,
    skip_keyword_block, skip_ws, word_at,
};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static ALWAYS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(always_ff|always_comb|always_latch|always)\b")
        .expect("always pattern is valid")
});

const BLOCK_OPENS: [&str; 2] = ["begin", "fork"];
const BLOCK_CLOSES: [&str; 4] = ["end", "join", "join_any", "join_none"];
const CASE_OPENS: [&str; 4] = ["case", "casex", "casez", "randcase"];
const CASE_CLOSES: [&str; 1] = ["endcase"];

/// A procedural block before line numbers and signal sets are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawBlock {
    pub keyword: String,
    pub sensitivity: String,
    /// Offset of the `always` keyword.
    pub offset: usize,
    /// Byte range of the block's statement.
    pub body: Range<usize>,
    pub assignments: Vec<RawProcAssign>,
}

/// A procedural assignment with its statement offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawProcAssign {
    pub lhs: String,
    pub rhs: String,
    pub blocking: bool,
    pub offset: usize,
}

/// Finds every `always`-family block.
pub(crate) fn find_blocks(masked: &str, spans: &[ModuleSpan]) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    for m in ALWAYS.find_iter(masked) {
        let limit = owner(spans, m.start()).map_or(masked.len(), |i| spans[i].end);
        let (sensitivity, body_start) = event_control(masked, m.end(), limit);
        let body_end = statement_end(masked, body_start, limit);
        let mut assignments = Vec::new();
        visit_statement(masked, body_start, body_end, &mut assignments);
        blocks.push(RawBlock {
            keyword: m.as_str().to_string(),
            sensitivity,
            offset: m.start(),
            body: body_start..body_end,
            assignments,
        });
    }
    blocks
}

/// Parses the `@(...)`, `@*` or `#delay` after an `always` keyword.
///
/// Returns the sensitivity text and the offset of the following statement.
fn event_control(text: &str, pos: usize, limit: usize) -> (String, usize) {
    let bytes = text.as_bytes();
    let mut pos = skip_ws(text, pos, limit);
    if pos >= limit {
        return (String::new(), pos);
    }
    match bytes[pos] {
        b'@' => {
            pos = skip_ws(text, pos + 1, limit);
            if pos >= limit {
                return (String::new(), pos);
            }
            match bytes[pos] {
                b'*' => ("*".to_string(), skip_ws(text, pos + 1, limit)),
                b'(' => {
                    let end = skip_group(text, pos, limit);
                    let inner_end = if end > pos + 1 && bytes[end - 1] == b')' {
                        end - 1
                    } else {
                        end
                    };
                    let inner = normalize(&text[pos + 1..inner_end]);
                    (inner, skip_ws(text, end, limit))
                }
                _ => match ident_at(text, pos, limit) {
                    Some(end) => (text[pos..end].to_string(), skip_ws(text, end, limit)),
                    None => (String::new(), pos),
                },
            }
        }
        b'#' => (String::new(), skip_ws(text, skip_delay(text, pos, limit), limit)),
        _ => (String::new(), pos),
    }
}

/// Given `pos` at `#`, returns the offset after the delay value.
fn skip_delay(text: &str, pos: usize, limit: usize) -> usize {
    let bytes = text.as_bytes();
    let mut p = skip_ws(text, pos + 1, limit);
    if p < limit && bytes[p] == b'(' {
        return skip_group(text, p, limit);
    }
    while p < limit && (is_ident_byte(bytes[p]) || bytes[p] == b'.') {
        p += 1;
    }
    p
}

/// Given `pos` at `@`, returns the offset after the event expression.
fn skip_event(text: &str, pos: usize, limit: usize) -> usize {
    let bytes = text.as_bytes();
    let p = skip_ws(text, pos + 1, limit);
    if p >= limit {
        return limit;
    }
    match bytes[p] {
        b'(' => skip_group(text, p, limit),
        b'*' => p + 1,
        _ => ident_at(text, p, limit).unwrap_or(p),
    }
}

/// Offset of the statement after an `if` keyword's condition at `pos`.
fn if_body(text: &str, pos: usize, limit: usize) -> usize {
    let cond = skip_ws(text, pos + 2, limit);
    if cond < limit && text.as_bytes()[cond] == b'(' {
        skip_group(text, cond, limit)
    } else {
        cond
    }
}

/// Offset of the body after a loop keyword `w` at `pos`.
fn loop_body(text: &str, pos: usize, w: &str, limit: usize) -> usize {
    let header = skip_ws(text, pos + w.len(), limit);
    if header < limit && text.as_bytes()[header] == b'(' {
        skip_group(text, header, limit)
    } else {
        header
    }
}

/// Returns the offset just past the statement starting at or after `pos`.
///
/// Prefixes (`@`, `#`, loop headers) are consumed in a loop; each `if` whose
/// `else` is still open is counted, so `else if` chains need no recursion.
pub(crate) fn statement_end(text: &str, mut pos: usize, limit: usize) -> usize {
    let bytes = text.as_bytes();
    let mut open_ifs = 0usize;
    loop {
        pos = skip_ws(text, pos, limit);
        let end = if pos >= limit {
            limit
        } else {
            match bytes[pos] {
                b';' => pos + 1,
                b'@' => {
                    pos = skip_event(text, pos, limit).max(pos + 1);
                    continue;
                }
                b'#' => {
                    pos = skip_delay(text, pos, limit).max(pos + 1);
                    continue;
                }
                _ => match word_at(text, pos, limit) {
                    Some(w) if BLOCK_OPENS.contains(&w) => {
                        skip_keyword_block(text, pos, limit, &BLOCK_OPENS, &BLOCK_CLOSES)
                    }
                    Some(w) if CASE_OPENS.contains(&w) => {
                        skip_keyword_block(text, pos, limit, &CASE_OPENS, &CASE_CLOSES)
                    }
                    Some("if") => {
                        open_ifs += 1;
                        pos = if_body(text, pos, limit);
                        continue;
                    }
                    Some(w @ ("for" | "while" | "repeat" | "wait")) => {
                        pos = loop_body(text, pos, w, limit);
                        continue;
                    }
                    Some(w @ ("forever" | "unique" | "priority" | "unique0")) => {
                        pos += w.len();
                        continue;
                    }
                    _ => find_semicolon(text, pos, limit).map_or(limit, |i| i + 1),
                },
            }
        };
        // the innermost open `if` takes the next `else`
        let mut resumed = false;
        while open_ifs > 0 {
            open_ifs -= 1;
            let next = skip_ws(text, end, limit);
            if word_at(text, next, limit) == Some("else") {
                pos = next + 4;
                resumed = true;
                break;
            }
        }
        if !resumed {
            return end;
        }
    }
}

/// Where the closing keyword of a block ending at `end` starts.
fn closer_start(text: &str, start: usize, end: usize, closes: &[&str]) -> usize {
    let bytes = text.as_bytes();
    let mut s = end;
    while s > start && is_ident_byte(bytes[s - 1]) {
        s -= 1;
    }
    if closes.contains(&&text[s..end]) {
        s
    } else {
        end
    }
}

/// Pending statement-walk work; the stack keeps nesting off the call stack.
enum Visit {
    /// A single statement in `[pos, end)`.
    Statement(usize, usize),
    /// A run of statements in `[pos, end)`.
    Sequence(usize, usize),
    /// `label: statement` items in `[pos, end)`, up to the `endcase`.
    CaseItems(usize, usize),
}

/// Collects the procedural assignments of the statement in `[pos, end)`.
fn visit_statement(text: &str, pos: usize, end: usize, out: &mut Vec<RawProcAssign>) {
    let mut stack = vec![Visit::Statement(pos, end)];
    while let Some(work) = stack.pop() {
        match work {
            Visit::Statement(pos, end) => visit_one(text, pos, end, &mut stack, out),
            Visit::Sequence(pos, end) => {
                let pos = skip_ws(text, pos, end);
                if pos >= end {
                    continue;
                }
                // nested blocks are flattened into the enclosing run
                match word_at(text, pos, end) {
                    Some(w) if BLOCK_OPENS.contains(&w) => {
                        stack.push(Visit::Sequence(block_inner(text, pos, w, end), end));
                        continue;
                    }
                    Some(w) if BLOCK_CLOSES.contains(&w) => {
                        stack.push(Visit::Sequence(pos + w.len(), end));
                        continue;
                    }
                    _ => {}
                }
                let stmt_end = statement_end(text, pos, end);
                if stmt_end > pos {
                    stack.push(Visit::Sequence(stmt_end, end));
                }
                stack.push(Visit::Statement(pos, stmt_end));
            }
            Visit::CaseItems(pos, end) => {
                if let Some((start, stmt_end)) = next_case_item(text, pos, end) {
                    if stmt_end > pos {
                        stack.push(Visit::CaseItems(stmt_end, end));
                    }
                    stack.push(Visit::Statement(start, stmt_end));
                }
            }
        }
    }
}

/// Handles one statement, pushing nested work in reverse body order.
fn visit_one(
    text: &str,
    mut pos: usize,
    end: usize,
    stack: &mut Vec<Visit>,
    out: &mut Vec<RawProcAssign>,
) {
    let bytes = text.as_bytes();
    loop {
        pos = skip_ws(text, pos, end);
        if pos >= end {
            return;
        }
        match bytes[pos] {
            b';' => return,
            b'@' => {
                pos = skip_event(text, pos, end).max(pos + 1);
                continue;
            }
            b'#' => {
                pos = skip_delay(text, pos, end).max(pos + 1);
                continue;
            }
            _ => {}
        }
        match word_at(text, pos, end) {
            Some(w) if BLOCK_OPENS.contains(&w) => {
                let inner = block_inner(text, pos, w, end);
                let inner_end = closer_start(text, inner, end, &BLOCK_CLOSES);
                stack.push(Visit::Sequence(inner, inner_end));
            }
            Some(w) if CASE_OPENS.contains(&w) => {
                let sel = skip_ws(text, pos + w.len(), end);
                let items = if sel < end && bytes[sel] == b'(' {
                    skip_group(text, sel, end)
                } else {
                    sel
                };
                let items_end = closer_start(text, items, end, &CASE_CLOSES);
                stack.push(Visit::CaseItems(items, items_end));
            }
            Some("if") => {
                let then_start = if_body(text, pos, end);
                let then_end = statement_end(text, then_start, end);
                let next = skip_ws(text, then_end, end);
                if word_at(text, next, end) == Some("else") {
                    stack.push(Visit::Statement(next + 4, end));
                }
                stack.push(Visit::Statement(then_start, then_end));
            }
            Some(w @ ("for" | "while" | "repeat" | "wait")) => {
                pos = loop_body(text, pos, w, end);
                continue;
            }
            Some(w @ ("forever" | "unique" | "priority" | "unique0")) => {
                pos += w.len();
                continue;
            }
            Some("assign") => simple_statement(text, pos + "assign".len(), pos, end, out),
            _ => simple_statement(text, pos, pos, end, out),
        }
        return;
    }
}

/// Offset just inside a `begin`/`fork` keyword `w` at `pos`, past any label.
fn block_inner(text: &str, pos: usize, w: &str, end: usize) -> usize {
    let mut inner = skip_ws(text, pos + w.len(), end);
    if inner < end && text.as_bytes()[inner] == b':' {
        inner = skip_ws(text, inner + 1, end);
        inner = ident_at(text, inner, end).unwrap_or(inner);
    }
    inner
}

/// Locates the next case item at or after `pos`: its statement's start and
/// end offsets.
fn next_case_item(text: &str, pos: usize, end: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let pos = skip_ws(text, pos, end);
    if pos >= end {
        return None;
    }
    let stmt_start = if word_at(text, pos, end) == Some("default") {
        let p = skip_ws(text, pos + "default".len(), end);
        if p < end && bytes[p] == b':' {
            p + 1
        } else {
            p
        }
    } else {
        label_colon(text, pos, end)? + 1
    };
    Some((stmt_start, statement_end(text, stmt_start, end)))
}

/// Finds the `:` ending a case label, skipping nested selects.
fn label_colon(text: &str, pos: usize, end: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    for (i, &b) in bytes.iter().enumerate().take(end).skip(pos) {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b':' if depth == 0 => return Some(i),
            b';' => return None,
            _ => {}
        }
    }
    None
}

/// Records the assignment in a `;`-terminated statement, if it has one.
fn simple_statement(
    text: &str,
    from: usize,
    stmt_start: usize,
    end: usize,
    out: &mut Vec<RawProcAssign>,
) {
    let stop = find_semicolon(text, from, end).unwrap_or(end);
    let stmt = &text[from..stop];
    let Some(op) = find_assign_op(stmt) else {
        return;
    };
    let lhs = stmt[..op.at].trim();
    let starts_ok = lhs
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_' || b == b'{');
    if !starts_ok {
        return;
    }
    let mut rhs = stmt[op.at + op.len..].trim_start();
    if rhs.starts_with('#') {
        let skipped = skip_delay(rhs, 0, rhs.len());
        rhs = &rhs[skipped..];
    } else if rhs.starts_with('@') {
        let skipped = skip_event(rhs, 0, rhs.len());
        rhs = &rhs[skipped..];
    }
    out.push(RawProcAssign {
        lhs: normalize(lhs),
        rhs: normalize(rhs),
        blocking: op.blocking,
        offset: stmt_start,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(text: &str) -> Vec<RawBlock> {
        find_blocks(text, &[])
    }

    #[test]
    fn always_pattern_compiles() {
        assert!(ALWAYS.is_match("always_ff @(posedge clk)"));
        assert!(!ALWAYS.is_match("always_x"));
    }

    #[test]
    fn sequential_block_extent() {
        let text = "always @(posedge clk) begin\n  q <= d;\n  r <= q;\nend\nassign x = y;";
        let b = &blocks(text)[0];
        assert_eq!(b.keyword, "always");
        assert_eq!(b.sensitivity, "posedge clk");
        assert!(text[b.body.clone()].ends_with("end"));
        assert_eq!(b.assignments.len(), 2);
        assert!(!b.assignments[0].blocking);
        assert_eq!(b.assignments[1].lhs, "r");
    }

    #[test]
    fn star_sensitivity_forms() {
        assert_eq!(blocks("always @* y = a;")[0].sensitivity, "*");
        assert_eq!(blocks("always @(*) y = a;")[0].sensitivity, "*");
        assert_eq!(blocks("always @( * ) y = a;")[0].sensitivity, "*");
        assert_eq!(blocks("always @() y = a;")[0].sensitivity, "");
        assert_eq!(blocks("always_comb y = a;")[0].sensitivity, "");
    }

    #[test]
    fn if_else_chain_is_one_statement() {
        let text = "if (a) x = 1; else if (b) x = 2; else x = 3; y = 4;";
        let end = statement_end(text, 0, text.len());
        assert_eq!(&text[..end], "if (a) x = 1; else if (b) x = 2; else x = 3;");
    }

    #[test]
    fn case_items_collected() {
        let text = "always @(*) begin\n case (sel)\n  2'b00: y = a;\n  2'b01: begin y = b; end\n  default: y = c;\n endcase\nend";
        let b = &blocks(text)[0];
        let rhs: Vec<&str> = b.assignments.iter().map(|a| a.rhs.as_str()).collect();
        assert_eq!(rhs, vec!["a", "b", "c"]);
        assert!(b.assignments.iter().all(|a| a.blocking));
    }

    #[test]
    fn procedural_assign_keyword_stripped() {
        let text = "always @(posedge clk) begin\n  assign sum = a + b + cin;\nend";
        let b = &blocks(text)[0];
        assert_eq!(b.assignments.len(), 1);
        assert_eq!(b.assignments[0].lhs, "sum");
        assert_eq!(b.assignments[0].rhs, "a + b + cin");
        assert!(b.assignments[0].blocking);
    }

    #[test]
    fn loop_headers_and_comparisons_ignored() {
        let text = "always @(*) begin\n for (i = 0; i < 4; i = i + 1) y[i] = a[i];\n if (a <= b) z = 1;\nend";
        let b = &blocks(text)[0];
        let lhs: Vec<&str> = b.assignments.iter().map(|a| a.lhs.as_str()).collect();
        assert_eq!(lhs, vec!["y[i]", "z"]);
    }

    #[test]
    fn intra_assignment_delay_stripped() {
        let text = "always @(posedge clk) q <= #1 d;";
        let b = &blocks(text)[0];
        assert_eq!(b.assignments[0].rhs, "d");
    }

    #[test]
    fn named_begin_block() {
        let text = "always @(posedge clk) begin : regs\n  q <= d;\nend";
        let b = &blocks(text)[0];
        assert_eq!(b.assignments.len(), 1);
        assert_eq!(b.assignments[0].lhs, "q");
    }

    #[test]
    fn nested_if_takes_inner_else() {
        let text = "if (a) if (b) x = 1; else y = 2; else z = 3; w = 4;";
        let end = statement_end(text, 0, text.len());
        assert_eq!(&text[..end], "if (a) if (b) x = 1; else y = 2; else z = 3;");
        let text = "always @(*) if (a) if (b) x = 1; else y = 2;";
        let b = &blocks(text)[0];
        let lhs: Vec<&str> = b.assignments.iter().map(|a| a.lhs.as_str()).collect();
        assert_eq!(lhs, vec!["x", "y"]);
    }

    #[test]
    fn long_else_if_chain() {
        let mut text = String::from("always @(*) if (s == 0) y = 0;");
        for i in 1..20_000 {
            text.push_str(&format!(" else if (s == {i}) y = {i};"));
        }
        text.push_str(" else y = 1;\nassign z = 1;");
        let b = &blocks(&text)[0];
        assert_eq!(b.assignments.len(), 20_001);
        assert_eq!(b.assignments[19_999].rhs, "19999");
        assert!(text[b.body.clone()].ends_with("else y = 1;"));
    }

    #[test]
    fn repeated_event_controls() {
        let text = format!("always @(posedge clk) {} q = 1;", "@".repeat(200_000));
        let b = &blocks(&text)[0];
        assert_eq!(b.body.end, text.len());
        assert_eq!(b.assignments.len(), 1);
        assert_eq!(b.assignments[0].lhs, "q");
    }

    #[test]
    fn deeply_nested_blocks() {
        let depth = 50_000;
        let text = format!(
            "always @(posedge clk) {} q <= d; {}",
            "begin ".repeat(depth),
            "end ".repeat(depth)
        );
        let b = &blocks(&text)[0];
        assert_eq!(b.assignments.len(), 1);
        assert!(text[b.body.clone()].ends_with("end"));
    }

    #[test]
    fn unterminated_block_runs_to_limit() {
        let text = "always @(posedge clk) begin\n  q <= d;\n";
        let b = &blocks(text)[0];
        assert_eq!(b.body.end, text.len());
        assert_eq!(b.assignments.len(), 1);
    }
}
