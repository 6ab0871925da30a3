//! Port, signal and parameter declarations.

use crate::scan::{
    find_semicolon, ident_at, in_ranges, is_ident_byte, skip_group, skip_ws, split_top_level,
    word_at,
};
use hdlscope_model::{ParamKind, PortDirection, SignalKind};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static DIRECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(input|output|inout)\b").expect("direction pattern is valid")
});

static NET_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|;)[ \t]*(wire|tri|reg|logic|integer)\b")
        .expect("net declaration pattern is valid")
});

static PARAM_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(parameter|localparam)\b").expect("parameter pattern is valid")
});

const DIRECTION_WORDS: [&str; 3] = ["input", "output", "inout"];
const PARAM_WORDS: [&str; 2] = ["parameter", "localparam"];

/// A port declaration before width resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawPort {
    pub name: String,
    pub direction: PortDirection,
    pub range: Option<String>,
    pub is_reg: bool,
    pub signed: bool,
    pub is_integer: bool,
    pub offset: usize,
}

/// A `wire`/`reg` declaration before width resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawSignal {
    pub name: String,
    pub kind: SignalKind,
    pub range: Option<String>,
    pub is_integer: bool,
    pub dims: Vec<String>,
    pub offset: usize,
}

/// A parameter declaration before folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawParam {
    pub name: String,
    pub kind: ParamKind,
    pub value: String,
    pub offset: usize,
}

/// The type words and packed range preceding the declared names.
#[derive(Debug, Default)]
struct DeclHead {
    is_reg: bool,
    is_wire: bool,
    signed: bool,
    is_integer: bool,
    range: Option<String>,
    /// Offset of the first declared name, relative to the segment.
    names_at: usize,
}

fn parse_head(seg: &str) -> DeclHead {
    let mut head = DeclHead::default();
    let mut pos = 0;
    loop {
        pos = skip_ws(seg, pos, seg.len());
        if pos >= seg.len() {
            break;
        }
        if seg.as_bytes()[pos] == b'[' {
            let end = skip_group(seg, pos, seg.len());
            if head.range.is_none() {
                let inner = seg[pos + 1..end.saturating_sub(1).max(pos + 1)].trim();
                head.range = Some(inner.to_string());
            }
            pos = end;
            continue;
        }
        match word_at(seg, pos, seg.len()) {
            Some(w @ ("reg" | "logic" | "var" | "bit")) => {
                head.is_reg = true;
                pos += w.len();
            }
            Some("integer") => {
                head.is_reg = true;
                head.is_integer = true;
                pos += "integer".len();
            }
            Some(w @ ("wire" | "tri" | "wand" | "wor")) => {
                head.is_wire = true;
                pos += w.len();
            }
            Some("signed") => {
                head.signed = true;
                pos += "signed".len();
            }
            Some(w @ ("unsigned" | "int")) => pos += w.len(),
            _ => break,
        }
    }
    head.names_at = pos;
    head
}

/// Extracts the declared name from one comma-separated item.
///
/// The item may carry unpacked dimensions and an initializer; for
/// user-typed items (`my_t name`) the last identifier before them wins.
/// Returns the name, its offset within `item`, and the unpacked dimensions.
fn declared_name(item: &str) -> Option<(&str, usize, Vec<String>)> {
    let before_init = split_top_level(item, b'=')
        .first()
        .map_or(item, |(_, piece)| *piece);
    let bytes = before_init.as_bytes();
    let mut name: Option<(usize, usize)> = None;
    let mut dims = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        if b == b'[' {
            let end = skip_group(before_init, pos, bytes.len());
            if name.is_some() {
                let inner_end = end.saturating_sub(1).max(pos + 1);
                dims.push(before_init[pos + 1..inner_end].trim().to_string());
            }
            pos = end;
        } else if let Some(end) = ident_at(before_init, pos, bytes.len()) {
            if pos == 0 || !is_ident_byte(bytes[pos - 1]) {
                name = Some((pos, end));
                dims.clear();
            }
            pos = end;
        } else {
            pos += 1;
        }
    }
    let (start, end) = name?;
    Some((&before_init[start..end], start, dims))
}

/// Where a declaration segment starting at `from` ends.
///
/// Stops at a `;`, at a `)` closing an enclosing list, or at one of
/// `stop_words` at depth zero.
fn segment_end(text: &str, from: usize, limit: usize, stop_words: &[&str]) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut i = from;
    while i < limit {
        match bytes[i] {
            b';' => return i,
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                if depth == 0 {
                    return i;
                }
                depth -= 1;
            }
            b if depth == 0 && b.is_ascii_alphabetic() => {
                if let Some(word) = word_at(text, i, limit) {
                    if stop_words.contains(&word) {
                        return i;
                    }
                    i += word.len();
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    limit
}

/// Finds every port declaration, ANSI header style or body style.
pub(crate) fn find_ports(masked: &str, excluded: &[Range<usize>]) -> Vec<RawPort> {
    let mut ports = Vec::new();
    for m in DIRECTION.find_iter(masked) {
        if in_ranges(excluded, m.start()) {
            continue;
        }
        let Some(direction) = PortDirection::from_keyword(m.as_str()) else {
            continue;
        };
        let seg_start = m.end();
        let seg_end = segment_end(masked, seg_start, masked.len(), &DIRECTION_WORDS);
        let seg = &masked[seg_start..seg_end];
        let head = parse_head(seg);
        let names = &seg[head.names_at..];
        for (rel, item) in split_top_level(names, b',') {
            let Some((name, at, _)) = declared_name(item) else {
                continue;
            };
            ports.push(RawPort {
                name: name.to_string(),
                direction,
                range: head.range.clone(),
                is_reg: head.is_reg,
                signed: head.signed,
                is_integer: head.is_integer,
                offset: seg_start + head.names_at + rel + at,
            });
        }
    }
    ports
}

/// Finds every `wire`/`reg`/`logic`/`integer` declaration statement.
pub(crate) fn find_signals(masked: &str, excluded: &[Range<usize>]) -> Vec<RawSignal> {
    let mut signals = Vec::new();
    for caps in NET_DECL.captures_iter(masked) {
        let Some(kw) = caps.get(1) else {
            continue;
        };
        if in_ranges(excluded, kw.start()) {
            continue;
        }
        let seg_start = kw.start();
        let seg_end = find_semicolon(masked, seg_start, masked.len()).unwrap_or(masked.len());
        let seg = &masked[seg_start..seg_end];
        let head = parse_head(seg);
        let kind = if head.is_reg {
            SignalKind::Reg
        } else {
            SignalKind::Wire
        };
        let names = &seg[head.names_at..];
        for (rel, item) in split_top_level(names, b',') {
            let Some((name, at, dims)) = declared_name(item) else {
                continue;
            };
            signals.push(RawSignal {
                name: name.to_string(),
                kind,
                range: head.range.clone(),
                is_integer: head.is_integer,
                dims,
                offset: seg_start + head.names_at + rel + at,
            });
        }
    }
    signals
}

/// Finds every `parameter`/`localparam` declaration, in headers and bodies.
pub(crate) fn find_params(masked: &str) -> Vec<RawParam> {
    let mut params = Vec::new();
    for m in PARAM_DECL.find_iter(masked) {
        let kind = if m.as_str() == "localparam" {
            ParamKind::Localparam
        } else {
            ParamKind::Parameter
        };
        let seg_start = m.end();
        let seg_end = segment_end(masked, seg_start, masked.len(), &PARAM_WORDS);
        let seg = &masked[seg_start..seg_end];
        let head = parse_head(seg);
        let items = &seg[head.names_at..];
        for (rel, item) in split_top_level(items, b',') {
            let pieces = split_top_level(item, b'=');
            let [(_, lhs), (value_at, _), ..] = pieces.as_slice() else {
                continue;
            };
            let lhs_start = skip_ws(lhs, 0, lhs.len());
            let Some(name_end) = ident_at(lhs, lhs_start, lhs.len()) else {
                continue;
            };
            params.push(RawParam {
                name: lhs[lhs_start..name_end].to_string(),
                kind,
                value: crate::scan::normalize(&item[*value_at..]),
                offset: seg_start + head.names_at + rel + lhs_start,
            });
        }
    }
    params
}
