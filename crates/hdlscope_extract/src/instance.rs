//! Module instantiations: `name #(overrides) inst (connections);`.

use crate::scan::{ident_at, in_ranges, normalize, skip_group, skip_ws, split_top_level};
use hdlscope_model::{Connection, ParamOverride};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static INSTANCE_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?:^|;)\s*([A-Za-z_][A-Za-z0-9_$]*)\b\s*(?:#|[A-Za-z_][A-Za-z0-9_$]*\b\s*[\[(])",
    )
    .expect("instance pattern is valid")
});

/// Words that can start a statement and are never module names.
const NOT_MODULES: [&str; 40] = [
    "always", "always_comb", "always_ff", "always_latch", "assign", "begin", "case", "casex",
    "casez", "default", "else", "end", "endcase", "endfunction", "endgenerate", "endmodule",
    "endtask", "for", "function", "generate", "genvar", "if", "initial", "inout", "input",
    "integer", "localparam", "logic", "module", "output", "parameter", "reg", "repeat", "return",
    "task", "tri", "while", "wire", "defparam", "forever",
];

/// An instance with the offset of its module name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawInstance {
    pub module_name: String,
    pub name: String,
    pub parameters: Vec<ParamOverride>,
    pub connections: Vec<Connection>,
    pub offset: usize,
}

/// Finds every instantiation outside procedural blocks and subroutines.
pub(crate) fn find_instances(masked: &str, excluded: &[Range<usize>]) -> Vec<RawInstance> {
    let mut instances = Vec::new();
    for caps in INSTANCE_HEAD.captures_iter(masked) {
        let Some(module) = caps.get(1) else {
            continue;
        };
        if NOT_MODULES.contains(&module.as_str())
            || in_ranges(excluded, module.start())
        {
            continue;
        }
        parse_instantiation(masked, module.start(), module.end(), &mut instances);
    }
    instances
}

/// Parses one instantiation statement, which may declare several instances.
fn parse_instantiation(text: &str, start: usize, name_end: usize, out: &mut Vec<RawInstance>) {
    let bytes = text.as_bytes();
    let limit = text.len();
    let module_name = &text[start..name_end];
    let mut pos = skip_ws(text, name_end, limit);
    let mut parameters = Vec::new();
    if pos < limit && bytes[pos] == b'#' {
        pos = skip_ws(text, pos + 1, limit);
        if pos < limit && bytes[pos] == b'(' {
            let end = skip_group(text, pos, limit);
            parameters = parse_overrides(inner(text, pos, end));
            pos = end;
        } else {
            while pos < limit && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'.') {
                pos += 1;
            }
        }
    }
    loop {
        pos = skip_ws(text, pos, limit);
        let Some(inst_end) = ident_at(text, pos, limit) else {
            return;
        };
        let name = &text[pos..inst_end];
        pos = skip_ws(text, inst_end, limit);
        if pos < limit && bytes[pos] == b'[' {
            pos = skip_ws(text, skip_group(text, pos, limit), limit);
        }
        if pos >= limit || bytes[pos] != b'(' {
            return;
        }
        let end = skip_group(text, pos, limit);
        out.push(RawInstance {
            module_name: module_name.to_string(),
            name: name.to_string(),
            parameters: parameters.clone(),
            connections: parse_connections(inner(text, pos, end)),
            offset: start,
        });
        pos = skip_ws(text, end, limit);
        if pos < limit && bytes[pos] == b',' {
            pos += 1;
        } else {
            return;
        }
    }
}

/// The text between an opener at `open` and its closer ending at `end`.
fn inner(text: &str, open: usize, end: usize) -> &str {
    let close = if end > open + 1 && text.as_bytes()[end - 1] == b')' {
        end - 1
    } else {
        end
    };
    &text[open + 1..close]
}

/// Splits `.name(value)` items into their name and value.
fn named_item(item: &str) -> Option<(String, String)> {
    let rest = item.strip_prefix('.')?;
    let name_end = ident_at(rest, 0, rest.len()).or_else(|| rest.starts_with('*').then_some(1))?;
    let name = rest[..name_end].to_string();
    let after = skip_ws(rest, name_end, rest.len());
    let value = if rest[after..].starts_with('(') {
        let end = skip_group(rest, after, rest.len());
        normalize(inner(rest, after, end))
    } else {
        String::new()
    };
    Some((name, value))
}

fn parse_overrides(list: &str) -> Vec<ParamOverride> {
    split_top_level(list, b',')
        .into_iter()
        .map(|(_, item)| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| match named_item(item) {
            Some((name, value)) => ParamOverride {
                name: Some(name),
                value,
            },
            None => ParamOverride {
                name: None,
                value: normalize(item),
            },
        })
        .collect()
}

fn parse_connections(list: &str) -> Vec<Connection> {
    split_top_level(list, b',')
        .into_iter()
        .map(|(_, item)| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| match named_item(item) {
            Some((port, expr)) => Connection {
                port: Some(port),
                expr,
            },
            None => Connection {
                port: None,
                expr: normalize(item),
            },
        })
        .collect()
}
